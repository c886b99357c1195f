/*
 * Bounds Module
 *
 * Defines the axis-aligned box the flock lives in and the two boundary
 * policies that keep every agent inside it:
 * - Reflect: clamp to the crossed face and turn the velocity component back inward
 * - Wrap: reappear on the opposite face with the velocity untouched
 *
 * Each axis is resolved on its own; a corner crossing is two independent
 * face crossings, not a geometric reflection.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::error::ConfigError;

const AXIS_NAMES: [char; 3] = ['x', 'y', 'z'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Vec3,
    max: Vec3,
}

impl Bounds {
    /// Builds a box, rejecting any axis where `min >= max`.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, ConfigError> {
        for axis in 0..3 {
            let (lo, hi) = (min[axis], max[axis]);
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(ConfigError::InvalidBounds {
                    axis: AXIS_NAMES[axis],
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// A box centred on the origin with the given half extents.
    pub fn centered(half_extents: Vec3) -> Result<Self, ConfigError> {
        Self::new(-half_extents, half_extents)
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec3) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Uniformly distributed point inside the box.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        vec3(
            rng.gen_range(self.min.x..self.max.x),
            rng.gen_range(self.min.y..self.max.y),
            rng.gen_range(self.min.z..self.max.z),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec3::splat(-25.0),
            max: Vec3::splat(25.0),
        }
    }
}

/// How agents are kept inside the bounds. Chosen per simulation, not per agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    Reflect,
    #[default]
    Wrap,
}

impl BoundaryPolicy {
    pub fn label(self) -> &'static str {
        match self {
            BoundaryPolicy::Reflect => "Reflect",
            BoundaryPolicy::Wrap => "Wrap",
        }
    }

    /// Applies the policy to every axis independently.
    pub fn apply(self, bounds: &Bounds, position: &mut Vec3, velocity: &mut Vec3) {
        for axis in 0..3 {
            let (lo, hi) = (bounds.min[axis], bounds.max[axis]);
            match self {
                BoundaryPolicy::Reflect => {
                    if position[axis] > hi {
                        position[axis] = hi;
                        velocity[axis] = -velocity[axis].abs();
                    } else if position[axis] < lo {
                        position[axis] = lo;
                        velocity[axis] = velocity[axis].abs();
                    }
                }
                BoundaryPolicy::Wrap => {
                    if position[axis] > hi {
                        position[axis] = lo;
                    } else if position[axis] < lo {
                        position[axis] = hi;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_inverted_or_flat_axes() {
        let err = Bounds::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBounds { axis: 'y', min: 0.0, max: 0.0 }
        );
        assert!(Bounds::new(vec3(2.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0)).is_err());
        assert!(Bounds::new(vec3(f32::NAN, 0.0, 0.0), vec3(1.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn random_points_stay_inside() {
        let bounds = Bounds::new(vec3(-1.0, 2.0, -30.0), vec3(1.0, 3.0, 30.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(bounds.contains(bounds.random_point(&mut rng)));
        }
    }

    #[test]
    fn reflect_clamps_and_turns_back() {
        let bounds = Bounds::default();
        let mut position = vec3(25.4, -26.0, 3.0);
        let mut velocity = vec3(0.4, -0.2, 0.1);
        BoundaryPolicy::Reflect.apply(&bounds, &mut position, &mut velocity);
        assert_eq!(position, vec3(25.0, -25.0, 3.0));
        assert_eq!(velocity, vec3(-0.4, 0.2, 0.1));
    }

    #[test]
    fn reflect_does_not_push_outward_when_already_heading_in() {
        let bounds = Bounds::default();
        let mut position = vec3(40.0, 0.0, 0.0);
        let mut velocity = vec3(-0.3, 0.0, 0.0);
        BoundaryPolicy::Reflect.apply(&bounds, &mut position, &mut velocity);
        assert_eq!(position.x, 25.0);
        assert_eq!(velocity.x, -0.3);
    }

    #[test]
    fn wrap_moves_to_opposite_face() {
        let bounds = Bounds::default();
        let mut position = vec3(-25.1, 25.2, 0.0);
        let mut velocity = vec3(-0.5, 0.1, 0.0);
        BoundaryPolicy::Wrap.apply(&bounds, &mut position, &mut velocity);
        assert_eq!(position, vec3(25.0, -25.0, 0.0));
        assert_eq!(velocity, vec3(-0.5, 0.1, 0.0));
    }
}
