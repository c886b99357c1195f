/*
 * Agent Module
 *
 * This module defines the Agent struct and its steering behaviors.
 * Each agent follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * On top of those an agent can seek an external target and steer away from
 * obstacles. Forces accumulate in `acceleration` and are integrated once per
 * tick by `update` (reflect at the bounds) or `update_with_wrap`.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::bounds::{BoundaryPolicy, Bounds};
use crate::params::SteeringParams;

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    position: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
}

impl Agent {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
        }
    }

    /// Uniform position inside `bounds`, random direction at `max_speed`.
    pub fn random<R: Rng + ?Sized>(bounds: &Bounds, max_speed: f32, rng: &mut R) -> Self {
        let position = bounds.random_point(rng);

        // Rejection sample the unit ball so directions are not biased towards the cube corners
        let direction = loop {
            let candidate = vec3(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let length_squared = candidate.length_squared();
            if length_squared > 1.0e-6 && length_squared <= 1.0 {
                break candidate / length_squared.sqrt();
            }
        };

        Self::new(position, direction * max_speed)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    // Apply a force to the agent
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    // Steer away from neighbors closer than the desired separation
    pub fn separation(&self, neighbors: &[Agent], params: &SteeringParams) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0;

        for other in neighbors {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < params.desired_separation {
                sum += (self.position - other.position) / d;
                count += 1;
            }
        }

        if count == 0 {
            return Vec3::ZERO;
        }

        let average = sum / count as f32;
        if average.length_squared() == 0.0 {
            return Vec3::ZERO;
        }

        self.steer(average, params)
    }

    // Steer towards the average heading of neighbors
    pub fn alignment(&self, neighbors: &[Agent], params: &SteeringParams) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0;

        for other in neighbors {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < params.neighbor_dist {
                sum += other.velocity;
                count += 1;
            }
        }

        if count == 0 {
            return Vec3::ZERO;
        }

        self.steer(sum / count as f32, params)
    }

    // Steer towards the average position of neighbors
    pub fn cohesion(&self, neighbors: &[Agent], params: &SteeringParams) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0;

        for other in neighbors {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < params.neighbor_dist {
                sum += other.position;
                count += 1;
            }
        }

        if count == 0 {
            return Vec3::ZERO;
        }

        self.seek(sum / count as f32, params)
    }

    /// Steering towards `target` at full speed. A target on top of the agent
    /// yields a braking force, still bounded by `max_force`.
    pub fn seek(&self, target: Vec3, params: &SteeringParams) -> Vec3 {
        self.steer(target - self.position, params)
    }

    /// Pushes directly into `acceleration` for every obstacle strictly inside
    /// the avoidance radius, stronger the closer the obstacle is.
    pub fn avoid_obstacles(&mut self, obstacles: &[Vec3], params: &SteeringParams) {
        let radius = params.avoidance_radius;
        if radius <= 0.0 {
            return;
        }

        for &center in obstacles {
            let offset = self.position - center;
            let d = offset.length();
            if d >= radius {
                continue;
            }

            let away = if d > 0.0 {
                offset / d
            } else if self.velocity.length_squared() > 0.0 {
                -self.velocity.normalize()
            } else {
                Vec3::Y
            };

            self.apply_force(away * params.avoidance_strength * (1.0 - d / radius));
        }
    }

    /// Weighted sum of separation, alignment and cohesion.
    pub fn flocking_force(&self, neighbors: &[Agent], params: &SteeringParams) -> Vec3 {
        self.separation(neighbors, params) * params.separation_weight
            + self.alignment(neighbors, params) * params.alignment_weight
            + self.cohesion(neighbors, params) * params.cohesion_weight
    }

    // Apply all flocking behaviors
    pub fn flock(&mut self, neighbors: &[Agent], params: &SteeringParams) {
        let force = self.flocking_force(neighbors, params);
        self.apply_force(force);
    }

    /// Integrates one tick and reflects off the bounds.
    pub fn update(&mut self, bounds: &Bounds, params: &SteeringParams) {
        self.integrate(BoundaryPolicy::Reflect, bounds, params);
    }

    /// Integrates one tick and wraps around the bounds.
    pub fn update_with_wrap(&mut self, bounds: &Bounds, params: &SteeringParams) {
        self.integrate(BoundaryPolicy::Wrap, bounds, params);
    }

    pub fn integrate(&mut self, policy: BoundaryPolicy, bounds: &Bounds, params: &SteeringParams) {
        self.velocity = limit(self.velocity + self.acceleration, params.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;

        policy.apply(bounds, &mut self.position, &mut self.velocity);
    }

    // Reynolds: steering = desired - velocity, with desired at max speed
    fn steer(&self, direction: Vec3, params: &SteeringParams) -> Vec3 {
        let length = direction.length();
        let desired = if length > 0.0 {
            direction * (params.max_speed / length)
        } else {
            Vec3::ZERO
        };

        limit(desired - self.velocity, params.max_force)
    }
}

// Clamp a vector's magnitude to `max`
fn limit(v: Vec3, max: f32) -> Vec3 {
    let length = v.length();
    if length > max {
        v * (max / length)
    } else {
        v
    }
}
