/*
 * Simulation Parameters Module
 *
 * This module defines the tunable constants of the flock. SteeringParams
 * holds the per-agent steering constants and is shared by every agent in a
 * flock; SimulationParams wraps it together with the population, the
 * boundary volume and the boundary policy, and is what the UI edits.
 * Snapshot-based change detection tells the viewer whether a change needs
 * the population recreated or can be pushed into the running flock.
 */

use nannou::prelude::*;

use crate::bounds::{BoundaryPolicy, Bounds};
use crate::error::ConfigError;

/// Steering constants shared by all agents of a flock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    pub max_speed: f32,
    pub max_force: f32,
    pub neighbor_dist: f32,
    pub desired_separation: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub avoidance_radius: f32,
    pub avoidance_strength: f32,
    pub seek_weight: f32,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            max_speed: 0.5,
            max_force: 0.13,
            neighbor_dist: 5.0,
            desired_separation: 4.0,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            avoidance_radius: 6.0,
            avoidance_strength: 0.3,
            seek_weight: 1.0,
        }
    }
}

impl SteeringParams {
    /// Rejects negative or non-finite constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("neighbor_dist", self.neighbor_dist),
            ("desired_separation", self.desired_separation),
            ("avoidance_radius", self.avoidance_radius),
            ("avoidance_strength", self.avoidance_strength),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParam { name, value });
            }
        }

        let weights = [
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("seek_weight", self.seek_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParam { name, value });
            }
        }

        Ok(())
    }
}

// Parameters for the simulation that can be adjusted via UI
pub struct SimulationParams {
    pub num_agents: usize,
    pub half_extents: Vec3,
    pub policy: BoundaryPolicy,
    pub seed: Option<u64>,
    pub steering: SteeringParams,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Clone, PartialEq)]
struct ParamSnapshot {
    num_agents: usize,
    half_extents: Vec3,
    policy: BoundaryPolicy,
    steering: SteeringParams,
    show_debug: bool,
    pause_simulation: bool,
}

/// What changed since the last snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    /// Population size changed; agents must be recreated.
    pub population: bool,
    /// Bounds extents changed; can be applied between ticks.
    pub bounds: bool,
    /// Steering constants or boundary policy changed.
    pub steering: bool,
    pub any: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_agents: 200,
            half_extents: Vec3::splat(25.0),
            policy: BoundaryPolicy::Wrap,
            seed: None,
            steering: SteeringParams::default(),
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    /// The bounds described by the current extents.
    pub fn bounds(&self) -> Result<Bounds, ConfigError> {
        Bounds::centered(self.half_extents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;
        self.steering.validate()
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Compare against the last snapshot; nothing has changed if there is none
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = &self.previous_values else {
            return ParamChanges::default();
        };

        let population = self.num_agents != prev.num_agents;
        let bounds = self.half_extents != prev.half_extents;
        let steering = self.steering != prev.steering || self.policy != prev.policy;

        ParamChanges {
            population,
            bounds,
            steering,
            any: self.snapshot() != *prev,
        }
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            num_agents: self.num_agents,
            half_extents: self.half_extents,
            policy: self.policy,
            steering: self.steering,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_agents_range() -> std::ops::RangeInclusive<usize> {
        0..=2000
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.05..=3.0
    }

    pub fn get_max_force_range() -> std::ops::RangeInclusive<f32> {
        0.01..=1.0
    }

    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        0.5..=20.0
    }

    pub fn get_extent_range() -> std::ops::RangeInclusive<f32> {
        5.0..=100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let steering = SteeringParams::default();
        assert_eq!(steering.max_speed, 0.5);
        assert_eq!(steering.max_force, 0.13);
        assert_eq!(steering.neighbor_dist, 5.0);
        assert_eq!(steering.desired_separation, 4.0);
        assert_eq!(steering.separation_weight, 1.5);
        assert_eq!(steering.alignment_weight, 1.0);
        assert_eq!(steering.cohesion_weight, 1.0);
        assert!(SimulationParams::default().validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_constants() {
        let steering = SteeringParams {
            max_force: -0.1,
            ..SteeringParams::default()
        };
        assert_eq!(
            steering.validate(),
            Err(ConfigError::InvalidParam { name: "max_force", value: -0.1 })
        );

        let steering = SteeringParams {
            cohesion_weight: f32::INFINITY,
            ..SteeringParams::default()
        };
        assert!(steering.validate().is_err());

        let params = SimulationParams {
            half_extents: vec3(10.0, 0.0, 10.0),
            ..SimulationParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn change_detection_classifies_edits() {
        let mut params = SimulationParams::default();
        assert_eq!(params.detect_changes(), ParamChanges::default());

        params.take_snapshot();
        assert!(!params.detect_changes().any);

        params.num_agents += 1;
        params.steering.cohesion_weight = 0.5;
        let changes = params.detect_changes();
        assert!(changes.population);
        assert!(changes.steering);
        assert!(!changes.bounds);
        assert!(changes.any);

        params.take_snapshot();
        params.show_debug = true;
        let changes = params.detect_changes();
        assert!(changes.any);
        assert!(!changes.population && !changes.bounds && !changes.steering);
    }
}
