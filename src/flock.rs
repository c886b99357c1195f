/*
 * Flock Module
 *
 * The Flock owns the agents, the shared bounds and the steering constants,
 * and advances the whole population one tick at a time.
 *
 * A tick runs in two passes:
 * 1. Every agent's steering force is computed against the population as it
 *    stood at the start of the tick (brute force, all pairs)
 * 2. Forces are applied and every agent integrates and resolves the bounds
 *
 * No agent ever observes a sibling that has already moved this tick.
 */

use log::debug;
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::agent::Agent;
use crate::bounds::{BoundaryPolicy, Bounds};
use crate::error::ConfigError;
use crate::params::{SimulationParams, SteeringParams};

/// External inputs for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput<'a> {
    /// Pointer target every agent seeks, weighted by `seek_weight`.
    pub target: Option<Vec3>,
    /// Obstacle centers to steer away from.
    pub obstacles: &'a [Vec3],
}

pub struct Flock {
    agents: Vec<Agent>,
    bounds: Bounds,
    params: SteeringParams,
    policy: BoundaryPolicy,
    rng: StdRng,
    ticks: u64,
    // Reused between ticks to avoid reallocating the force buffer
    forces: Vec<Vec3>,
}

impl Flock {
    /// Creates `count` random agents inside `bounds`, seeded from entropy.
    pub fn new(
        count: usize,
        bounds: Bounds,
        params: SteeringParams,
        policy: BoundaryPolicy,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(count, bounds, params, policy, StdRng::from_entropy())
    }

    /// Same as `new` but reproducible.
    pub fn with_seed(
        count: usize,
        bounds: Bounds,
        params: SteeringParams,
        policy: BoundaryPolicy,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(count, bounds, params, policy, StdRng::seed_from_u64(seed))
    }

    /// Builds a flock from the viewer-facing parameters.
    pub fn from_params(params: &SimulationParams) -> Result<Self, ConfigError> {
        let bounds = params.bounds()?;
        match params.seed {
            Some(seed) => Self::with_seed(params.num_agents, bounds, params.steering, params.policy, seed),
            None => Self::new(params.num_agents, bounds, params.steering, params.policy),
        }
    }

    /// Wraps explicitly placed agents. Agents outside `bounds` are brought
    /// in by the first boundary check.
    pub fn from_agents(
        agents: Vec<Agent>,
        bounds: Bounds,
        params: SteeringParams,
        policy: BoundaryPolicy,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            forces: Vec::with_capacity(agents.len()),
            agents,
            bounds,
            params,
            policy,
            rng: StdRng::from_entropy(),
            ticks: 0,
        })
    }

    fn with_rng(
        count: usize,
        bounds: Bounds,
        params: SteeringParams,
        policy: BoundaryPolicy,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        let agents = spawn(count, &bounds, params.max_speed, &mut rng);
        debug!(
            "Created flock of {} agents in {:?}..{:?} ({} policy)",
            count,
            bounds.min(),
            bounds.max(),
            policy.label()
        );

        Ok(Self {
            forces: Vec::with_capacity(count),
            agents,
            bounds,
            params,
            policy,
            rng,
            ticks: 0,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Number of completed ticks since construction or the last resize.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn mean_speed(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.agents.iter().map(Agent::speed).sum::<f32>() / self.agents.len() as f32
    }

    /// Advances one tick with no pointer target and no obstacles.
    pub fn step(&mut self) {
        self.step_with(TickInput::default());
    }

    /// Advances one tick.
    pub fn step_with(&mut self, input: TickInput<'_>) {
        if self.agents.is_empty() {
            return;
        }

        let params = self.params;

        // First pass: all-pairs forces against the pre-tick state
        self.forces.clear();
        self.forces.extend(self.agents.iter().map(|agent| {
            let mut force = agent.flocking_force(&self.agents, &params);
            if let Some(target) = input.target {
                force += agent.seek(target, &params) * params.seek_weight;
            }
            force
        }));

        // Second pass: apply and integrate
        for (agent, &force) in self.agents.iter_mut().zip(&self.forces) {
            agent.apply_force(force);
            if !input.obstacles.is_empty() {
                agent.avoid_obstacles(input.obstacles, &params);
            }
            agent.integrate(self.policy, &self.bounds, &params);
        }

        self.ticks += 1;
    }

    /// Replaces the shared bounds between ticks. Agents already outside the
    /// new box are not moved here; the next boundary check brings them in.
    pub fn reconfigure_bounds(&mut self, min: Vec3, max: Vec3) -> Result<(), ConfigError> {
        self.bounds = Bounds::new(min, max)?;
        debug!("Bounds reconfigured to {:?}..{:?}", min, max);
        Ok(())
    }

    /// Replaces the steering constants without recreating agents.
    pub fn set_params(&mut self, params: SteeringParams) -> Result<(), ConfigError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn set_policy(&mut self, policy: BoundaryPolicy) {
        self.policy = policy;
    }

    /// Recreates the population with `count` fresh random agents.
    pub fn resize(&mut self, count: usize) {
        self.agents = spawn(count, &self.bounds, self.params.max_speed, &mut self.rng);
        self.forces = Vec::with_capacity(count);
        self.ticks = 0;
        debug!("Flock recreated with {} agents", count);
    }
}

fn spawn<R: Rng + ?Sized>(count: usize, bounds: &Bounds, max_speed: f32, rng: &mut R) -> Vec<Agent> {
    (0..count)
        .map(|_| Agent::random(bounds, max_speed, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(count: usize, policy: BoundaryPolicy) -> Flock {
        Flock::with_seed(count, Bounds::default(), SteeringParams::default(), policy, 42).unwrap()
    }

    #[test]
    fn empty_flock_step_is_noop() {
        let mut flock = seeded(0, BoundaryPolicy::Wrap);
        flock.step();
        assert!(flock.is_empty());
        assert_eq!(flock.ticks(), 0);
        assert_eq!(flock.mean_speed(), 0.0);
    }

    #[test]
    fn same_seed_gives_same_trajectory() {
        let mut a = seeded(30, BoundaryPolicy::Reflect);
        let mut b = seeded(30, BoundaryPolicy::Reflect);
        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.agents(), b.agents());
    }

    #[test]
    fn forces_use_pre_tick_state() {
        let params = SteeringParams::default();
        let bounds = Bounds::default();
        let agents = vec![
            Agent::new(vec3(0.0, 0.0, 0.0), vec3(0.2, 0.0, 0.0)),
            Agent::new(vec3(1.0, 0.0, 0.0), vec3(0.0, 0.2, 0.0)),
            Agent::new(vec3(0.0, 2.0, 0.0), vec3(0.0, 0.0, 0.2)),
        ];

        let mut expected = agents.clone();
        let forces: Vec<Vec3> = agents
            .iter()
            .map(|agent| agent.flocking_force(&agents, &params))
            .collect();
        for (agent, force) in expected.iter_mut().zip(forces) {
            agent.apply_force(force);
            agent.update_with_wrap(&bounds, &params);
        }

        let mut flock = Flock::from_agents(agents, bounds, params, BoundaryPolicy::Wrap).unwrap();
        flock.step();
        assert_eq!(flock.agents(), expected.as_slice());
    }

    #[test]
    fn target_attracts_the_flock() {
        let params = SteeringParams {
            separation_weight: 0.0,
            alignment_weight: 0.0,
            cohesion_weight: 0.0,
            ..SteeringParams::default()
        };
        let agents = vec![Agent::new(vec3(-10.0, 0.0, 0.0), Vec3::ZERO)];
        let mut flock =
            Flock::from_agents(agents, Bounds::default(), params, BoundaryPolicy::Reflect).unwrap();
        flock.step_with(TickInput {
            target: Some(vec3(10.0, 0.0, 0.0)),
            obstacles: &[],
        });
        assert!(flock.agents()[0].velocity().x > 0.0);
    }

    #[test]
    fn obstacles_apply_without_target() {
        let params = SteeringParams {
            separation_weight: 0.0,
            alignment_weight: 0.0,
            cohesion_weight: 0.0,
            ..SteeringParams::default()
        };
        let agents = vec![Agent::new(vec3(1.0, 0.0, 0.0), Vec3::ZERO)];
        let mut flock =
            Flock::from_agents(agents, Bounds::default(), params, BoundaryPolicy::Reflect).unwrap();
        let obstacles = [Vec3::ZERO];
        flock.step_with(TickInput {
            target: None,
            obstacles: &obstacles,
        });
        assert!(flock.agents()[0].velocity().x > 0.0);
    }

    #[test]
    fn bounds_reconfiguration_is_lazy_and_validated() {
        let mut flock = seeded(20, BoundaryPolicy::Reflect);
        assert!(flock
            .reconfigure_bounds(vec3(0.0, -1.0, -1.0), vec3(0.0, 1.0, 1.0))
            .is_err());
        assert_eq!(*flock.bounds(), Bounds::default());

        let before = flock.agents().to_vec();
        flock
            .reconfigure_bounds(Vec3::splat(-2.0), Vec3::splat(2.0))
            .unwrap();
        assert_eq!(flock.agents(), before.as_slice());

        flock.step();
        for agent in flock.agents() {
            assert!(flock.bounds().contains(agent.position()));
        }
    }

    #[test]
    fn resize_recreates_population() {
        let mut flock = seeded(10, BoundaryPolicy::Wrap);
        flock.step();
        flock.resize(25);
        assert_eq!(flock.len(), 25);
        assert_eq!(flock.ticks(), 0);
        for agent in flock.agents() {
            assert!(flock.bounds().contains(agent.position()));
        }
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = SteeringParams {
            max_speed: -1.0,
            ..SteeringParams::default()
        };
        assert!(Flock::with_seed(5, Bounds::default(), params, BoundaryPolicy::Wrap, 1).is_err());

        let mut flock = seeded(5, BoundaryPolicy::Wrap);
        assert!(flock.set_params(params).is_err());
        assert_eq!(*flock.params(), SteeringParams::default());
    }
}
