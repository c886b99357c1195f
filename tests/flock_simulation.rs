use nannou::prelude::*;

use flock3d::{Agent, BoundaryPolicy, Bounds, Flock, SteeringParams, TickInput};

const EPS: f32 = 1.0e-4;

fn assert_invariants(flock: &Flock) {
    let max_speed = flock.params().max_speed;
    for agent in flock.agents() {
        assert!(agent.speed() <= max_speed + EPS, "speed {} too high", agent.speed());
        assert!(
            flock.bounds().contains(agent.position()),
            "{:?} escaped {:?}",
            agent.position(),
            flock.bounds()
        );
        assert_eq!(agent.acceleration(), Vec3::ZERO);
    }
}

#[test]
fn two_agents_stay_inside_for_a_thousand_ticks() {
    for policy in [BoundaryPolicy::Reflect, BoundaryPolicy::Wrap] {
        let bounds = Bounds::centered(Vec3::splat(25.0)).unwrap();
        let mut flock = Flock::with_seed(2, bounds, SteeringParams::default(), policy, 2024).unwrap();
        for _ in 0..1000 {
            flock.step();
            assert_invariants(&flock);
        }
        assert_eq!(flock.ticks(), 1000);
    }
}

#[test]
fn crowded_flock_with_inputs_keeps_invariants() {
    let obstacles = [vec3(0.0, 0.0, 0.0), vec3(20.0, -20.0, 5.0)];
    for policy in [BoundaryPolicy::Reflect, BoundaryPolicy::Wrap] {
        let bounds = Bounds::centered(vec3(10.0, 6.0, 8.0)).unwrap();
        let mut flock = Flock::with_seed(120, bounds, SteeringParams::default(), policy, 5).unwrap();
        for tick in 0..300 {
            let target = if tick % 100 < 50 {
                Some(vec3(40.0, 40.0, -40.0))
            } else {
                None
            };
            flock.step_with(TickInput {
                target,
                obstacles: &obstacles,
            });
            assert_invariants(&flock);
        }
    }
}

#[test]
fn shrinking_bounds_are_enforced_on_next_tick() {
    for policy in [BoundaryPolicy::Reflect, BoundaryPolicy::Wrap] {
        let mut flock =
            Flock::with_seed(50, Bounds::default(), SteeringParams::default(), policy, 77).unwrap();
        for _ in 0..10 {
            flock.step();
        }
        flock
            .reconfigure_bounds(vec3(-3.0, -3.0, -3.0), vec3(3.0, 3.0, 3.0))
            .unwrap();
        flock.step();
        assert_invariants(&flock);
    }
}

#[test]
fn close_pair_separates() {
    let params = SteeringParams {
        alignment_weight: 0.0,
        cohesion_weight: 0.0,
        ..SteeringParams::default()
    };
    let agents = vec![
        Agent::new(vec3(0.0, 0.0, 0.0), Vec3::ZERO),
        Agent::new(vec3(1.0, 0.0, 0.0), Vec3::ZERO),
    ];

    let separation = agents[0].separation(&agents, &params);
    assert!(separation.x < 0.0);
    assert!(separation.length() <= params.max_force + EPS);

    let mut flock =
        Flock::from_agents(agents, Bounds::default(), params, BoundaryPolicy::Reflect).unwrap();
    for _ in 0..20 {
        flock.step();
    }
    let gap = flock.agents()[0].position().distance(flock.agents()[1].position());
    assert!(gap > 1.0);
}

#[test]
fn pausing_is_just_not_stepping() {
    let mut running =
        Flock::with_seed(40, Bounds::default(), SteeringParams::default(), BoundaryPolicy::Wrap, 3).unwrap();
    let mut paused =
        Flock::with_seed(40, Bounds::default(), SteeringParams::default(), BoundaryPolicy::Wrap, 3).unwrap();

    for _ in 0..30 {
        running.step();
    }
    for _ in 0..10 {
        paused.step();
    }
    // A pause of any length leaves no trace in the state
    for _ in 0..20 {
        paused.step();
    }
    assert_eq!(running.agents(), paused.agents());
}
