/*
 * Flock 3D
 *
 * Opens the viewer: a flock of boids in a bounded box following separation,
 * alignment and cohesion, attracted by the pointer and steering around
 * obstacles placed with the mouse. Set RUST_LOG to control log output and
 * FLOCK_SEED for a reproducible starting population.
 */

use flock3d::app;

fn main() {
    env_logger::init();

    nannou::app(app::model).update(app::update).run();
}
