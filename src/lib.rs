/*
 * Flock 3D - Module Definitions
 *
 * The simulation core (agent, flock, bounds, params, orientation) is plain
 * numeric state with no rendering concerns. The viewer modules (app, camera,
 * renderer, ui, debug) consume it once per frame through nannou.
 */

// Re-export key components for easier access
pub use agent::Agent;
pub use bounds::{BoundaryPolicy, Bounds};
pub use error::ConfigError;
pub use flock::{Flock, TickInput};
pub use orientation::{Orientation, OrientationTracker};
pub use params::{SimulationParams, SteeringParams};

// Simulation core
pub mod agent;
pub mod bounds;
pub mod error;
pub mod flock;
pub mod orientation;
pub mod params;

// Viewer
pub mod app;
pub mod camera;
pub mod debug;
pub mod renderer;
pub mod ui;

// Length of an agent's drawn triangle, in world units
pub const AGENT_SIZE: f32 = 0.6;
