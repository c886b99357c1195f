/*
 * Application Module
 *
 * This module defines the nannou application model for the viewer: it owns
 * the flock, steps it once per frame, and translates user input into the
 * flock's tick input (pointer target and obstacle list) and configuration.
 */

use log::{info, warn};
use nannou::prelude::*;
use nannou::winit::event::{MouseScrollDelta, TouchPhase};
use nannou_egui::Egui;
use std::env;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::flock::{Flock, TickInput};
use crate::orientation::OrientationTracker;
use crate::params::{ParamChanges, SimulationParams};
use crate::renderer;
use crate::ui;

// Screen distance within which a right click removes an existing obstacle
const OBSTACLE_PICK_RADIUS: f32 = 12.0;

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub orientations: OrientationTracker,
    pub mouse_position: Vec2,
    pub attracting: bool,
    pub target: Option<Vec3>,
    pub obstacles: Vec<Vec3>,
}

// Seed from the FLOCK_SEED environment variable, if set
fn rng_seed() -> Option<u64> {
    env::var("FLOCK_SEED").ok().and_then(|s| s.parse::<u64>().ok())
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Flock 3D")
        .size(1280, 800)
        .view(renderer::view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_wheel(mouse_wheel)
        .key_pressed(key_pressed)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to create window");

    let window = app.window(window_id).expect("Window closed during setup");
    let egui = Egui::from_window(&window);

    let mut params = SimulationParams::default();
    params.seed = rng_seed();
    let flock = Flock::from_params(&params).expect("Default simulation parameters are valid");
    info!(
        "Starting viewer with {} agents (seed: {:?})",
        flock.len(),
        params.seed
    );

    let mut orientations = OrientationTracker::new();
    orientations.update(flock.agents());

    Model {
        flock,
        params,
        egui,
        debug_info: DebugInfo::default(),
        camera: Camera::new(),
        orientations,
        mouse_position: Vec2::ZERO,
        attracting: false,
        target: None,
        obstacles: Vec::new(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let response = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);
    apply_param_changes(model, response.changes, response.reset_requested);
    if response.clear_obstacles {
        model.obstacles.clear();
    }

    // Pointer target lives on the view plane through the origin
    model.target = if model.attracting {
        Some(model.camera.screen_to_world(model.mouse_position, app.window_rect()))
    } else {
        None
    };

    if !model.params.pause_simulation {
        model.flock.step_with(TickInput {
            target: model.target,
            obstacles: &model.obstacles,
        });
    }

    model.orientations.update(model.flock.agents());
    model.debug_info.record_flock(&model.flock);
    model.debug_info.obstacles = model.obstacles.len();
    model.debug_info.target_active = model.target.is_some();
}

// Push edited parameters into the flock between ticks
fn apply_param_changes(model: &mut Model, changes: ParamChanges, reset: bool) {
    if changes.steering {
        if let Err(err) = model.flock.set_params(model.params.steering) {
            warn!("Rejected steering parameters: {}", err);
            model.params.steering = *model.flock.params();
        }
        model.flock.set_policy(model.params.policy);
    }

    if changes.bounds {
        reconfigure_bounds(model);
    }

    if changes.population || reset {
        reset_flock(model);
    }
}

fn reconfigure_bounds(model: &mut Model) {
    let half = model.params.half_extents;
    if let Err(err) = model.flock.reconfigure_bounds(-half, half) {
        warn!("Rejected bounds: {}", err);
        let current = model.flock.bounds();
        model.params.half_extents = (current.max() - current.min()) * 0.5;
    }
}

fn reset_flock(model: &mut Model) {
    model.flock.resize(model.params.num_agents);
    model.orientations.reset();
    model.orientations.update(model.flock.agents());
    info!("Flock reset with {} agents", model.flock.len());
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.camera.orbit(pos);
    model.mouse_position = pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    // Clicks on the UI are not meant for the scene
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    match button {
        MouseButton::Left => model.attracting = true,
        MouseButton::Middle => model.camera.start_orbit(model.mouse_position),
        MouseButton::Right => toggle_obstacle(model, app.window_rect()),
        _ => {}
    }
}

// Remove the obstacle under the cursor, or place a new one there
fn toggle_obstacle(model: &mut Model, window_rect: Rect) {
    let camera = &model.camera;
    let cursor = model.mouse_position;
    let picked = model.obstacles.iter().position(|&obstacle| {
        camera.world_to_screen(obstacle, window_rect).distance(cursor) < OBSTACLE_PICK_RADIUS
    });

    match picked {
        Some(index) => {
            model.obstacles.swap_remove(index);
        }
        None => {
            let point = camera.screen_to_world(cursor, window_rect);
            model.obstacles.push(point);
        }
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    match button {
        MouseButton::Left => model.attracting = false,
        MouseButton::Middle => model.camera.end_orbit(),
        _ => {}
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    let window_rect = app.window_rect();
    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            model.camera.zoom(vec2(x, y), model.mouse_position, window_rect);
        }
        MouseScrollDelta::PixelDelta(pos) => {
            model.camera.zoom(vec2(pos.x as f32, pos.y as f32) * 0.01, model.mouse_position, window_rect);
        }
    }
}

// Keyboard shortcuts
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => model.params.pause_simulation = !model.params.pause_simulation,
        Key::R => reset_flock(model),
        _ => {}
    }
}

// Stretch the bounds horizontally to the window aspect ratio
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let aspect = size.x / size.y;
    model.params.half_extents.x = model.params.half_extents.y * aspect;
    reconfigure_bounds(model);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
