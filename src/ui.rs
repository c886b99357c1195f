/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::bounds::BoundaryPolicy;
use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

/// Result of one UI frame.
pub struct UiResponse {
    pub reset_requested: bool,
    pub clear_obstacles: bool,
    pub changes: ParamChanges,
}

// Update the UI and report what the user asked for
pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> UiResponse {
    let mut reset_requested = false;
    let mut clear_obstacles = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_agents, SimulationParams::get_num_agents_range())
                        .text("Number of Agents"),
                );
                if ui.button("Reset Agents").clicked() {
                    reset_requested = true;
                }
            });

            ui.collapsing("Steering", |ui| {
                let steering = &mut params.steering;
                ui.add(egui::Slider::new(&mut steering.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut steering.max_force, SimulationParams::get_max_force_range()).text("Max Force"));
                ui.add(egui::Slider::new(&mut steering.separation_weight, SimulationParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut steering.alignment_weight, SimulationParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut steering.cohesion_weight, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut steering.desired_separation, SimulationParams::get_radius_range()).text("Separation Distance"));
                ui.add(egui::Slider::new(&mut steering.neighbor_dist, SimulationParams::get_radius_range()).text("Neighbor Distance"));
                ui.add(egui::Slider::new(&mut steering.seek_weight, SimulationParams::get_weight_range()).text("Pointer Seek Weight"));
                ui.add(egui::Slider::new(&mut steering.avoidance_radius, SimulationParams::get_radius_range()).text("Obstacle Radius"));
            });

            ui.collapsing("Bounds", |ui| {
                ui.horizontal(|ui| {
                    ui.radio_value(&mut params.policy, BoundaryPolicy::Wrap, BoundaryPolicy::Wrap.label());
                    ui.radio_value(&mut params.policy, BoundaryPolicy::Reflect, BoundaryPolicy::Reflect.label());
                });
                ui.add(egui::Slider::new(&mut params.half_extents.x, SimulationParams::get_extent_range()).text("Half Width"));
                ui.add(egui::Slider::new(&mut params.half_extents.y, SimulationParams::get_extent_range()).text("Half Height"));
                ui.add(egui::Slider::new(&mut params.half_extents.z, SimulationParams::get_extent_range()).text("Half Depth"));
            });

            ui.collapsing("Controls", |ui| {
                ui.label("Attract: hold left mouse button");
                ui.label("Obstacle: right click");
                ui.label("Orbit: drag with middle mouse button");
                ui.label("Zoom: mouse wheel");
                ui.label("Pause: space, Reset: R");
                if ui.button("Clear Obstacles").clicked() {
                    clear_obstacles = true;
                }
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Ticks: {}", debug_info.ticks));

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    UiResponse {
        reset_requested,
        clear_obstacles,
        changes: params.detect_changes(),
    }
}
