/*
 * Renderer Module
 *
 * This module draws the viewer frame: the bounds as a wireframe box, every
 * agent as a triangle pointing along its derived orientation, obstacles,
 * the pointer target and the optional debug overlay.
 *
 * Agents are drawn far to near and shaded by depth so the projection keeps
 * a sense of volume.
 */

use log::warn;
use nannou::prelude::*;

use crate::app::Model;
use crate::bounds::Bounds;
use crate::camera::Camera;
use crate::orientation::Orientation;
use crate::AGENT_SIZE;

// Pairs of corner indices forming the 12 edges of a box
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let camera = &model.camera;
    let bounds = model.flock.bounds();

    draw_bounds(&draw, camera, bounds, window_rect);

    // Depth of the farthest possible point, used to normalize shading
    let depth_range = (bounds.size().length() * 0.5).max(f32::EPSILON);
    let center_depth = camera.to_view(bounds.center()).z;

    let agents = model.flock.agents();
    let mut order: Vec<(usize, f32)> = agents
        .iter()
        .enumerate()
        .map(|(i, agent)| (i, camera.to_view(agent.position()).z))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let size = AGENT_SIZE * camera.zoom;
    let points = [
        pt2(size, 0.0),
        pt2(-size, size / 2.0),
        pt2(-size, -size / 2.0),
    ];

    for (i, depth) in order {
        let agent = &agents[i];
        let screen_pos = camera.world_to_screen(agent.position(), window_rect);
        let orientation = model.orientations.get(i).unwrap_or_default();
        let (angle, foreshortening) = screen_heading(camera, orientation);

        let t = ((depth - center_depth) / depth_range * 0.5 + 0.5).clamp(0.0, 1.0);
        let brightness = 1.0 - 0.65 * t;

        draw.polygon()
            .points(points.iter().map(|p| pt2(p.x * foreshortening, p.y)))
            .xy(screen_pos)
            .rotate(angle)
            .color(rgba(brightness, brightness, brightness, 1.0));
    }

    let avoidance_radius = model.flock.params().avoidance_radius * camera.zoom;
    for &obstacle in &model.obstacles {
        let screen_pos = camera.world_to_screen(obstacle, window_rect);
        draw.ellipse()
            .xy(screen_pos)
            .radius(avoidance_radius)
            .no_fill()
            .stroke(rgba(0.9, 0.3, 0.3, 0.6))
            .stroke_weight(1.0);
        draw.ellipse()
            .xy(screen_pos)
            .radius(4.0)
            .color(rgba(0.9, 0.3, 0.3, 1.0));
    }

    if let Some(target) = model.target {
        draw.ellipse()
            .xy(camera.world_to_screen(target, window_rect))
            .radius(5.0)
            .color(rgba(1.0, 0.85, 0.2, 1.0));
    }

    if model.params.show_debug {
        draw_debug_info(&draw, model, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!("Failed to draw frame: {:?}", err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!("Failed to draw UI: {:?}", err);
    }
}

// Screen-space angle of an orientation and how much it is foreshortened
fn screen_heading(camera: &Camera, orientation: Orientation) -> (f32, f32) {
    let view = camera.to_view(orientation.direction());
    let planar = vec2(view.x, view.y);
    let length = planar.length();
    if length <= 1.0e-4 {
        return (0.0, 0.3);
    }
    (planar.y.atan2(planar.x), length.max(0.3))
}

fn draw_bounds(draw: &Draw, camera: &Camera, bounds: &Bounds, window_rect: Rect) {
    let (min, max) = (bounds.min(), bounds.max());
    let corners: Vec<Vec2> = (0..8)
        .map(|i| {
            let corner = vec3(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
            camera.world_to_screen(corner, window_rect)
        })
        .collect();

    for (a, b) in BOX_EDGES {
        draw.line()
            .start(corners[a])
            .end(corners[b])
            .weight(1.0)
            .color(rgba(0.3, 0.3, 0.3, 1.0));
    }
}

// Draw debug information on the screen
fn draw_debug_info(draw: &Draw, model: &Model, window_rect: Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = model.debug_info.lines();

    let text_x = window_rect.right() - 120.0;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, text_y - i as f32 * line_height)
            .color(WHITE)
            .font_size(14);
    }
}
