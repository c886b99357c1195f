/*
 * Camera Module
 *
 * This module defines the Camera struct that handles orbiting, zooming and
 * panning of the viewer. The world is projected orthographically: points are
 * rotated into view space (yaw about +y, then pitch about +x) and the view
 * plane is scaled and translated onto the window.
 */

use nannou::prelude::*;

pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub is_orbiting: bool,
    pub last_cursor_pos: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 10.0,
            yaw: 0.5,
            pitch: 0.35,
            min_zoom: 1.0,
            max_zoom: 80.0,
            is_orbiting: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    // Rotate a world point into view space; z grows away from the viewer
    pub fn to_view(&self, point: Vec3) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        let x = point.x * cos_yaw - point.z * sin_yaw;
        let z = point.x * sin_yaw + point.z * cos_yaw;
        let y = point.y * cos_pitch - z * sin_pitch;
        let z = point.y * sin_pitch + z * cos_pitch;
        vec3(x, y, z)
    }

    // Inverse of `to_view`
    pub fn from_view(&self, point: Vec3) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        let y = point.y * cos_pitch + point.z * sin_pitch;
        let z = -point.y * sin_pitch + point.z * cos_pitch;
        let x = point.x * cos_yaw + z * sin_yaw;
        let z = -point.x * sin_yaw + z * cos_yaw;
        vec3(x, y, z)
    }

    // Convert a point from world space to screen space
    pub fn world_to_screen(&self, point: Vec3, window_rect: Rect) -> Vec2 {
        let view = self.to_view(point);
        (vec2(view.x, view.y) - self.position) * self.zoom + window_rect.xy()
    }

    /// Convert a screen point to the world point on the view plane through the origin.
    pub fn screen_to_world(&self, point: Vec2, window_rect: Rect) -> Vec3 {
        let view = (point - window_rect.xy()) / self.zoom + self.position;
        self.from_view(vec3(view.x, view.y, 0.0))
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: Vec2, cursor_position: Vec2, window_rect: Rect) {
        let zoom_factor = 1.0 + scroll_delta.y * 0.1;

        // Keep the view-plane point under the cursor fixed while zooming
        let before = (cursor_position - window_rect.xy()) / self.zoom;
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
        let after = (cursor_position - window_rect.xy()) / self.zoom;

        self.position += before - after;
    }

    // Start orbiting the camera
    pub fn start_orbit(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_orbiting = true;
    }

    // Update yaw and pitch while orbiting
    pub fn orbit(&mut self, position: Vec2) {
        if self.is_orbiting {
            let delta = position - self.last_cursor_pos;
            if delta.length_squared() > 0.0 {
                self.yaw += delta.x * 0.01;
                self.pitch = (self.pitch - delta.y * 0.01).clamp(-1.5, 1.5);
                self.last_cursor_pos = position;
            }
        }
    }

    // End orbiting
    pub fn end_orbit(&mut self) {
        self.is_orbiting = false;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_rotation_is_invertible() {
        let camera = Camera::new();
        let point = vec3(3.0, -7.5, 12.0);
        let back = camera.from_view(camera.to_view(point));
        assert!((back - point).length() < 1.0e-4);
    }

    #[test]
    fn screen_mapping_lands_on_view_plane() {
        let mut camera = Camera::new();
        camera.position = vec2(1.0, -2.0);
        let rect = Rect::from_w_h(800.0, 600.0);
        let cursor = vec2(120.0, -45.0);

        let world = camera.screen_to_world(cursor, rect);
        assert!(camera.to_view(world).z.abs() < 1.0e-4);
        assert!((camera.world_to_screen(world, rect) - cursor).length() < 1.0e-2);
    }

    #[test]
    fn zoom_keeps_cursor_anchor_and_clamps() {
        let mut camera = Camera::new();
        let rect = Rect::from_w_h(800.0, 600.0);
        let cursor = vec2(200.0, 100.0);
        let anchor = camera.screen_to_world(cursor, rect);

        camera.zoom(vec2(0.0, 2.0), cursor, rect);
        assert!((camera.world_to_screen(anchor, rect) - cursor).length() < 1.0e-2);

        for _ in 0..100 {
            camera.zoom(vec2(0.0, 5.0), cursor, rect);
        }
        assert_eq!(camera.zoom, camera.max_zoom);
    }
}
