/*
 * Orientation Module
 *
 * Orientation is not simulation state: the presentation layer derives it
 * from each agent's velocity every frame. A zero velocity has no direction,
 * so the tracker keeps the last valid orientation for that agent instead.
 */

use nannou::prelude::*;

use crate::agent::Agent;

/// Unit direction of travel, or `None` for a (near) zero velocity.
pub fn heading(velocity: Vec3) -> Option<Vec3> {
    let length_squared = velocity.length_squared();
    if length_squared > 1.0e-12 && length_squared.is_finite() {
        Some(velocity / length_squared.sqrt())
    } else {
        None
    }
}

/// Yaw around +y and pitch above the xz-plane, in radians.
///
/// Yaw is measured from +x towards +z, so a heading of +x is yaw 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn from_velocity(velocity: Vec3) -> Option<Self> {
        heading(velocity).map(|h| Self {
            yaw: h.z.atan2(h.x),
            pitch: h.y.clamp(-1.0, 1.0).asin(),
        })
    }

    /// Unit vector this orientation faces.
    pub fn direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        vec3(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
    }
}

/// Last valid orientation of every agent, in flock order.
#[derive(Debug, Default)]
pub struct OrientationTracker {
    orientations: Vec<Orientation>,
}

impl OrientationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refreshes from the current agents. Agents at rest keep their previous
    /// orientation; newly seen agents at rest start at the default.
    pub fn update(&mut self, agents: &[Agent]) {
        self.orientations.resize(agents.len(), Orientation::default());
        for (orientation, agent) in self.orientations.iter_mut().zip(agents) {
            if let Some(next) = Orientation::from_velocity(agent.velocity()) {
                *orientation = next;
            }
        }
    }

    /// Drops all held orientations, e.g. after the population is recreated.
    pub fn reset(&mut self) {
        self.orientations.clear();
    }

    pub fn get(&self, index: usize) -> Option<Orientation> {
        self.orientations.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Orientation] {
        &self.orientations
    }
}
