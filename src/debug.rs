/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation statistics to be displayed in the UI.
 */

use std::time::Duration;

use crate::flock::Flock;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks: u64,
    pub agents: usize,
    pub mean_speed: f32,
    pub obstacles: usize,
    pub target_active: bool,
}

impl DebugInfo {
    /// Copies the per-tick statistics out of the flock.
    pub fn record_flock(&mut self, flock: &Flock) {
        self.ticks = flock.ticks();
        self.agents = flock.len();
        self.mean_speed = flock.mean_speed();
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Agents: {}", self.agents),
            format!("Ticks: {}", self.ticks),
            format!("Mean speed: {:.3}", self.mean_speed),
            format!("Obstacles: {}", self.obstacles),
            format!("Target: {}", if self.target_active { "on" } else { "off" }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{BoundaryPolicy, Bounds};
    use crate::params::SteeringParams;

    #[test]
    fn records_flock_statistics() {
        let mut flock = Flock::with_seed(
            12,
            Bounds::default(),
            SteeringParams::default(),
            BoundaryPolicy::Wrap,
            9,
        )
        .unwrap();
        flock.step();

        let mut info = DebugInfo::default();
        info.record_flock(&flock);
        assert_eq!(info.agents, 12);
        assert_eq!(info.ticks, 1);
        assert!(info.mean_speed > 0.0 && info.mean_speed <= 0.5 + 1.0e-5);
        assert!(info.lines().iter().any(|line| line == "Agents: 12"));
    }
}
