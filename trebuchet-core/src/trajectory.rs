//! Post-release flight path, in a ground frame whose origin lies directly
//! below the release point.

use crate::launch::LaunchResult;
use glam::DVec2;

/// Bounding box of a flight path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Ballistic path of a released projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub velocity: DVec2,
    pub release_height: f64,
    pub flight_time: f64,
    pub gravity: f64,
}

impl Trajectory {
    pub fn from_launch(launch: &LaunchResult) -> Self {
        Self {
            velocity: launch.release_velocity,
            release_height: launch.release_height,
            flight_time: launch.flight_time,
            gravity: launch.gravity,
        }
    }

    pub fn position_at(&self, t: f64) -> DVec2 {
        DVec2::new(
            self.velocity.x * t,
            self.release_height + self.velocity.y * t - 0.5 * self.gravity * t * t,
        )
    }

    /// Landing point, on the ground
    pub fn landing_point(&self) -> DVec2 {
        DVec2::new(self.velocity.x * self.flight_time, 0.0)
    }

    /// `samples + 1` evenly spaced points from release to landing
    pub fn sample(&self, samples: usize) -> Vec<DVec2> {
        let count = samples.max(1);
        (0..=count)
            .map(|i| {
                if i == count {
                    // Pin the last point to the ground
                    self.landing_point()
                } else {
                    self.position_at(i as f64 * self.flight_time / count as f64)
                }
            })
            .collect()
    }

    pub fn extents(&self) -> Extents {
        let reach = self.velocity.x * self.flight_time;
        let (x_min, x_max) = if reach >= 0.0 { (0.0, reach) } else { (reach, 0.0) };

        let vy = self.velocity.y;
        let y_max = if vy > 0.0 {
            vy * vy / (2.0 * self.gravity) + self.release_height
        } else {
            self.release_height
        };

        Extents {
            x_min,
            x_max,
            y_min: 0.0,
            y_max,
        }
    }
}
