use std::env;

// Runtime knobs for the command line tools (not physical parameters).

/// Points sampled along the flight path when printing or drawing it
pub fn trajectory_samples() -> usize {
    env::var("TREBUCHET_TRAJECTORY_SAMPLES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(100)
}

/// Integrator steps per frame in the viewer at speed 1.0
pub fn steps_per_frame() -> usize {
    env::var("TREBUCHET_STEPS_PER_FRAME")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(10)
}

pub const WINDOW_TITLE: &str = "Trebuchet";
pub const WINDOW_SIZE: [f32; 2] = [1024.0, 720.0];
