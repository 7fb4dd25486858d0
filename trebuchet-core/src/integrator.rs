use crate::engine::{ArmState, Trebuchet};

/// Advance the arm by one time step using semi-implicit Euler integration.
///
/// Step index 0 is the initial condition and leaves the state untouched.
pub fn step(trebuchet: &Trebuchet, state: &mut ArmState, index: u64) {
    if index == 0 {
        return;
    }
    let dt = trebuchet.config().time_step;

    // Semi-implicit Euler: omega += alpha*dt, then theta += omega*dt
    let d_omega = trebuchet.angular_acceleration(state.theta);
    state.theta_dot += d_omega * dt;
    state.theta += state.theta_dot * dt;
}
