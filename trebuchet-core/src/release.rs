use crate::engine::ArmState;

/// When to let go of the projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseCondition {
    /// Once the arm has swept past this angle (radians) in its direction of motion
    AtAngle(f64),
    /// After this many integrator steps
    AfterSteps(u64),
    /// After this much simulated time, seconds
    AfterTime(f64),
}

impl ReleaseCondition {
    pub fn at_angle_degrees(degrees: f64) -> Self {
        Self::AtAngle(degrees.to_radians())
    }

    /// `previous` is the arm state one step before `state` (the same state
    /// before the first step). `steps` counts integrator steps taken since
    /// the start, `elapsed` is `steps * dt`.
    pub fn is_met(
        &self,
        previous: &ArmState,
        state: &ArmState,
        steps: u64,
        elapsed: f64,
    ) -> bool {
        match *self {
            Self::AtAngle(angle) => {
                (previous.theta > angle && state.theta <= angle)
                    || (previous.theta < angle && state.theta >= angle)
            }
            Self::AfterSteps(n) => steps >= n,
            Self::AfterTime(t) => elapsed >= t,
        }
    }
}
