use oxiflap_engine::{FrameTime, GameSession};

use crate::{PolicyParams, SensorReading};

/// Decides whether to jump this frame.
///
/// Pure over its inputs. Jumps only when all three hold:
///
/// 1. the cooldown has elapsed since the last jump,
/// 2. the next pipe is within `trigger_distance`, and
/// 3. the bird sits below the safe band of the gap - it has fallen at
///    least `top_margin + jump_height` below the top edge, or is within
///    `bottom_margin` of the bottom edge.
///
/// The rule is monotone in the evolved genes: lowering `jump_height` can
/// only add jumps, raising `jump_cooldown_ms` can only remove them.
#[must_use]
pub fn decide(reading: &SensorReading, params: &PolicyParams, since_last_jump_ms: f32) -> bool {
    if since_last_jump_ms < params.jump_cooldown_ms {
        return false;
    }
    if reading.distance_to_pipe > params.trigger_distance {
        return false;
    }
    reading.offset_to_gap_top >= params.top_margin + params.jump_height
        || reading.offset_to_gap_bottom <= params.bottom_margin
}

/// Scripted pilot for a single-bird session.
///
/// Wraps a fixed parameter tuple with the cooldown clock [`decide`]
/// expects, and flaps the session whenever the rule fires.
#[derive(Debug, Clone)]
pub struct Autopilot {
    params: PolicyParams,
    since_last_jump_ms: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(PolicyParams::AUTOPILOT)
    }
}

impl Autopilot {
    #[must_use]
    pub fn new(params: PolicyParams) -> Self {
        Self {
            params,
            // Allow an immediate first jump.
            since_last_jump_ms: params.jump_cooldown_ms,
        }
    }

    #[must_use]
    pub fn params(&self) -> &PolicyParams {
        &self.params
    }

    /// Runs one frame of piloting: sense, decide, flap.
    ///
    /// Call before the session's own `update` so the decision uses the
    /// state the bird can currently see.
    pub fn pilot(&mut self, session: &mut GameSession, frame: &FrameTime) {
        self.since_last_jump_ms += frame.delta_ms();
        let reading = SensorReading::observe(
            session.bird(),
            session.config().bird_x,
            session.course(),
        );
        if decide(&reading, &self.params, self.since_last_jump_ms) {
            session.flap();
            self.since_last_jump_ms = 0.0;
        }
    }
}
