//! Swipe-to-move input mapping
//!
//! Two states: uncalibrated (`last_touch_x == 0`) and tracking. The first
//! sample only records a reference; later samples move the whole stack by
//! the scaled distance from that reference, unless the move would push the
//! lead token past a viewport edge.

use super::state::GameState;
use crate::consts::CIRCLE_RADIUS;

/// What a single touch sample did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeOutcome {
    /// First sample: the reference was recorded, nothing moved
    Calibrated,
    /// Collector and tokens moved by `dx` (negative is left)
    Moved { dx: f32 },
    /// The move would cross a viewport edge; nothing changed
    Rejected,
}

/// Apply one horizontal touch sample (page x, unscaled) to the game state.
pub fn apply_swipe(state: &mut GameState, touch_x: f32) -> SwipeOutcome {
    if state.last_touch_x == 0.0 {
        state.last_touch_x = touch_x;
        return SwipeOutcome::Calibrated;
    }

    let scale = state.viewport.scale;
    let distance = (state.last_touch_x - touch_x).abs() * scale;
    let lead_x = state.lead().x;

    let dx = if touch_x < state.last_touch_x {
        if lead_x - distance < CIRCLE_RADIUS {
            return SwipeOutcome::Rejected;
        }
        -distance
    } else {
        if lead_x + distance > state.viewport.width * scale - CIRCLE_RADIUS {
            return SwipeOutcome::Rejected;
        }
        distance
    };

    state.shift_x(dx);
    state.last_touch_x = touch_x;
    log::trace!("Swipe to {} moved stack by {}", touch_x, dx);
    SwipeOutcome::Moved { dx }
}
