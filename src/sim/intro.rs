//! Session-start intro: the initial tokens rise from the resting line and
//! fan out before play begins.

use super::state::GameState;
use crate::consts::*;

/// Whether the intro still has frames to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStatus {
    Running,
    Done,
}

/// Advance the intro by one frame.
///
/// While the lead token is below `rest_y - 50*scale`, the collector lifts by
/// `6*scale` and token k by `(5 - 2k)*scale`, so the stack spreads out as it
/// rises. Returns `Done` once the threshold is reached, without moving.
pub fn intro_step(state: &mut GameState) -> IntroStatus {
    let scale = state.viewport.scale;
    let target = state.viewport.rest_y() - INTRO_RISE * scale;

    if state.lead().y <= target {
        return IntroStatus::Done;
    }

    state.collector.pos.y -= INTRO_COLLECTOR_LIFT * scale;
    for (k, token) in state.tokens.iter_mut().enumerate() {
        token.y -= INTRO_TOKEN_LIFT * scale - INTRO_TOKEN_LIFT_FALLOFF * scale * k as f32;
    }

    IntroStatus::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Viewport;

    #[test]
    fn test_intro_runs_to_threshold() {
        let mut state = GameState::new(1, Viewport::new(400.0, 600.0, 1.0));
        let start_collector = state.collector.pos.y;

        let mut frames = 0;
        while intro_step(&mut state) == IntroStatus::Running {
            frames += 1;
            assert!(frames < 100, "intro never finished");
        }

        // Lead rises 5 per frame from 400 to 350
        assert_eq!(frames, 10);
        assert_eq!(state.lead().y, 350.0);
        assert_eq!(state.collector.pos.y, start_collector - 60.0);
        // Token k moved (5 - 2k) per frame
        assert_eq!(state.tokens[1].y, 400.0 - 30.0);
        assert_eq!(state.tokens[2].y, 400.0 - 10.0);
        assert_eq!(state.tokens[3].y, 400.0 + 10.0);
    }

    #[test]
    fn test_done_is_stable() {
        let mut state = GameState::new(1, Viewport::new(400.0, 600.0, 1.0));
        while intro_step(&mut state) == IntroStatus::Running {}
        let tokens = state.tokens.clone();

        assert_eq!(intro_step(&mut state), IntroStatus::Done);
        assert_eq!(state.tokens, tokens);
    }
}
