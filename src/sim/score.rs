//! Orb catch resolution: value accumulation and stack growth

use glam::Vec2;

use super::state::Collector;
use crate::consts::{MAX_TOKENS, TOKEN_SPACING};

/// Outcome of catching one orb
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbHit {
    /// Collector value after the catch
    pub total: u32,
    /// Token appended to the stack, if there was room
    pub grew: Option<Vec2>,
}

/// Add the orb's value to the collector and grow the stack by one trailing
/// token while it is below `MAX_TOKENS`.
pub fn apply_orb_hit(collector: &mut Collector, tokens: &mut Vec<Vec2>, orb_value: u32) -> OrbHit {
    let grew = match tokens.last().copied() {
        Some(last) if tokens.len() < MAX_TOKENS => {
            let token = Vec2::new(last.x, last.y + TOKEN_SPACING);
            tokens.push(token);
            Some(token)
        }
        Some(_) => None,
        None => panic!("token stack is empty; cannot resolve an orb catch"),
    };

    collector.value = collector.value.saturating_add(orb_value);

    OrbHit {
        total: collector.value,
        grew,
    }
}
