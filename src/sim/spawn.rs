//! Wave spawning for blocks and orbs
//!
//! Both spawners are no-ops once the game is blocked.

use glam::Vec2;
use rand::Rng;

use super::state::{Block, GameState, Orb, Rgb};
use crate::consts::*;

/// Spawn one row of blocks above the viewport, one per column.
///
/// Returns the number of blocks added (0 when blocked).
pub fn spawn_block_wave(state: &mut GameState) -> usize {
    if state.blocked {
        return 0;
    }

    let margin = BLOCK_MARGIN * state.viewport.scale;
    let column = state.viewport.width / BLOCKS_PER_WAVE as f32;
    // Values stay below what the collector holds; degenerate low totals pin to 1
    let max_value = state.collector.value.saturating_sub(1).max(1);

    for i in 0..BLOCKS_PER_WAVE {
        let value = state.rng.random_range(1..=max_value);
        let color = random_color(&mut state.rng);
        state.blocks.push(Block {
            pos: Vec2::new(margin + column * i as f32, -column),
            size: column - margin * 2.0,
            value,
            color,
        });
    }

    log::debug!(
        "Block wave at tick {} (values 1..={})",
        state.time_ticks,
        max_value
    );
    BLOCKS_PER_WAVE
}

/// Spawn 1 to 4 orbs, one per lane from the left, above the viewport.
///
/// Returns the number of orbs added (0 when blocked).
pub fn spawn_orb_wave(state: &mut GameState) -> usize {
    if state.blocked {
        return 0;
    }

    let count = state.rng.random_range(1..=MAX_ORBS_PER_WAVE) as usize;
    for lane in state.lanes.iter().take(count) {
        let value = state.rng.random_range(1..=MAX_ORB_VALUE);
        state.orbs.push(Orb {
            pos: Vec2::new(*lane, ORB_SPAWN_Y),
            value,
        });
    }

    log::debug!("Orb wave at tick {}: {} orbs", state.time_ticks, count);
    count
}

/// A random saturated, bright colour for block display
pub fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    let hue = rng.random_range(0.0..360.0f32);
    let saturation = rng.random_range(0.55..=0.95f32);
    let value = rng.random_range(0.75..=1.0f32);
    hsv_to_rgb(hue, saturation, value)
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let c = value * saturation;
    let h = (hue / 60.0) % 6.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}
