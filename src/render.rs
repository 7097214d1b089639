//! Frame composition
//!
//! The host supplies the drawing primitives through `Canvas`; this module
//! only decides what gets drawn, where, and in which order:
//! background, blocks with labels, falling orbs with labels, the collector
//! label, then the token stack. Nothing is ever read back.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{GameState, Rgb};

/// Drawing primitives provided by the host
pub trait Canvas {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgb);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    /// A square block with its top-left corner at `pos`
    fn fill_block(&mut self, pos: Vec2, size: f32, color: Rgb);
    fn text(&mut self, pos: Vec2, size: f32, color: Rgb, text: &str);
}

/// Draw one frame of the game
pub fn draw_frame<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let vp = &state.viewport;
    let scale = vp.scale;

    canvas.fill_rect(Vec2::ZERO, Vec2::new(vp.width, vp.height), Rgb::BLACK);

    for block in &state.blocks {
        canvas.fill_block(block.pos, block.size, block.color);
        let center = block.pos + Vec2::splat(block.size / 2.0);
        canvas.text(
            center + Vec2::new(-10.0, 10.0),
            BLOCK_LABEL_SIZE * scale,
            Rgb::WHITE,
            &block.value.to_string(),
        );
    }

    for orb in &state.orbs {
        canvas.fill_circle(orb.pos, CIRCLE_RADIUS * scale, Rgb::GOLD);
        canvas.text(
            orb.pos + Vec2::new(-8.0, -30.0),
            ORB_LABEL_SIZE * scale,
            Rgb::WHITE,
            &orb.value.to_string(),
        );
    }

    canvas.text(
        state.collector.pos,
        ORB_LABEL_SIZE * scale,
        Rgb::WHITE,
        &state.collector.value.to_string(),
    );

    for token in &state.tokens {
        canvas.fill_circle(*token, CIRCLE_RADIUS * scale, Rgb::GOLD);
    }
}

/// Canvas that only counts draw calls; useful for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingCanvas {
    pub calls: u64,
}

impl Canvas for CountingCanvas {
    fn fill_rect(&mut self, _pos: Vec2, _size: Vec2, _color: Rgb) {
        self.calls += 1;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Rgb) {
        self.calls += 1;
    }

    fn fill_block(&mut self, _pos: Vec2, _size: f32, _color: Rgb) {
        self.calls += 1;
    }

    fn text(&mut self, _pos: Vec2, _size: f32, _color: Rgb, _text: &str) {
        self.calls += 1;
    }
}
