//! Game state and core simulation types
//!
//! One `GameState` per session. Everything the engine reads or writes lives
//! here; there are no module-level singletons.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::BlockCollision;
use crate::consts::*;
use crate::settings::Viewport;

/// Display colour of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GOLD: Rgb = Rgb::new(ORB_COLOR.0, ORB_COLOR.1, ORB_COLOR.2);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A numbered block falling from the top of the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length (blocks are square)
    pub size: f32,
    pub value: u32,
    pub color: Rgb,
}

impl Block {
    /// Y coordinate of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }
}

/// A falling point-orb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub pos: Vec2,
    pub value: u32,
}

/// The collection point that catches orbs and carries the running total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collector {
    pub pos: Vec2,
    pub value: u32,
}

/// Things that happened during a tick or spawn, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A wave of blocks entered above the viewport
    BlockWave,
    /// A wave of `count` orbs entered above the viewport
    OrbWave { count: u32 },
    /// An orb was caught; `total` is the collector value afterwards
    OrbCollected { value: u32, total: u32 },
    /// The token stack gained a token
    StackGrew { len: usize },
    /// A block reached the stack; the game is over
    Blocked,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn randomness, seeded from `seed`
    pub rng: Pcg32,
    /// Viewport the session was laid out for
    pub viewport: Viewport,
    /// Terminal flag, one-way
    pub blocked: bool,
    /// Horizontal rule for block hits
    pub block_collision: BlockCollision,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub collector: Collector,
    /// Orb spawn x positions
    pub lanes: [f32; LANE_COUNT],
    /// Token stack, index 0 is the lead
    pub tokens: Vec<Vec2>,
    pub blocks: Vec<Block>,
    pub orbs: Vec<Orb>,
    /// Reference x of the swipe in progress, 0 when uncalibrated
    pub last_touch_x: f32,
}

impl GameState {
    /// Create the session-start layout for the given viewport
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let rest = Vec2::new(viewport.half_width(), viewport.rest_y());
        let collector = Collector {
            pos: Vec2::new(
                viewport.half_width() - 3.0 * viewport.scale,
                viewport.rest_y() - 20.0,
            ),
            value: START_VALUE,
        };

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            blocked: false,
            block_collision: BlockCollision::default(),
            time_ticks: 0,
            collector,
            lanes: lane_positions(&viewport),
            tokens: vec![rest; START_VALUE as usize],
            blocks: Vec::new(),
            orbs: Vec::new(),
            last_touch_x: 0.0,
        }
    }

    /// Use the given horizontal rule for block hits
    pub fn with_block_collision(mut self, mode: BlockCollision) -> Self {
        self.block_collision = mode;
        self
    }

    /// The lead token every collision and swipe bound is measured against
    #[inline]
    pub fn lead(&self) -> Vec2 {
        assert!(
            !self.tokens.is_empty(),
            "token stack is empty; GameState must be built with GameState::new"
        );
        self.tokens[0]
    }

    /// Shift the collector and the whole stack horizontally
    pub fn shift_x(&mut self, dx: f32) {
        self.collector.pos.x += dx;
        for token in &mut self.tokens {
            token.x += dx;
        }
    }
}

/// Four fixed orb lanes derived from the viewport width
pub fn lane_positions(viewport: &Viewport) -> [f32; LANE_COUNT] {
    let half = viewport.half_width();
    let quarter = half / 2.0;
    [quarter / 2.0, half, half + quarter, viewport.width - 50.0]
}
