//! Stack Drop - a falling-blocks arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring, swipe input)
//! - `schedule`: Elapsed-time driven interval timers
//! - `session`: One play session: intro, fixed-step loop, spawn timers, input queue
//! - `render`: Frame composition against an abstract canvas
//! - `settings`: Viewport and timing configuration

pub mod render;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, SessionPhase};
pub use settings::{Settings, SettingsError, Viewport};

/// Game configuration constants
///
/// Step sizes and collision bands are tuned for a 60 Hz frame; changing the
/// frame rate without rescaling them changes how the game feels.
pub mod consts {
    /// Frames per second the simulation constants are tuned for
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Maximum frames simulated per `Session::advance` call
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock delta accepted per `Session::advance` call (ms)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
    /// Touch samples held between frames before the oldest are dropped
    pub const MAX_PENDING_TOUCHES: usize = 64;

    /// Token (circle) geometry, in unscaled units
    pub const CIRCLE_RADIUS: f32 = 10.0;
    pub const CIRCLE_DIAMETER: f32 = CIRCLE_RADIUS * 2.0;

    /// Collector value at session start (also the initial stack height)
    pub const START_VALUE: u32 = 4;
    /// Token stack bounds
    pub const MAX_TOKENS: usize = 10;
    /// Vertical gap between stacked tokens
    pub const TOKEN_SPACING: f32 = 40.0;

    /// Blocks
    pub const BLOCKS_PER_WAVE: usize = 5;
    pub const BLOCK_MARGIN: f32 = 2.0;
    pub const BLOCK_STEP: f32 = 10.0;

    /// Orbs
    pub const LANE_COUNT: usize = 4;
    pub const MAX_ORBS_PER_WAVE: u32 = 4;
    pub const MAX_ORB_VALUE: u32 = 5;
    pub const ORB_SPAWN_Y: f32 = -40.0;
    pub const ORB_STEP: f32 = 10.0;
    /// Orb hit region around the collector: [c - BEHIND, c + AHEAD] on both axes
    pub const ORB_HIT_BEHIND: f32 = 10.0;
    pub const ORB_HIT_AHEAD: f32 = 40.0;

    /// Intro animation: per-frame lift of the collector and tokens (scaled)
    pub const INTRO_COLLECTOR_LIFT: f32 = 6.0;
    pub const INTRO_TOKEN_LIFT: f32 = 5.0;
    pub const INTRO_TOKEN_LIFT_FALLOFF: f32 = 2.0;
    /// How far above the resting line the lead token travels before play starts
    pub const INTRO_RISE: f32 = 50.0;

    /// Label and orb colours
    pub const ORB_COLOR: (u8, u8, u8) = (255, 204, 0);
    pub const BLOCK_LABEL_SIZE: f32 = 22.0;
    pub const ORB_LABEL_SIZE: f32 = 14.0;
}
