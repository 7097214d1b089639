//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per frame only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod intro;
pub mod score;
pub mod spawn;
pub mod state;
pub mod swipe;
pub mod tick;

pub use collision::{BlockCollision, block_hits_lead, block_in_band, orb_in_hit_region};
pub use intro::{IntroStatus, intro_step};
pub use score::{OrbHit, apply_orb_hit};
pub use spawn::{random_color, spawn_block_wave, spawn_orb_wave};
pub use state::{Block, Collector, GameEvent, GameState, Orb, Rgb};
pub use swipe::{SwipeOutcome, apply_swipe};
pub use tick::{TickInput, tick};
