//! Collision predicates for falling entities
//!
//! Pure functions over positions; the tick decides what a hit means.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Block;
use crate::consts::*;

/// How a block that reached the stack's band is tested horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockCollision {
    /// Entering the vertical band is enough. A whole wave shares one row and
    /// spans the viewport, so the stack can never slip between blocks.
    #[default]
    Lenient,
    /// The lead token must also sit within the block's column
    Strict,
}

impl BlockCollision {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            BlockCollision::Strict
        } else {
            BlockCollision::Lenient
        }
    }
}

/// Whether the block's bottom edge lies in the band around the lead token:
/// `[lead.y - (diameter + 1), lead.y + diameter]`
#[inline]
pub fn block_in_band(block: &Block, lead: Vec2) -> bool {
    let bottom = block.bottom();
    bottom >= lead.y - (CIRCLE_DIAMETER + 1.0) && bottom <= lead.y + CIRCLE_DIAMETER
}

/// Whether the block collides with the lead token
///
/// `margin` is the scaled gap left between adjacent blocks; in strict mode it
/// widens the block back to its full column.
pub fn block_hits_lead(block: &Block, lead: Vec2, margin: f32, mode: BlockCollision) -> bool {
    if !block_in_band(block, lead) {
        return false;
    }
    match mode {
        BlockCollision::Lenient => true,
        BlockCollision::Strict => {
            lead.x >= block.pos.x - margin && lead.x <= block.pos.x + block.size + margin
        }
    }
}

/// Whether an orb is inside the collector's catch region
///
/// The region is `[c.x - 10, c.x + 40] x [c.y - 10, c.y + 40]`, edges included.
#[inline]
pub fn orb_in_hit_region(orb: Vec2, collector: Vec2) -> bool {
    orb.x >= collector.x - ORB_HIT_BEHIND
        && orb.x <= collector.x + ORB_HIT_AHEAD
        && orb.y >= collector.y - ORB_HIT_BEHIND
        && orb.y <= collector.y + ORB_HIT_AHEAD
}
