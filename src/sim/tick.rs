//! Per-frame simulation tick
//!
//! Advances falling blocks and orbs one fixed step, resolves collisions and
//! flips the game into the blocked state when a block reaches the stack.

use super::collision::{block_hits_lead, orb_in_hit_region};
use super::score::apply_orb_hit;
use super::state::{GameEvent, GameState};
use super::swipe::apply_swipe;
use crate::consts::*;

/// Input gathered since the previous tick, applied before anything moves
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touch x samples in arrival order
    pub touches: Vec<f32>,
}

/// Advance the game state by one frame.
///
/// A blocked game is frozen: nothing moves and input is ignored.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.blocked {
        return events;
    }

    for &x in &input.touches {
        apply_swipe(state, x);
    }

    state.time_ticks += 1;

    update_blocks(state, &mut events);
    if !state.blocked {
        update_orbs(state, &mut events);
    }

    events
}

/// Block pass: despawn below the viewport, detect the stack, fall.
///
/// Once a block blocks the game, every block after it in the pass stays put;
/// blocks already advanced this frame keep their new position.
fn update_blocks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let lead = state.lead();
    let height = state.viewport.height;
    let margin = BLOCK_MARGIN * state.viewport.scale;
    let mode = state.block_collision;
    let mut blocked = state.blocked;

    state.blocks.retain_mut(|block| {
        if block.pos.y > height {
            return false;
        }

        if block_hits_lead(block, lead, margin, mode) {
            blocked = true;
            return true;
        }

        if !blocked {
            block.pos.y += BLOCK_STEP;
        }
        true
    });

    if blocked && !state.blocked {
        state.blocked = true;
        log::info!(
            "Blocked at tick {} with value {} and {} tokens",
            state.time_ticks,
            state.collector.value,
            state.tokens.len()
        );
        events.push(GameEvent::Blocked);
    }
}

/// Orb pass: despawn below the viewport, catch at the collector, fall.
fn update_orbs(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let height = state.viewport.height;
    let collector = &mut state.collector;
    let tokens = &mut state.tokens;

    state.orbs.retain_mut(|orb| {
        if orb.pos.y >= height {
            return false;
        }

        if orb_in_hit_region(orb.pos, collector.pos) {
            let hit = apply_orb_hit(collector, tokens, orb.value);
            events.push(GameEvent::OrbCollected {
                value: orb.value,
                total: hit.total,
            });
            if hit.grew.is_some() {
                log::debug!("Stack grew to {}", tokens.len());
                events.push(GameEvent::StackGrew { len: tokens.len() });
            }
            return false;
        }

        orb.pos.y += ORB_STEP;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Viewport;
    use crate::sim::collision::BlockCollision;
    use crate::sim::spawn::{spawn_block_wave, spawn_orb_wave};
    use crate::sim::state::{Block, Orb, Rgb};
    use glam::Vec2;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(12345, Viewport::new(400.0, 600.0, 1.0))
    }

    fn orb_at(pos: Vec2, value: u32) -> Orb {
        Orb { pos, value }
    }

    #[test]
    fn test_orb_catch_scenario() {
        let mut state = state();
        state.tokens.truncate(1);
        let lead = state.lead();
        state.orbs.push(orb_at(state.collector.pos, 3));

        let events = tick(&mut state, &TickInput::default());

        assert!(state.orbs.is_empty());
        assert_eq!(state.collector.value, 7);
        assert_eq!(state.tokens.len(), 2);
        assert_eq!(state.tokens[1], Vec2::new(lead.x, lead.y + 40.0));
        assert_eq!(
            events,
            vec![
                GameEvent::OrbCollected { value: 3, total: 7 },
                GameEvent::StackGrew { len: 2 },
            ]
        );
    }

    #[test]
    fn test_orb_catch_with_full_stack() {
        let mut state = state();
        let lead = state.lead();
        state.tokens = vec![lead; MAX_TOKENS];
        state.orbs.push(orb_at(state.collector.pos, 5));

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.collector.value, 9);
        assert_eq!(state.tokens.len(), MAX_TOKENS);
        assert_eq!(events, vec![GameEvent::OrbCollected { value: 5, total: 9 }]);
    }

    #[test]
    fn test_orb_falls_and_despawns() {
        let mut state = state();
        state.orbs.push(orb_at(Vec2::new(10.0, 580.0), 1));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.orbs[0].pos.y, 590.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.orbs[0].pos.y, 600.0);
        tick(&mut state, &TickInput::default());
        assert!(state.orbs.is_empty());
        assert_eq!(state.collector.value, 4);
    }

    #[test]
    fn test_block_reaching_stack_blocks() {
        let mut state = state();
        let lead = state.lead();
        // Bottom edge one step above the band
        state.blocks.push(Block {
            pos: Vec2::new(300.0, lead.y - 21.0 - 10.0 - 76.0),
            size: 76.0,
            value: 2,
            color: Rgb::WHITE,
        });

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert!(!state.blocked);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Blocked]);
        assert!(state.blocked);
        let y = state.blocks[0].pos.y;

        // Frozen afterwards, and spawning stops
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert_eq!(state.blocks[0].pos.y, y);
        assert_eq!(spawn_orb_wave(&mut state), 0);
    }

    #[test]
    fn test_strict_mode_lets_blocks_pass_beside_the_stack() {
        let mut state = state().with_block_collision(BlockCollision::Strict);
        let lead = state.lead();
        state.blocks.push(Block {
            pos: Vec2::new(322.0, lead.y - 60.0),
            size: 76.0,
            value: 2,
            color: Rgb::WHITE,
        });

        tick(&mut state, &TickInput::default());
        assert!(!state.blocked);
        assert_eq!(state.blocks[0].pos.y, lead.y - 50.0);
    }

    #[test]
    fn test_blocks_after_collision_stay_put_in_same_pass() {
        let mut state = state();
        let lead = state.lead();
        let hit = Block {
            pos: Vec2::new(2.0, lead.y - 76.0),
            size: 76.0,
            value: 1,
            color: Rgb::WHITE,
        };
        let above = Block {
            pos: Vec2::new(82.0, -80.0),
            ..hit.clone()
        };
        let earlier = Block {
            pos: Vec2::new(162.0, -200.0),
            ..hit.clone()
        };
        state.blocks = vec![earlier, hit, above];

        tick(&mut state, &TickInput::default());

        assert!(state.blocked);
        assert_eq!(state.blocks[0].pos.y, -190.0);
        assert_eq!(state.blocks[1].pos.y, lead.y - 76.0);
        assert_eq!(state.blocks[2].pos.y, -80.0);
    }

    #[test]
    fn test_orbs_do_not_move_once_blocked_this_frame() {
        let mut state = state();
        let lead = state.lead();
        state.blocks.push(Block {
            pos: Vec2::new(2.0, lead.y - 76.0),
            size: 76.0,
            value: 1,
            color: Rgb::WHITE,
        });
        state.orbs.push(orb_at(Vec2::new(10.0, 0.0), 1));

        tick(&mut state, &TickInput::default());
        assert!(state.blocked);
        assert_eq!(state.orbs[0].pos.y, 0.0);
    }

    #[test]
    fn test_touches_apply_before_collisions() {
        let mut state = state();
        state.tokens.truncate(1);
        let collector = state.collector.pos;
        // Orb sits 30 to the left of the catch region
        state.orbs.push(orb_at(Vec2::new(collector.x - 40.0, collector.y), 2));

        let input = TickInput {
            touches: vec![200.0, 170.0],
        };
        tick(&mut state, &input);

        assert!(state.orbs.is_empty());
        assert_eq!(state.collector.value, 6);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = state();
            for frame in 0..600 {
                if frame % 90 == 0 {
                    spawn_orb_wave(&mut state);
                }
                if frame % 120 == 0 {
                    spawn_block_wave(&mut state);
                }
                tick(&mut state, &TickInput::default());
            }
            state
        };

        let a = run();
        let b = run();
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.blocked, b.blocked);
        assert_eq!(a.collector, b.collector);
        assert_eq!(a.blocks, b.blocks);
        assert_eq!(a.orbs, b.orbs);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Tick(Vec<f32>),
        Blocks,
        Orbs,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => prop::collection::vec(1.0f32..400.0, 0..3).prop_map(Op::Tick),
            1 => Just(Op::Blocks),
            2 => Just(Op::Orbs),
        ]
    }

    fn apply(state: &mut GameState, op: &Op) {
        match op {
            Op::Tick(touches) => {
                tick(
                    state,
                    &TickInput {
                        touches: touches.clone(),
                    },
                );
            }
            Op::Blocks => {
                spawn_block_wave(state);
            }
            Op::Orbs => {
                spawn_orb_wave(state);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_stack_and_value_are_monotone(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..300)) {
            let mut state = GameState::new(seed, Viewport::new(400.0, 600.0, 1.0));
            let mut len = state.tokens.len();
            let mut value = state.collector.value;
            let mut blocked = state.blocked;

            for op in &ops {
                apply(&mut state, op);
                prop_assert!(state.tokens.len() >= 1 && state.tokens.len() <= MAX_TOKENS);
                prop_assert!(state.tokens.len() >= len);
                prop_assert!(state.collector.value >= value);
                prop_assert!(state.blocked || !blocked);
                len = state.tokens.len();
                value = state.collector.value;
                blocked = state.blocked;
            }
        }

        #[test]
        fn prop_blocked_state_is_frozen(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..200), touches in prop::collection::vec(1.0f32..400.0, 0..4)) {
            let mut state = GameState::new(seed, Viewport::new(400.0, 600.0, 1.0));
            for op in &ops {
                apply(&mut state, op);
            }
            state.blocked = true;
            let before = state.clone();

            let events = tick(&mut state, &TickInput { touches });
            spawn_block_wave(&mut state);
            spawn_orb_wave(&mut state);

            prop_assert!(events.is_empty());
            prop_assert_eq!(&state.blocks, &before.blocks);
            prop_assert_eq!(&state.orbs, &before.orbs);
            prop_assert_eq!(&state.tokens, &before.tokens);
            prop_assert_eq!(&state.collector, &before.collector);
        }

        #[test]
        fn prop_free_blocks_fall_by_fixed_step(column in 1usize..5, start in -400.0f32..0.0) {
            // Lead sits in column 0, so strict mode never blocks a block elsewhere
            let mut state = GameState::new(1, Viewport::new(400.0, 600.0, 1.0))
                .with_block_collision(BlockCollision::Strict);
            state.shift_x(40.0 - state.lead().x);
            state.blocks.push(Block {
                pos: Vec2::new(2.0 + 80.0 * column as f32, start),
                size: 76.0,
                value: 1,
                color: Rgb::WHITE,
            });

            let mut y = start;
            loop {
                tick(&mut state, &TickInput::default());
                prop_assert!(!state.blocked);
                if y > 600.0 {
                    prop_assert!(state.blocks.is_empty());
                    break;
                }
                prop_assert_eq!(state.blocks[0].pos.y, y + BLOCK_STEP);
                y += BLOCK_STEP;
            }
        }
    }
}
