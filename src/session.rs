//! One play session
//!
//! Owns the game state, the spawn timers and the queue of touch samples.
//! The host calls `advance` with wall-clock time from its frame callback and
//! `push_touch` from its pointer-move handler; the session turns both into
//! fixed frames:
//! 1. drain queued touches (discarded during the intro)
//! 2. intro step, or simulation tick once the intro is done
//! 3. spawn waves whose timers came due

use std::collections::VecDeque;

use crate::consts::{MAX_FRAME_DELTA_MS, MAX_PENDING_TOUCHES, MAX_SUBSTEPS};
use crate::render::{Canvas, draw_frame};
use crate::schedule::{Fire, SpawnTimers};
use crate::settings::{Settings, SettingsError};
use crate::sim::collision::BlockCollision;
use crate::sim::{
    GameEvent, GameState, IntroStatus, TickInput, intro_step, spawn_block_wave, spawn_orb_wave,
    tick,
};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Initial tokens are rising into place; no spawning, no input
    Intro,
    /// Main loop running
    Playing,
    /// Timers cancelled and input detached; terminal
    Stopped,
}

/// A running game session
pub struct Session {
    settings: Settings,
    state: GameState,
    phase: SessionPhase,
    /// Wall time not yet consumed by a frame (ms)
    accumulator: f64,
    frame_ms: f64,
    /// Created when the intro finishes
    timers: Option<SpawnTimers>,
    touches: VecDeque<f32>,
    intro_frames: u32,
}

impl Session {
    /// Start a session; the settings are validated first
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;

        let state = GameState::new(seed, settings.viewport)
            .with_block_collision(BlockCollision::from_strict(settings.strict_block_collision));
        let frame_ms = settings.frame_ms();

        log::info!(
            "Session started: seed {}, viewport {}x{} @{}",
            seed,
            settings.viewport.width,
            settings.viewport.height,
            settings.viewport.scale
        );

        Ok(Self {
            settings,
            state,
            phase: SessionPhase::Intro,
            accumulator: 0.0,
            frame_ms,
            timers: None,
            touches: VecDeque::with_capacity(MAX_PENDING_TOUCHES),
            intro_frames: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// True once a block has reached the stack
    pub fn is_blocked(&self) -> bool {
        self.state.blocked
    }

    /// Number of frames the intro took (so far, while it is running)
    pub fn intro_frames(&self) -> u32 {
        self.intro_frames
    }

    /// Queue a touch sample (page x) for the next frame.
    ///
    /// The queue holds at most `MAX_PENDING_TOUCHES`; when full the oldest
    /// sample is dropped.
    pub fn push_touch(&mut self, x: f32) {
        if self.phase == SessionPhase::Stopped {
            return;
        }
        if self.touches.len() >= MAX_PENDING_TOUCHES {
            self.touches.pop_front();
            log::trace!("Touch queue full, dropped oldest sample");
        }
        self.touches.push_back(x);
    }

    /// Touch samples waiting for the next frame
    pub fn pending_touches(&self) -> usize {
        self.touches.len()
    }

    /// Consume wall-clock time, running as many fixed frames as are due.
    ///
    /// Large gaps (tab in background, debugger) are clamped so the session
    /// never tries to catch up more than a few frames at once.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase == SessionPhase::Stopped {
            return events;
        }

        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_DELTA_MS);

        let mut substeps = 0;
        while self.accumulator >= self.frame_ms && substeps < MAX_SUBSTEPS {
            self.frame(&mut events);
            self.accumulator -= self.frame_ms;
            substeps += 1;
        }

        // Out of frame budget: drop the backlog rather than carry it forward
        if substeps == MAX_SUBSTEPS && self.accumulator >= self.frame_ms {
            log::trace!("Dropping {:.1} ms of frame backlog", self.accumulator);
            self.accumulator %= self.frame_ms;
        }

        events
    }

    /// Run exactly one frame
    fn frame(&mut self, events: &mut Vec<GameEvent>) {
        let input = TickInput {
            touches: self.touches.drain(..).collect(),
        };

        match self.phase {
            SessionPhase::Intro => {
                if !input.touches.is_empty() {
                    log::trace!("Dropping {} touches during intro", input.touches.len());
                }
                self.intro_frames += 1;
                if intro_step(&mut self.state) == IntroStatus::Done {
                    self.start_play();
                }
            }
            SessionPhase::Playing => {
                events.extend(tick(&mut self.state, &input));
                self.run_timers(events);
            }
            SessionPhase::Stopped => {}
        }
    }

    fn start_play(&mut self) {
        let s = &self.settings;
        self.timers = Some(SpawnTimers::new(
            s.first_spawn_delay_ms as f64,
            s.orb_spawn_ms as f64,
            s.block_spawn_ms as f64,
        ));
        self.phase = SessionPhase::Playing;
        log::info!("Intro finished after {} frames, play started", self.intro_frames);
    }

    fn run_timers(&mut self, events: &mut Vec<GameEvent>) {
        let Some(timers) = self.timers.as_mut() else {
            return;
        };

        if self.state.blocked {
            if timers.is_active() {
                timers.cancel();
                log::debug!("Spawn timers cancelled, game is blocked");
            }
            return;
        }

        for fire in timers.advance(self.frame_ms) {
            match fire {
                Fire::OrbWave => {
                    let count = spawn_orb_wave(&mut self.state);
                    events.push(GameEvent::OrbWave { count: count as u32 });
                }
                Fire::BlockWave => {
                    spawn_block_wave(&mut self.state);
                    events.push(GameEvent::BlockWave);
                }
            }
        }
    }

    /// Draw the current frame
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        draw_frame(&self.state, canvas);
    }

    /// Cancel every timer and detach input. Idempotent.
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Stopped {
            return;
        }
        if let Some(timers) = self.timers.as_mut() {
            timers.cancel();
        }
        self.touches.clear();
        self.accumulator = 0.0;
        self.phase = SessionPhase::Stopped;
        log::info!(
            "Session stopped at tick {}: value {}, {} tokens{}",
            self.state.time_ticks,
            self.state.collector.value,
            self.state.tokens.len(),
            if self.state.blocked { ", blocked" } else { "" }
        );
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
