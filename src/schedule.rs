//! Elapsed-time driven timers
//!
//! Stand-ins for "call this every N ms" and "call this once after N ms".
//! Nothing here reads a clock: the owner feeds elapsed time in and gets back
//! how many times each timer fired, which keeps sessions deterministic.

/// A repeating timer with an optional initial delay
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Time between fires after the first (ms)
    pub period_ms: f64,
    /// Time until the first fire (ms)
    pub first_ms: f64,
    /// Time accumulated toward the next fire (ms)
    pub elapsed_ms: f64,
    fired: u64,
    active: bool,
}

impl Interval {
    /// Fires every `period_ms`, first after one full period
    pub fn every(period_ms: f64) -> Self {
        Self::after(period_ms, period_ms)
    }

    /// Fires once after `first_ms`, then every `period_ms`
    pub fn after(first_ms: f64, period_ms: f64) -> Self {
        assert!(period_ms > 0.0, "interval period must be positive");
        Self {
            period_ms,
            first_ms,
            elapsed_ms: 0.0,
            fired: 0,
            active: true,
        }
    }

    /// Time the next fire is due at, measured from the previous one
    fn due_ms(&self) -> f64 {
        if self.fired == 0 {
            self.first_ms
        } else {
            self.period_ms
        }
    }

    /// Advance by `dt_ms`; returns how many times the timer fired
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.active {
            return 0;
        }
        self.elapsed_ms += dt_ms;

        let mut fires = 0;
        while self.elapsed_ms >= self.due_ms() {
            self.elapsed_ms -= self.due_ms();
            self.fired += 1;
            fires += 1;
        }
        fires
    }

    /// Total fires so far
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop the timer for good
    pub fn cancel(&mut self) {
        self.active = false;
    }
}

/// Which periodic concern fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fire {
    OrbWave,
    BlockWave,
}

/// The spawn timers of a running session
#[derive(Debug, Clone)]
pub struct SpawnTimers {
    pub orbs: Interval,
    pub blocks: Interval,
}

impl SpawnTimers {
    /// Orbs after `delay`, then every `orb_period`; blocks every
    /// `block_period` starting one period after `delay`.
    pub fn new(delay_ms: f64, orb_period_ms: f64, block_period_ms: f64) -> Self {
        Self {
            orbs: Interval::after(delay_ms, orb_period_ms),
            blocks: Interval::after(delay_ms + block_period_ms, block_period_ms),
        }
    }

    /// Advance both timers; fires are reported orbs first
    pub fn advance(&mut self, dt_ms: f64) -> Vec<Fire> {
        let mut fires = Vec::new();
        for _ in 0..self.orbs.advance(dt_ms) {
            fires.push(Fire::OrbWave);
        }
        for _ in 0..self.blocks.advance(dt_ms) {
            fires.push(Fire::BlockWave);
        }
        fires
    }

    pub fn cancel(&mut self) {
        self.orbs.cancel();
        self.blocks.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.orbs.is_active() || self.blocks.is_active()
    }
}
