use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Pattern, PatternContext, PatternId, PatternSlot};

/// Start and update bookkeeping of a pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    start_time: Option<Instant>,
    last_update: Option<Instant>,
}

impl Lifecycle {
    pub fn start(&mut self, now: Instant) {
        self.start_time = Some(now);
        self.last_update = None;
    }

    pub fn stop(&mut self) {
        self.start_time = None;
    }

    pub fn mark_updated(&mut self, now: Instant) {
        self.last_update = Some(now);
    }

    pub const fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Time since start, zero while stopped
    pub fn run_time(&self, now: Instant) -> Duration {
        self.start_time.map_or(Duration::from_millis(0), |start| {
            now.saturating_duration_since(start)
        })
    }

    /// Time since the last update, zero before the first one
    pub fn frame_time(&self, now: Instant) -> Duration {
        self.last_update.map_or(Duration::from_millis(0), |last| {
            now.saturating_duration_since(last)
        })
    }
}

/// A pattern together with its lifecycle
///
/// Runs the `inactive -> running -> inactive` state machine around the
/// pattern hooks.
#[derive(Debug, Clone)]
pub struct PatternInstance {
    lifecycle: Lifecycle,
    slot: PatternSlot,
}

impl PatternInstance {
    pub fn new(slot: PatternSlot) -> Self {
        Self {
            lifecycle: Lifecycle::default(),
            slot,
        }
    }

    pub fn start(&mut self, ctx: &mut PatternContext<'_>) {
        #[cfg(feature = "esp32-log")]
        println!("[PatternInstance.start] starting {}", self.slot.description());
        self.lifecycle.start(ctx.now);
        ctx.run_time = Duration::from_millis(0);
        ctx.frame_time = Duration::from_millis(0);
        self.slot.setup(ctx);
    }

    /// Draw one frame, does nothing while stopped
    pub fn run(&mut self, ctx: &mut PatternContext<'_>) {
        if !self.lifecycle.is_running() {
            return;
        }
        ctx.run_time = self.lifecycle.run_time(ctx.now);
        ctx.frame_time = self.lifecycle.frame_time(ctx.now);
        self.slot.update(ctx);
        self.lifecycle.mark_updated(ctx.now);
    }

    pub fn stop(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[PatternInstance.stop] stopping {}", self.slot.description());
        self.lifecycle.stop();
    }

    pub const fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn run_time(&self, now: Instant) -> Duration {
        self.lifecycle.run_time(now)
    }

    pub fn frame_time(&self, now: Instant) -> Duration {
        self.lifecycle.frame_time(now)
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn id(&self) -> PatternId {
        self.slot.id()
    }

    pub fn slot(&self) -> &PatternSlot {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut PatternSlot {
        &mut self.slot
    }

    pub fn into_slot(self) -> PatternSlot {
        self.slot
    }
}
