use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Pattern, PatternContext, PatternId, PatternInstance, PatternSlot};
use crate::audio::SpectrumFrame;
use crate::color::Rgb;
use crate::drawing::clear;
use crate::graph::{LedGraph, NUM_LEDS};
use crate::palette::{ColorMode, FlagColors};
use crate::random::Random;

/// Capacity of the pattern factory list
pub const MAX_PATTERNS: usize = 8;

/// Default run time after which an idle-stoppable pattern is retired
pub const DEFAULT_AUTO_ROTATE_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the pattern manager
#[derive(Debug, Clone)]
pub struct PatternManagerConfig {
    /// Patterns stepped through by next/previous, in order
    pub patterns: &'static [PatternId],
    /// Pattern started whenever nothing else runs
    pub idle_pattern: Option<PatternId>,
    pub auto_rotate: bool,
    pub auto_rotate_timeout: Duration,
    pub color_mode: ColorMode,
}

impl Default for PatternManagerConfig {
    fn default() -> Self {
        Self {
            patterns: &PatternId::ALL,
            idle_pattern: Some(PatternId::FlagBands),
            auto_rotate: true,
            auto_rotate_timeout: DEFAULT_AUTO_ROTATE_TIMEOUT,
            color_mode: ColorMode::Flag(0),
        }
    }
}

/// Owns the device-wide palette and at most one running pattern
pub struct PatternManager {
    patterns: Vec<PatternId, MAX_PATTERNS>,
    pattern_index: Option<usize>,
    active: Option<PatternInstance>,
    idle_pattern: Option<PatternId>,
    auto_rotate: bool,
    auto_rotate_timeout: Duration,
    colors: FlagColors,
    rng: Random,
}

impl PatternManager {
    pub fn new(config: &PatternManagerConfig, mut rng: Random) -> Self {
        let mut colors = FlagColors::new(rng.fork(), 0);
        colors.set_color_mode(config.color_mode);
        Self {
            patterns: config.patterns.iter().copied().take(MAX_PATTERNS).collect(),
            pattern_index: None,
            active: None,
            idle_pattern: config.idle_pattern,
            auto_rotate: config.auto_rotate,
            auto_rotate_timeout: config.auto_rotate_timeout,
            colors,
            rng,
        }
    }

    pub fn active(&self) -> Option<&PatternInstance> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<PatternId> {
        self.active.as_ref().map(PatternInstance::id)
    }

    /// Index of the last pattern started from the factory list
    pub fn pattern_index(&self) -> Option<usize> {
        self.pattern_index
    }

    pub fn colors(&self) -> &FlagColors {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut FlagColors {
        &mut self.colors
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Flip auto rotation, returns the new state
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    fn stop_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.stop();
        }
    }

    /// Stop the running pattern and start the next willing one
    ///
    /// Every factory is tried at most once; when all of them refuse to run
    /// no pattern is left active.
    pub fn next_pattern(&mut self, now: Instant, graph: &LedGraph, audio: &SpectrumFrame) -> bool {
        self.step_pattern(now, graph, audio, true)
    }

    /// Like [`Self::next_pattern`], stepping backwards
    pub fn previous_pattern(
        &mut self,
        now: Instant,
        graph: &LedGraph,
        audio: &SpectrumFrame,
    ) -> bool {
        self.step_pattern(now, graph, audio, false)
    }

    fn step_pattern(
        &mut self,
        now: Instant,
        graph: &LedGraph,
        audio: &SpectrumFrame,
        forward: bool,
    ) -> bool {
        self.stop_active();
        let count = self.patterns.len();
        let mut index = self.pattern_index;
        for _ in 0..count {
            let candidate = match (index, forward) {
                (None, true) => 0,
                (None, false) => count - 1,
                (Some(i), true) => (i + 1) % count,
                (Some(i), false) => (i + count - 1) % count,
            };
            index = Some(candidate);
            if self.start_pattern_at_index(candidate, now, graph, audio) {
                return true;
            }
        }

        #[cfg(feature = "esp32-log")]
        println!("[PatternManager.step_pattern] no pattern wants to run");
        false
    }

    /// Construct and start the factory at `index`
    pub fn start_pattern_at_index(
        &mut self,
        index: usize,
        now: Instant,
        graph: &LedGraph,
        audio: &SpectrumFrame,
    ) -> bool {
        let Some(&id) = self.patterns.get(index) else {
            return false;
        };
        let slot = id.to_slot(&mut self.rng);
        match self.start_pattern(slot, now, graph, audio) {
            Ok(()) => {
                self.pattern_index = Some(index);
                true
            }
            Err(_rejected) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[PatternManager.start_pattern_at_index] {} refused to run",
                    _rejected.description()
                );
                false
            }
        }
    }

    /// Stop the running pattern and start `slot` if it wants to run
    ///
    /// A pattern that refuses is handed back unchanged.
    pub fn start_pattern(
        &mut self,
        slot: PatternSlot,
        now: Instant,
        graph: &LedGraph,
        audio: &SpectrumFrame,
    ) -> Result<(), PatternSlot> {
        self.stop_active();
        if !slot.wants_to_run(audio) {
            return Err(slot);
        }

        let mut instance = PatternInstance::new(slot);
        instance.slot_mut().color_mode_changed(&mut self.colors);
        let mut ctx = PatternContext::new(now, graph, &mut self.colors, audio);
        instance.start(&mut ctx);
        self.active = Some(instance);
        Ok(())
    }

    /// Run one frame of the active pattern into `out`
    ///
    /// Also retires patterns past the auto-rotate timeout and starts the idle
    /// pattern (or a random one) when nothing is running.
    pub fn tick(
        &mut self,
        now: Instant,
        graph: &LedGraph,
        audio: &SpectrumFrame,
        out: &mut [Rgb; NUM_LEDS],
    ) {
        self.colors.tick(now);

        match &mut self.active {
            Some(active) => {
                let mut ctx = PatternContext::new(now, graph, &mut self.colors, audio);
                active.run(&mut ctx);
                out.copy_from_slice(active.slot().leds());
            }
            None => clear(out),
        }

        if self.should_retire(now) {
            self.stop_active();
        }

        if self.active.is_none() {
            self.start_fallback(now, graph, audio);
        }
    }

    fn should_retire(&self, now: Instant) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        self.auto_rotate
            && active.is_running()
            && active.run_time(now) > self.auto_rotate_timeout
            && Some(active.id()) != self.idle_pattern
            && active.slot().wants_to_idle_stop()
    }

    fn start_fallback(&mut self, now: Instant, graph: &LedGraph, audio: &SpectrumFrame) {
        if let Some(idle) = self.idle_pattern {
            let slot = idle.to_slot(&mut self.rng);
            if self.start_pattern(slot, now, graph, audio).is_ok() {
                return;
            }
        }
        if self.patterns.is_empty() {
            return;
        }
        let choice = self.rng.index_below(self.patterns.len());
        self.start_pattern_at_index(choice, now, graph, audio);
    }

    /// Step the device palette and let the active pattern react
    pub fn next_palette(&mut self) {
        self.colors.next_color_mode();
        self.notify_color_mode();
    }

    pub fn previous_palette(&mut self) {
        self.colors.previous_color_mode();
        self.notify_color_mode();
    }

    fn notify_color_mode(&mut self) {
        if let Some(active) = &mut self.active {
            active.slot_mut().color_mode_changed(&mut self.colors);
        }
    }

    pub fn poke(&mut self, now: Instant) {
        if let Some(active) = &mut self.active {
            active.slot_mut().poke(now);
        }
    }
}
