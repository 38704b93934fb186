use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{SpokeContext, SpokeFrame, SpokeKind, SpokePattern, SpokeSlot};
use crate::color::Rgb;
use crate::drawing::{BlendMode, blend_into, blend_pixel, clear};
use crate::graph::{LedGraph, NUM_LEDS, PixelIndex, Spoke};
use crate::palette::FlagColors;
use crate::random::Random;

/// Touches shorter than this count as a tap
pub const TAP_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
pub struct SpokeManagerConfig {
    pub tap_duration: Duration,
    /// Kind every spoke starts with
    pub kind: SpokeKind,
}

impl Default for SpokeManagerConfig {
    fn default() -> Self {
        Self {
            tap_duration: TAP_DURATION,
            kind: SpokeKind::Sparks,
        }
    }
}

#[derive(Debug, Clone)]
struct SpokeState {
    kind: SpokeKind,
    mode: u8,
    /// Set while a finger is down
    activation: Option<Instant>,
    /// Kept running by a long press until the next tap
    latched: bool,
    /// Private palette, once the spoke stepped away from the device palette
    colors: Option<FlagColors>,
    pattern: Option<SpokeSlot>,
}

impl SpokeState {
    fn new(kind: SpokeKind) -> Self {
        Self {
            kind,
            mode: 0,
            activation: None,
            latched: false,
            colors: None,
            pattern: None,
        }
    }

    fn is_engaged(&self) -> bool {
        self.activation.is_some() || self.latched
    }
}

/// Runs up to one pattern per spoke, independent of the device pattern
pub struct SpokePatternManager {
    states: [SpokeState; Spoke::COUNT],
    context: SpokeContext,
    tap_duration: Duration,
    rng: Random,
}

impl SpokePatternManager {
    pub fn new(config: &SpokeManagerConfig, rng: Random) -> Self {
        Self {
            states: core::array::from_fn(|_| SpokeState::new(config.kind)),
            context: SpokeContext::new(),
            tap_duration: config.tap_duration,
            rng,
        }
    }

    fn state(&self, spoke: Spoke) -> &SpokeState {
        &self.states[spoke.index()]
    }

    /// Pattern of the spoke, constructed on first use
    fn ensure_pattern(&mut self, spoke: Spoke) -> &mut SpokeSlot {
        let Self { states, rng, .. } = self;
        let state = &mut states[spoke.index()];
        let (kind, mode) = (state.kind, state.mode);
        state.pattern.get_or_insert_with(|| {
            #[cfg(feature = "esp32-log")]
            println!(
                "[SpokePatternManager.ensure_pattern] {} on {}",
                kind.as_str(),
                spoke.as_str()
            );
            kind.to_slot(spoke, mode, rng)
        })
    }

    /// Whether the spoke has a live pattern
    pub fn is_active(&self, spoke: Spoke) -> bool {
        self.state(spoke).pattern.is_some()
    }

    pub fn is_touched(&self, spoke: Spoke) -> bool {
        self.state(spoke).activation.is_some()
    }

    pub fn is_latched(&self, spoke: Spoke) -> bool {
        self.state(spoke).latched
    }

    pub fn kind(&self, spoke: Spoke) -> SpokeKind {
        self.state(spoke).kind
    }

    pub fn mode(&self, spoke: Spoke) -> u8 {
        self.state(spoke).mode
    }

    pub fn pattern(&self, spoke: Spoke) -> Option<&SpokeSlot> {
        self.state(spoke).pattern.as_ref()
    }

    /// Private palette of the spoke, if it has one
    pub fn colors(&self, spoke: Spoke) -> Option<&FlagColors> {
        self.state(spoke).colors.as_ref()
    }

    pub fn context(&self) -> &SpokeContext {
        &self.context
    }

    pub fn touch_down(&mut self, spoke: Spoke, now: Instant) {
        self.states[spoke.index()].activation = Some(now);
        self.ensure_pattern(spoke).press(now);
    }

    /// Finger lifted after `held_for`
    ///
    /// A short touch plays the pattern once, or ends a latched run. A longer
    /// one releases the hold unless a long press latched it.
    pub fn touch_up(&mut self, spoke: Spoke, held_for: Duration, now: Instant) {
        let is_tap = held_for < self.tap_duration;
        let state = &mut self.states[spoke.index()];
        state.activation = None;
        let was_latched = state.latched;

        if is_tap && was_latched {
            state.latched = false;
            if let Some(pattern) = &mut state.pattern {
                pattern.release(now);
            }
        } else if is_tap {
            self.ensure_pattern(spoke).tap(now);
        } else if !was_latched {
            if let Some(pattern) = &mut state.pattern {
                pattern.release(now);
            }
        }
    }

    /// Keep the spoke running after the finger is lifted
    pub fn long_press(&mut self, spoke: Spoke, now: Instant) {
        self.states[spoke.index()].latched = true;
        self.ensure_pattern(spoke).press(now);
    }

    /// Next sub-mode of the current kind, then the next kind
    pub fn next_pattern(&mut self, spoke: Spoke, now: Instant) {
        let state = &mut self.states[spoke.index()];
        if state.mode + 1 < state.kind.mode_count() {
            state.mode += 1;
        } else {
            state.mode = 0;
            state.kind = state.kind.next();
        }
        self.rebuild(spoke, now);
    }

    pub fn previous_pattern(&mut self, spoke: Spoke, now: Instant) {
        let state = &mut self.states[spoke.index()];
        if state.mode > 0 {
            state.mode -= 1;
        } else {
            state.kind = state.kind.previous();
            state.mode = state.kind.mode_count().saturating_sub(1);
        }
        self.rebuild(spoke, now);
    }

    /// Replace the spoke pattern and show it
    fn rebuild(&mut self, spoke: Spoke, now: Instant) {
        let state = &mut self.states[spoke.index()];
        state.pattern = None;
        let engaged = state.is_engaged();
        let pattern = self.ensure_pattern(spoke);
        if engaged {
            pattern.press(now);
        } else {
            pattern.tap(now);
        }
    }

    /// Step the spoke palette, detaching it from the device palette
    pub fn next_palette(&mut self, spoke: Spoke, shared: &FlagColors) {
        self.private_colors(spoke, shared).next_palette();
    }

    pub fn previous_palette(&mut self, spoke: Spoke, shared: &FlagColors) {
        self.private_colors(spoke, shared).previous_palette();
    }

    fn private_colors(&mut self, spoke: Spoke, shared: &FlagColors) -> &mut FlagColors {
        let Self { states, rng, .. } = self;
        states[spoke.index()].colors.get_or_insert_with(|| {
            #[cfg(feature = "esp32-log")]
            println!(
                "[SpokePatternManager.private_colors] {} detached from device palette",
                spoke.as_str()
            );
            FlagColors::new(rng.fork(), shared.flag_index().unwrap_or_default())
        })
    }

    /// Drop the private palette so the spoke follows the device palette again
    pub fn reset_palette(&mut self, spoke: Spoke) {
        self.states[spoke.index()].colors = None;
    }

    /// Draw every live spoke pattern
    ///
    /// `brighten` receives the spoke colors and `subtract` the amount the
    /// device pattern is dimmed under each pixel. Patterns that went idle
    /// are dropped afterwards.
    pub fn tick(
        &mut self,
        now: Instant,
        graph: &LedGraph,
        shared: &FlagColors,
        brighten: &mut [Rgb; NUM_LEDS],
        subtract: &mut [Rgb; NUM_LEDS],
    ) {
        clear(brighten);
        clear(subtract);

        self.context.clear();
        for (state, spoke) in self.states.iter().zip(Spoke::ALL) {
            if let Some(pattern) = &state.pattern
                && pattern.suppression() > 0
            {
                self.context.hide(spoke, pattern.hidden_pixels());
            }
        }

        for (state, spoke) in self.states.iter_mut().zip(Spoke::ALL) {
            if let Some(colors) = &mut state.colors {
                colors.tick(now);
            }
            let engaged = state.is_engaged();
            let Some(pattern) = &mut state.pattern else {
                continue;
            };

            let frame = SpokeFrame {
                now,
                graph,
                colors: state.colors.as_ref().unwrap_or(shared),
                context: &self.context,
            };
            pattern.update(&frame);
            blend_into(pattern.leds(), brighten, BlendMode::Brighten, 0xFF);

            let level = pattern.suppression();
            let hidden = self.context.hidden_by(spoke);
            if level > 0 {
                let gray = Rgb {
                    r: level,
                    g: level,
                    b: level,
                };
                for (px, dim) in subtract.iter_mut().enumerate() {
                    if PixelIndex::try_from(px).is_ok_and(|px| hidden.contains(px)) {
                        *dim = blend_pixel(*dim, gray, BlendMode::Brighten, 0xFF);
                    }
                }
            }

            if !engaged && pattern.is_idle(now) {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[SpokePatternManager.tick] {} on {} finished",
                    pattern.description(),
                    spoke.as_str()
                );
                state.pattern = None;
            }
        }
    }

    /// Drop every spoke pattern and private palette
    pub fn reset(&mut self) {
        for state in &mut self.states {
            state.pattern = None;
            state.colors = None;
            state.activation = None;
            state.latched = false;
        }
        self.context.clear();
    }
}

