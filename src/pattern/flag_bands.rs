//! Flag bands laid around the ring, spokes breathing in band colors

use embassy_time::{Duration, Instant};

use super::{Pattern, PatternContext};
use crate::color::{BLACK, Rgb, scale_color};
use crate::drawing::clear;
use crate::graph::{NUM_LEDS, RING, Spoke};
use crate::math8::{ease_in_out_quad, scale8};
use crate::palette::FlagColors;

/// Time for the bands to advance one ring pixel
const STEP_INTERVAL: Duration = Duration::from_millis(120);

const BREATH_PERIOD_MS: u64 = 4000;

/// Spokes never dim below this level
const BREATH_FLOOR: u8 = 64;

#[derive(Debug, Clone)]
pub struct FlagBandsPattern {
    leds: [Rgb; NUM_LEDS],
    offset: usize,
    reverse: bool,
    last_step: Option<Instant>,
}

impl FlagBandsPattern {
    pub fn new() -> Self {
        Self {
            leds: [BLACK; NUM_LEDS],
            offset: 0,
            reverse: false,
            last_step: None,
        }
    }

    fn advance(&mut self, now: Instant) {
        let last = *self.last_step.get_or_insert(now);
        if now.saturating_duration_since(last) < STEP_INTERVAL {
            return;
        }
        self.last_step = Some(now);
        self.offset = if self.reverse {
            (self.offset + RING.len() - 1) % RING.len()
        } else {
            (self.offset + 1) % RING.len()
        };
    }

    /// Triangle wave over the breath period, eased at both ends
    #[allow(clippy::cast_possible_truncation)]
    fn breath(run_time: Duration) -> u8 {
        let phase = run_time.as_millis() % BREATH_PERIOD_MS * 510 / BREATH_PERIOD_MS;
        let rising = if phase > 255 { 510 - phase } else { phase };
        let eased = ease_in_out_quad(rising as u8);
        BREATH_FLOOR + scale8(eased, 255 - BREATH_FLOOR)
    }
}

impl Default for FlagBandsPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for FlagBandsPattern {
    fn setup(&mut self, ctx: &mut PatternContext<'_>) {
        self.offset = 0;
        self.last_step = None;
        ctx.colors.reset_flag_colors();
    }

    fn update(&mut self, ctx: &mut PatternContext<'_>) {
        self.advance(ctx.now);

        let bands = ctx.colors.tracked_colors_count();
        if bands == 0 {
            clear(&mut self.leds);
            return;
        }

        for (i, &px) in RING.iter().enumerate() {
            let position = (i + self.offset) % RING.len();
            let band = position * bands / RING.len();
            self.leds[usize::from(px)] = ctx.colors.tracked_color(band);
        }

        let breath = Self::breath(ctx.run_time);
        for spoke in Spoke::ALL {
            let color = scale_color(ctx.colors.tracked_color(spoke.index() % bands), breath);
            for &px in spoke.pixels() {
                self.leds[usize::from(px)] = color;
            }
        }
    }

    fn leds(&self) -> &[Rgb; NUM_LEDS] {
        &self.leds
    }

    fn wants_to_idle_stop(&self) -> bool {
        false
    }

    /// Reverse the band direction
    fn poke(&mut self, _now: Instant) {
        self.reverse = !self.reverse;
    }

    fn color_mode_changed(&mut self, colors: &mut FlagColors) {
        colors.reset_flag_colors();
    }

    fn description(&self) -> &'static str {
        "flag bands"
    }
}
