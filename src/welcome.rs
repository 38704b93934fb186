//! Boot animation: pixels sparkle in one by one in flag colors
//!
//! Driven once per frame like any pattern, so the frame loop never blocks.

use core::f32::consts::PI;

use embassy_time::{Duration, Instant};

use crate::color::{Rgb, scale_color};
use crate::drawing::clear;
use crate::graph::NUM_LEDS;
use crate::math8::dim8_raw;
use crate::palette::{FLAGS, Palette};
use crate::random::Random;

/// Time over which pixel start times are spread
pub const SPRINKLE_DURATION: Duration = Duration::from_millis(500);

/// Lifetime of a single pixel flash
pub const PIXEL_DURATION: Duration = Duration::from_millis(800);

/// Sine envelope sampled at `elapsed` of `duration`, 0 outside the window
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn envelope(elapsed_ms: u64, duration_ms: u64) -> u8 {
    if elapsed_ms >= duration_ms {
        return 0;
    }
    let phase = elapsed_ms as f32 / duration_ms as f32;
    let level = libm::sinf(PI * phase) * 255.0;
    libm::roundf(level).clamp(0.0, 255.0) as u8
}

#[derive(Debug, Clone)]
pub struct WelcomeAnimation {
    /// Pixel lit at each step of the sprinkle
    order: [u8; NUM_LEDS],
    color_shift: u8,
    palette: Palette,
    start: Option<Instant>,
    finished: bool,
}

impl WelcomeAnimation {
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rng: &mut Random) -> Self {
        let mut order = [0u8; NUM_LEDS];
        for (i, px) in order.iter_mut().enumerate() {
            *px = i as u8;
        }
        for i in (1..NUM_LEDS).rev() {
            let j = rng.index_below(i + 1);
            order.swap(i, j);
        }

        Self {
            order,
            color_shift: 2 + rng.random8_below(0xFF - 2),
            palette: Palette::from_gradient(FLAGS[0].stops),
            start: None,
            finished: false,
        }
    }

    pub fn total_duration() -> Duration {
        SPRINKLE_DURATION + PIXEL_DURATION
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Draw the frame at `now` into `out`, returns `false` once done
    ///
    /// The first call starts the animation.
    #[allow(clippy::cast_possible_truncation)]
    pub fn render(&mut self, now: Instant, out: &mut [Rgb; NUM_LEDS]) -> bool {
        if self.finished {
            return false;
        }
        let start = *self.start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start).as_millis();
        if elapsed >= Self::total_duration().as_millis() {
            self.finished = true;
            clear(out);
            return false;
        }

        clear(out);
        let sprinkle = SPRINKLE_DURATION.as_millis();
        let pixel = PIXEL_DURATION.as_millis();
        for (i, &px) in self.order.iter().enumerate() {
            let pixel_start = i as u64 * sprinkle / NUM_LEDS as u64;
            if elapsed <= pixel_start {
                continue;
            }
            let level = envelope(elapsed - pixel_start, pixel);
            if level == 0 {
                continue;
            }
            let index = (i as u8).wrapping_mul(self.color_shift);
            out[usize::from(px)] = scale_color(self.palette.entry(index), dim8_raw(level));
        }
        true
    }
}
