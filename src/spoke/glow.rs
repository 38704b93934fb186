use embassy_time::{Duration, Instant};

use super::{SpokeFrame, SpokePattern};
use crate::color::{BLACK, Rgb};
use crate::drawing::clear;
use crate::graph::{NUM_LEDS, PixelMask, Spoke};
use crate::math8::scale8;
use crate::transition::ValueTransition;

const RISE: Duration = Duration::from_millis(250);
const FALL: Duration = Duration::from_millis(1000);

/// Palette distance between the solid colors of neighbouring spokes
const SPOKE_HUE_STEP: u8 = 85;

/// The whole spoke lights up and hides the ring around it
///
/// Solid mode uses one palette color per spoke, bands mode spreads the flag
/// bands from the base to the tips.
#[derive(Debug, Clone)]
pub struct GlowPattern {
    spoke: Spoke,
    bands: bool,
    level: ValueTransition<u8>,
    pressed: bool,
    decay_pending: bool,
    leds: [Rgb; NUM_LEDS],
}

impl GlowPattern {
    pub fn new(spoke: Spoke, bands: bool) -> Self {
        Self {
            spoke,
            bands,
            level: ValueTransition::new_u8(0),
            pressed: false,
            decay_pending: false,
            leds: [BLACK; NUM_LEDS],
        }
    }

    pub fn spoke(&self) -> Spoke {
        self.spoke
    }

    pub fn shows_bands(&self) -> bool {
        self.bands
    }

    pub fn level(&self) -> u8 {
        self.level.current()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn band_index(&self, frame: &SpokeFrame<'_>, position: usize, len: usize) -> u8 {
        let rotation = frame.colors.rotation();
        let bands = rotation.tracked_colors_count();
        if bands == 0 {
            return (position * 0xFF / len.max(1)) as u8;
        }
        let band = position * bands / len.max(1);
        rotation.tracked_color_index(band).unwrap_or_default()
    }
}

impl SpokePattern for GlowPattern {
    fn press(&mut self, now: Instant) {
        self.pressed = true;
        self.decay_pending = false;
        self.level.set(0xFF, RISE, now);
    }

    fn release(&mut self, now: Instant) {
        self.pressed = false;
        self.decay_pending = false;
        self.level.set(0, FALL, now);
    }

    fn tap(&mut self, now: Instant) {
        self.pressed = false;
        self.decay_pending = true;
        self.level.set(0xFF, RISE, now);
    }

    fn update(&mut self, frame: &SpokeFrame<'_>) {
        self.level.tick(frame.now);
        if self.decay_pending && !self.level.is_transitioning() {
            self.decay_pending = false;
            self.level.set(0, FALL, frame.now);
        }

        clear(&mut self.leds);
        let level = self.level.current();
        if level == 0 {
            return;
        }

        let pixels = self.spoke.pixels();
        let solid = (self.spoke as u8).wrapping_mul(SPOKE_HUE_STEP);
        for (i, &px) in pixels.iter().enumerate() {
            let index = if self.bands {
                self.band_index(frame, i, pixels.len())
            } else {
                solid
            };
            self.leds[usize::from(px)] = frame.colors.palette_color(index, level);
        }

        // The arc keeps a dim halo unless another spoke owns it
        let foreign = frame.context.hidden_by_others(self.spoke);
        let halo = frame.colors.palette_color(solid, scale8(level, 0x40));
        for &px in self.spoke.arc() {
            if !foreign.contains(px) {
                self.leds[usize::from(px)] = halo;
            }
        }
    }

    fn leds(&self) -> &[Rgb; NUM_LEDS] {
        &self.leds
    }

    fn hidden_pixels(&self) -> PixelMask {
        self.spoke.mask()
    }

    fn suppression(&self) -> u8 {
        self.level.current()
    }

    fn is_idle(&self, _now: Instant) -> bool {
        !self.pressed
            && !self.decay_pending
            && !self.level.is_transitioning()
            && self.level.current() == 0
    }

    fn description(&self) -> &'static str {
        if self.bands { "band glow" } else { "glow" }
    }
}
