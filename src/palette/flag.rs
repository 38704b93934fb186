use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{FLAGS, FlagGradient, Palette, PaletteConstraints, PaletteRotation};
use crate::color::Rgb;
use crate::random::Random;

/// Minimum linear brightness of tracked flag colors
const FLAG_MIN_BRIGHTNESS: u8 = 0x10;

/// What the device palette currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Drifting between random gradients
    Rotating,
    /// Pinned to the flag at this index of [`FLAGS`]
    Flag(usize),
}

/// Palette pinned to a flag, with one tracked color per flag band
///
/// Rotation can be resumed, in which case the palette drifts like a plain
/// [`PaletteRotation`] and no flag is reported.
#[derive(Debug, Clone)]
pub struct FlagColors {
    rotation: PaletteRotation,
    flag_index: usize,
}

impl FlagColors {
    pub fn new(rng: Random, flag_index: usize) -> Self {
        let mut rotation = PaletteRotation::new(rng);
        rotation.pause_rotation = true;
        let constraints = PaletteConstraints {
            min_brightness: FLAG_MIN_BRIGHTNESS,
            ..PaletteConstraints::NONE
        };
        if rotation.set_constraints(constraints).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[FlagColors.new] flag brightness limit rejected by gradient table");
        }

        let mut colors = Self {
            rotation,
            flag_index: flag_index % FLAGS.len(),
        };
        colors.update_palette();
        colors
    }

    fn flag(&self) -> &'static FlagGradient {
        &FLAGS[self.flag_index]
    }

    #[allow(clippy::cast_possible_truncation)]
    fn update_palette(&mut self) {
        let flag = self.flag();
        self.rotation.set_palette(Palette::from_gradient(flag.stops));

        let bands = usize::from(flag.bands.max(1));
        self.rotation
            .prepare_tracked_colors(usize::from(flag.tracked_bands), 1);
        for i in 0..self.rotation.tracked_colors_count() {
            let center = 0xFF * i / bands + 0xFF / (bands * 2);
            self.rotation.set_tracked_color_index(i, center as u8);
        }
    }

    /// Advance to the next flag (wrapping)
    pub fn next_palette(&mut self) {
        self.flag_index = (self.flag_index + 1) % FLAGS.len();
        #[cfg(feature = "esp32-log")]
        println!("[FlagColors.next_palette] flag {}", self.flag().name);
        self.update_palette();
    }

    /// Go back to the previous flag (wrapping)
    pub fn previous_palette(&mut self) {
        self.flag_index = (self.flag_index + FLAGS.len() - 1) % FLAGS.len();
        #[cfg(feature = "esp32-log")]
        println!("[FlagColors.previous_palette] flag {}", self.flag().name);
        self.update_palette();
    }

    /// Index of the shown flag, `None` while rotating
    pub fn flag_index(&self) -> Option<usize> {
        if self.rotation.pause_rotation {
            Some(self.flag_index)
        } else {
            None
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.flag_index() {
            Some(index) => ColorMode::Flag(index),
            None => ColorMode::Rotating,
        }
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        match mode {
            ColorMode::Rotating => {
                self.rotation.pause_rotation = false;
                self.rotation.randomize_palette();
            }
            ColorMode::Flag(index) => {
                self.rotation.pause_rotation = true;
                self.flag_index = index % FLAGS.len();
                self.update_palette();
            }
        }
    }

    /// Step rotating, first flag, ..., last flag, rotating
    pub fn next_color_mode(&mut self) {
        let next = match self.color_mode() {
            ColorMode::Rotating => ColorMode::Flag(0),
            ColorMode::Flag(index) if index + 1 >= FLAGS.len() => ColorMode::Rotating,
            ColorMode::Flag(index) => ColorMode::Flag(index + 1),
        };
        self.set_color_mode(next);
    }

    /// Step backwards through [`Self::next_color_mode`]'s cycle
    pub fn previous_color_mode(&mut self) {
        let previous = match self.color_mode() {
            ColorMode::Rotating => ColorMode::Flag(FLAGS.len() - 1),
            ColorMode::Flag(0) => ColorMode::Rotating,
            ColorMode::Flag(index) => ColorMode::Flag(index - 1),
        };
        self.set_color_mode(previous);
    }

    /// Restore band colors after a pattern shifted them
    pub fn reset_flag_colors(&mut self) {
        if self.rotation.pause_rotation {
            self.update_palette();
        }
    }

    /// Sample the palette either as a time sweep or at a random index
    ///
    /// Returns the color together with the palette index it was read from.
    #[allow(clippy::cast_possible_truncation)]
    pub fn flag_sample(
        &self,
        linear: bool,
        now: Instant,
        offset: Duration,
        rng: &mut Random,
    ) -> (Rgb, u8) {
        let index = if linear {
            let bands = self.rotation.tracked_colors_count().max(1) as u64;
            ((now.as_millis() + offset.as_millis()) / bands) as u8
        } else {
            rng.random8()
        };
        (self.rotation.palette_color(index, 0xFF), index)
    }

    pub fn tick(&mut self, now: Instant) {
        self.rotation.tick(now);
    }

    pub fn rotation(&self) -> &PaletteRotation {
        &self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut PaletteRotation {
        &mut self.rotation
    }

    pub fn palette(&self) -> &Palette {
        self.rotation.palette()
    }

    pub fn palette_color(&self, index: u8, brightness: u8) -> Rgb {
        self.rotation.palette_color(index, brightness)
    }

    pub fn tracked_color(&mut self, n: usize) -> Rgb {
        self.rotation.tracked_color(n)
    }

    pub fn tracked_colors_count(&self) -> usize {
        self.rotation.tracked_colors_count()
    }
}
