use embassy_time::Instant;

use crate::bits::{Bit, BitHooks};
use crate::palette::FlagColors;
use crate::random::Random;

/// Colors bits from the device palette
///
/// New bits take a flag band while a flag is shown and a random palette
/// index otherwise. Every frame the color is re-read from the bit's palette
/// index so bits follow a drifting palette.
pub(crate) struct PalettePaint<'a> {
    colors: &'a mut FlagColors,
    rng: &'a mut Random,
    fixed_index: Option<u8>,
}

impl<'a> PalettePaint<'a> {
    pub(crate) fn new(colors: &'a mut FlagColors, rng: &'a mut Random) -> Self {
        Self {
            colors,
            rng,
            fixed_index: None,
        }
    }

    /// Paint every new bit from the same palette index
    pub(crate) fn fixed(colors: &'a mut FlagColors, rng: &'a mut Random, index: u8) -> Self {
        Self {
            colors,
            rng,
            fixed_index: Some(index),
        }
    }
}

impl BitHooks for PalettePaint<'_> {
    fn bit_spawned(&mut self, bit: &mut Bit, _now: Instant) {
        if let Some(index) = self.fixed_index {
            bit.color_index = index;
            bit.color = self.colors.palette_color(index, 0xFF);
            return;
        }

        let bands = self.colors.tracked_colors_count();
        if self.colors.flag_index().is_some() && bands > 0 {
            let band = self.rng.index_below(bands);
            bit.color = self.colors.tracked_color(band);
            bit.color_index = self
                .colors
                .rotation()
                .tracked_color_index(band)
                .unwrap_or_default();
        } else {
            bit.color_index = self.rng.random8();
            bit.color = self.colors.palette_color(bit.color_index, 0xFF);
        }
    }

    fn update_bit(&mut self, bit: &mut Bit, _now: Instant) {
        bit.color = self.colors.palette_color(bit.color_index, 0xFF);
    }
}
