use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{
    GRADIENTS, NoAcceptablePalette, PALETTE_SIZE, Palette, PaletteConstraints,
    blend_toward_palette, find_palette, find_random_palette,
};
use crate::color::{BLACK, Rgb, linear_brightness};
use crate::random::Random;

/// Interval between two blending steps toward the target palette
pub const PALETTE_BLEND_INTERVAL: Duration = Duration::from_millis(40);

/// Default time a target palette is kept before a new one is picked
pub const DEFAULT_SECONDS_PER_PALETTE: u32 = 10;

/// Capacity of the tracked color index list
pub const MAX_TRACKED_COLORS: usize = 16;

#[allow(clippy::cast_possible_truncation)]
const MAX_CHANGES_PER_BLEND: u16 = PALETTE_SIZE as u16;

/// Palette that slowly drifts between randomly picked gradients
///
/// Also owns a list of "tracked colors": palette indices that patterns use
/// to keep a stable set of hues while the palette underneath keeps moving.
#[derive(Debug, Clone)]
pub struct PaletteRotation {
    current: Palette,
    target: Palette,
    tracked: Vec<u8, MAX_TRACKED_COLORS>,
    constraints: PaletteConstraints,
    rng: Random,
    /// Seconds between two target palette picks
    pub seconds_per_palette: u32,
    /// Freeze blending and target picks
    pub pause_rotation: bool,
    last_blend: Option<Instant>,
    last_pick: Option<Instant>,
}

impl PaletteRotation {
    /// Rotation over the whole gradient table without constraints
    pub fn new(mut rng: Random) -> Self {
        let current = Self::gradient_palette(rng.index_below(GRADIENTS.len()));
        let target = Self::gradient_palette(rng.index_below(GRADIENTS.len()));
        Self {
            current,
            target,
            tracked: Vec::new(),
            constraints: PaletteConstraints::NONE,
            rng,
            seconds_per_palette: DEFAULT_SECONDS_PER_PALETTE,
            pause_rotation: false,
            last_blend: None,
            last_pick: None,
        }
    }

    /// Rotation restricted to gradients accepted by `constraints`
    pub fn with_constraints(
        rng: Random,
        constraints: PaletteConstraints,
    ) -> Result<Self, NoAcceptablePalette> {
        let mut rotation = Self::new(rng);
        rotation.set_constraints(constraints)?;
        rotation.randomize_palette();
        rotation.pick_target();
        Ok(rotation)
    }

    fn gradient_palette(index: usize) -> Palette {
        GRADIENTS
            .get(index)
            .map(|gradient| Palette::from_gradient(gradient.stops))
            .unwrap_or_default()
    }

    pub fn constraints(&self) -> PaletteConstraints {
        self.constraints
    }

    pub fn min_brightness(&self) -> u8 {
        self.constraints.min_brightness
    }

    /// Replace the palette constraints
    ///
    /// The table is checked up front so later picks cannot come up empty;
    /// on failure the previous constraints stay in place.
    pub fn set_constraints(
        &mut self,
        constraints: PaletteConstraints,
    ) -> Result<(), NoAcceptablePalette> {
        find_palette(&GRADIENTS, 0, &constraints)?;
        self.constraints = constraints;
        Ok(())
    }

    /// Advance blending and target selection
    pub fn tick(&mut self, now: Instant) {
        if self.pause_rotation {
            return;
        }

        let last_blend = *self.last_blend.get_or_insert(now);
        if now.saturating_duration_since(last_blend) >= PALETTE_BLEND_INTERVAL {
            blend_toward_palette(&mut self.current, &self.target, MAX_CHANGES_PER_BLEND);
            self.last_blend = Some(now);
        }

        let last_pick = *self.last_pick.get_or_insert(now);
        let period = Duration::from_secs(u64::from(self.seconds_per_palette));
        if now.saturating_duration_since(last_pick) >= period {
            self.pick_target();
            self.last_pick = Some(now);
        }
    }

    fn pick_palette(&mut self) -> Option<Palette> {
        match find_random_palette(&mut self.rng, &self.constraints) {
            Ok(choice) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[PaletteRotation.pick_palette] picked {} ({}), {} tries",
                    choice.index, GRADIENTS[choice.index].name, choice.tries
                );
                Some(Self::gradient_palette(choice.index))
            }
            Err(NoAcceptablePalette) => {
                #[cfg(feature = "esp32-log")]
                println!("[PaletteRotation.pick_palette] no acceptable palette");
                debug_assert!(false, "no palette satisfies the constraints");
                None
            }
        }
    }

    fn pick_target(&mut self) {
        if let Some(palette) = self.pick_palette() {
            self.target = palette;
        }
    }

    /// Jump straight to a new random palette
    pub fn randomize_palette(&mut self) {
        if let Some(palette) = self.pick_palette() {
            self.current = palette;
        }
    }

    /// Unblended override of the current palette
    pub fn set_palette(&mut self, palette: Palette) {
        self.current = palette;
    }

    pub fn palette(&self) -> &Palette {
        &self.current
    }

    pub fn target_palette(&self) -> &Palette {
        &self.target
    }

    pub fn palette_color(&self, index: u8, brightness: u8) -> Rgb {
        self.current.sample(index, brightness)
    }

    /// Color of tracked entry `n`
    ///
    /// The tracked index is nudged forward until the color is at least as
    /// bright as the minimum brightness constraint.
    pub fn tracked_color(&mut self, n: usize) -> Rgb {
        let Some(index) = self.tracked.get_mut(n) else {
            #[cfg(feature = "esp32-log")]
            println!(
                "[PaletteRotation.tracked_color] index {} out of {} tracked colors",
                n,
                self.tracked.len()
            );
            debug_assert!(false, "tracked color index out of range");
            return BLACK;
        };

        let min = u16::from(self.constraints.min_brightness);
        let mut color = self.current.entry(*index);
        for _ in 0..PALETTE_SIZE {
            if linear_brightness(color) >= min {
                break;
            }
            *index = index.wrapping_add(1);
            color = self.current.entry(*index);
        }
        color
    }

    /// Palette index currently behind tracked entry `n`
    pub fn tracked_color_index(&self, n: usize) -> Option<u8> {
        self.tracked.get(n).copied()
    }

    pub(crate) fn set_tracked_color_index(&mut self, n: usize, index: u8) {
        if let Some(slot) = self.tracked.get_mut(n) {
            *slot = index;
        }
    }

    /// Move every tracked index by `delta` (mod 256)
    pub fn shift_tracked_colors(&mut self, delta: u8) {
        for index in &mut self.tracked {
            *index = index.wrapping_add(delta);
        }
    }

    /// Replace tracked colors with `count` indices spread over `cycles` palette loops
    #[allow(clippy::cast_possible_truncation)]
    pub fn prepare_tracked_colors(&mut self, count: usize, cycles: u8) {
        self.tracked.clear();
        let count = count.min(MAX_TRACKED_COLORS);
        for i in 0..count {
            let index = usize::from(cycles) * 0xFF * i / count;
            // Capacity was checked above.
            let _ = self.tracked.push(index as u8);
        }
    }

    pub fn release_tracked_colors(&mut self) {
        self.tracked.clear();
    }

    pub fn tracked_colors_count(&self) -> usize {
        self.tracked.len()
    }
}
