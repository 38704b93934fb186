//! Gradient palettes, palette blending and constrained palette selection
//!
//! Gradients are stored as short lists of [`GradientStop`]s and expanded into
//! a 256 entry [`Palette`] on demand. [`PaletteRotation`] drifts its current
//! palette toward a randomly chosen target, and [`FlagColors`] pins the
//! palette to a flag while exposing each band as a tracked color.

mod flag;
mod rotation;
pub mod table;

pub use flag::{ColorMode, FlagColors};
pub use rotation::{
    DEFAULT_SECONDS_PER_PALETTE, MAX_TRACKED_COLORS, PALETTE_BLEND_INTERVAL, PaletteRotation,
};
pub use table::{FLAGS, FlagGradient, GRADIENTS, Gradient};

use crate::color::{BLACK, Rgb, blend_colors, linear_brightness, scale_color};
use crate::random::Random;

/// Number of entries in an expanded palette
pub const PALETTE_SIZE: usize = 256;

/// A color anchored at a position of a gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientStop {
    pub pos: u8,
    pub color: Rgb,
}

/// Shorthand for a gradient stop
pub const fn stop(pos: u8, r: u8, g: u8, b: u8) -> GradientStop {
    GradientStop {
        pos,
        color: Rgb { r, g, b },
    }
}

/// 256 entry color ramp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Palette with every entry set to `color`
    pub const fn solid(color: Rgb) -> Self {
        Self {
            entries: [color; PALETTE_SIZE],
        }
    }

    /// Expand a gradient by linear interpolation between consecutive stops
    ///
    /// Entries before the first stop take its color, entries after the last
    /// stop take the last color. Stops must be sorted by position.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_gradient(stops: &[GradientStop]) -> Self {
        let mut entries = [BLACK; PALETTE_SIZE];
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return Self { entries };
        };

        for entry in &mut entries[..=usize::from(first.pos)] {
            *entry = first.color;
        }
        for pair in stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let start = usize::from(from.pos);
            let span = usize::from(to.pos.saturating_sub(from.pos));
            if span == 0 {
                entries[start] = to.color;
                continue;
            }
            for offset in 0..=span {
                let amount = (offset * 255 / span) as u8;
                entries[start + offset] = blend_colors(from.color, to.color, amount);
            }
        }
        for entry in &mut entries[usize::from(last.pos)..] {
            *entry = last.color;
        }

        Self { entries }
    }

    pub fn entry(&self, index: u8) -> Rgb {
        self.entries[usize::from(index)]
    }

    /// Color at `index`, scaled by `brightness`
    pub fn sample(&self, index: u8, brightness: u8) -> Rgb {
        let color = self.entry(index);
        if brightness == 255 {
            color
        } else {
            scale_color(color, brightness)
        }
    }

    pub fn entries(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Rgb; PALETTE_SIZE] {
        &mut self.entries
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::solid(BLACK)
    }
}

/// Step `current` toward `target` by at most one unit per channel byte
///
/// Bytes below target rise by one, bytes above fall by one and by a second
/// step if still above. Returns once `max_changes` bytes changed.
pub fn blend_toward_palette(current: &mut Palette, target: &Palette, max_changes: u16) -> u16 {
    let mut changes = 0;
    for (cur, wanted) in current.entries.iter_mut().zip(target.entries.iter()) {
        for (value, goal) in [
            (&mut cur.r, wanted.r),
            (&mut cur.g, wanted.g),
            (&mut cur.b, wanted.b),
        ] {
            if *value == goal {
                continue;
            }
            if *value < goal {
                *value += 1;
            } else {
                *value -= 1;
                if *value > goal {
                    *value -= 1;
                }
            }
            changes += 1;
            if changes >= max_changes {
                return changes;
            }
        }
    }
    changes
}

/// Limits a gradient must respect to be picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteConstraints {
    /// Minimum linear brightness of every stop, 0 disables the check
    pub min_brightness: u8,
    /// Maximum average channel distance between adjacent stops
    pub max_color_jump: u8,
}

impl PaletteConstraints {
    pub const NONE: Self = Self {
        min_brightness: 0,
        max_color_jump: 0xFF,
    };

    /// Whether `stops` satisfies both limits
    pub fn accepts(&self, stops: &[GradientStop]) -> bool {
        let too_dark = self.min_brightness > 0
            && stops
                .iter()
                .any(|s| linear_brightness(s.color) < u16::from(self.min_brightness));
        !too_dark && max_color_jump(stops) <= self.max_color_jump
    }
}

impl Default for PaletteConstraints {
    fn default() -> Self {
        Self::NONE
    }
}

/// Largest average channel distance between two adjacent stops
#[allow(clippy::cast_possible_truncation)]
pub fn max_color_jump(stops: &[GradientStop]) -> u8 {
    stops
        .windows(2)
        .map(|pair| {
            let (a, b) = (pair[0].color, pair[1].color);
            let distance = u16::from(a.r.abs_diff(b.r))
                + u16::from(a.g.abs_diff(b.g))
                + u16::from(a.b.abs_diff(b.b));
            (distance / 3) as u8
        })
        .max()
        .unwrap_or(0)
}

/// No gradient in the table satisfies the palette constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoAcceptablePalette;

/// Outcome of a palette search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteChoice {
    /// Index into the gradient table
    pub index: usize,
    /// Number of candidates rejected before `index`
    pub tries: usize,
}

/// Scan `gradients` starting at `start`, wrapping once around the table
pub fn find_palette(
    gradients: &[Gradient],
    start: usize,
    constraints: &PaletteConstraints,
) -> Result<PaletteChoice, NoAcceptablePalette> {
    if gradients.is_empty() {
        return Err(NoAcceptablePalette);
    }
    (0..gradients.len())
        .map(|tries| ((start + tries) % gradients.len(), tries))
        .find(|&(index, _)| constraints.accepts(gradients[index].stops))
        .map(|(index, tries)| PaletteChoice { index, tries })
        .ok_or(NoAcceptablePalette)
}

/// Pick a uniformly random starting gradient and search forward from it
pub fn find_random_palette(
    rng: &mut Random,
    constraints: &PaletteConstraints,
) -> Result<PaletteChoice, NoAcceptablePalette> {
    let start = rng.index_below(GRADIENTS.len());
    find_palette(&GRADIENTS, start, constraints)
}
