//! Per-spoke touch patterns drawn on top of the device pattern
//!
//! Every spoke owns at most one [`SpokeSlot`], constructed on the first
//! touch and dropped again once it has faded out. Spoke patterns draw into
//! their own surface; the [`SpokePatternManager`] merges those into a
//! brighten buffer and records the pixels they hide in a subtract buffer.

mod glow;
mod manager;
mod sparks;

use embassy_time::Instant;

pub use glow::GlowPattern;
pub use manager::{SpokeManagerConfig, SpokePatternManager, TAP_DURATION};
pub use sparks::SparksPattern;

use crate::color::Rgb;
use crate::graph::{LedGraph, NUM_LEDS, PixelIndex, PixelMask, Spoke};
use crate::palette::FlagColors;
use crate::random::Random;

const SPOKE_KIND_NAME_SPARKS: &str = "sparks";
const SPOKE_KIND_NAME_GLOW: &str = "glow";

/// Pixels hidden from the device pattern, recorded per spoke
///
/// Rebuilt every frame before the spoke patterns draw, so each pattern can
/// stay out of pixels another spoke has claimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpokeContext {
    hidden: [PixelMask; Spoke::COUNT],
}

impl SpokeContext {
    pub const fn new() -> Self {
        Self {
            hidden: [PixelMask::empty(); Spoke::COUNT],
        }
    }

    pub fn clear(&mut self) {
        self.hidden = [PixelMask::empty(); Spoke::COUNT];
    }

    pub fn hide(&mut self, spoke: Spoke, pixels: PixelMask) {
        self.hidden[spoke.index()].extend(pixels);
    }

    pub fn hidden_by(&self, spoke: Spoke) -> PixelMask {
        self.hidden[spoke.index()]
    }

    /// Pixels claimed by every spoke except `spoke`
    pub fn hidden_by_others(&self, spoke: Spoke) -> PixelMask {
        Spoke::ALL
            .iter()
            .filter(|&&other| other != spoke)
            .fold(PixelMask::empty(), |mask, &other| {
                mask.union(self.hidden[other.index()])
            })
    }

    pub fn is_hidden(&self, px: PixelIndex) -> bool {
        self.hidden.iter().any(|mask| mask.contains(px))
    }
}

/// Everything a spoke pattern may read during one frame
pub struct SpokeFrame<'a> {
    pub now: Instant,
    pub graph: &'a LedGraph,
    /// The spoke's private palette, or the device palette
    pub colors: &'a FlagColors,
    pub context: &'a SpokeContext,
}

pub trait SpokePattern {
    /// Finger down or latched on, keep running until released
    fn press(&mut self, now: Instant);

    /// Finger lifted after a hold
    fn release(&mut self, now: Instant);

    /// Short touch, play once and decay
    fn tap(&mut self, now: Instant);

    fn update(&mut self, frame: &SpokeFrame<'_>);

    fn leds(&self) -> &[Rgb; NUM_LEDS];

    /// Pixels the device pattern should be removed from
    fn hidden_pixels(&self) -> PixelMask;

    /// How strongly hidden pixels are removed, 0 leaves them alone
    fn suppression(&self) -> u8;

    /// Nothing left to draw, the pattern can be dropped
    fn is_idle(&self, now: Instant) -> bool;

    fn description(&self) -> &'static str;
}

/// Kinds of spoke pattern, each with its own sub-modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SpokeKind {
    /// Modes: single file, splitting into the ring
    Sparks = 0,
    /// Modes: solid, flag bands
    Glow = 1,
}

impl SpokeKind {
    pub const ALL: [Self; 2] = [Self::Sparks, Self::Glow];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Sparks,
            1 => Self::Glow,
            _ => return None,
        })
    }

    pub const fn mode_count(self) -> u8 {
        match self {
            Self::Sparks | Self::Glow => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sparks => SPOKE_KIND_NAME_SPARKS,
            Self::Glow => SPOKE_KIND_NAME_GLOW,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            SPOKE_KIND_NAME_SPARKS => Some(Self::Sparks),
            SPOKE_KIND_NAME_GLOW => Some(Self::Glow),
            _ => None,
        }
    }

    /// Construct a pattern of this kind for `spoke`
    pub fn to_slot(self, spoke: Spoke, mode: u8, rng: &mut Random) -> SpokeSlot {
        match self {
            Self::Sparks => SpokeSlot::Sparks(SparksPattern::new(spoke, mode == 1, rng.fork())),
            Self::Glow => SpokeSlot::Glow(GlowPattern::new(spoke, mode == 1)),
        }
    }
}

/// Spoke pattern slot, holds one pattern of any kind
#[derive(Debug, Clone)]
pub enum SpokeSlot {
    Sparks(SparksPattern),
    Glow(GlowPattern),
}

impl SpokeSlot {
    pub fn kind(&self) -> SpokeKind {
        match self {
            Self::Sparks(_) => SpokeKind::Sparks,
            Self::Glow(_) => SpokeKind::Glow,
        }
    }

    fn as_pattern(&self) -> &dyn SpokePattern {
        match self {
            Self::Sparks(pattern) => pattern,
            Self::Glow(pattern) => pattern,
        }
    }

    fn as_pattern_mut(&mut self) -> &mut dyn SpokePattern {
        match self {
            Self::Sparks(pattern) => pattern,
            Self::Glow(pattern) => pattern,
        }
    }
}

impl SpokePattern for SpokeSlot {
    fn press(&mut self, now: Instant) {
        self.as_pattern_mut().press(now);
    }

    fn release(&mut self, now: Instant) {
        self.as_pattern_mut().release(now);
    }

    fn tap(&mut self, now: Instant) {
        self.as_pattern_mut().tap(now);
    }

    fn update(&mut self, frame: &SpokeFrame<'_>) {
        self.as_pattern_mut().update(frame);
    }

    fn leds(&self) -> &[Rgb; NUM_LEDS] {
        self.as_pattern().leds()
    }

    fn hidden_pixels(&self) -> PixelMask {
        self.as_pattern().hidden_pixels()
    }

    fn suppression(&self) -> u8 {
        self.as_pattern().suppression()
    }

    fn is_idle(&self, now: Instant) -> bool {
        self.as_pattern().is_idle(now)
    }

    fn description(&self) -> &'static str {
        self.as_pattern().description()
    }
}
