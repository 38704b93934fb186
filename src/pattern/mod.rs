//! Pattern system with compile-time known pattern variants
//!
//! All patterns are stored in an enum to avoid heap allocations.
//! Each pattern implements the [`Pattern`] trait and draws into its own
//! surface, which the [`PatternManager`] composites into the frame.

mod coupling;
mod downstream;
mod flag_bands;
mod lifecycle;
mod manager;
mod paint;
mod sound_ripple;

use embassy_time::{Duration, Instant};

pub use coupling::CouplingPattern;
pub use downstream::DownstreamPattern;
pub use flag_bands::FlagBandsPattern;
pub use lifecycle::{Lifecycle, PatternInstance};
pub use manager::{
    DEFAULT_AUTO_ROTATE_TIMEOUT, MAX_PATTERNS, PatternManager, PatternManagerConfig,
};
pub use sound_ripple::{SOUND_THRESHOLD, SoundRipplePattern};

use crate::audio::SpectrumFrame;
use crate::color::Rgb;
use crate::graph::{LedGraph, NUM_LEDS};
use crate::palette::FlagColors;
use crate::random::Random;

/// Bit capacity of the particle based patterns
pub const PATTERN_MAX_BITS: usize = 32;

const PATTERN_NAME_DOWNSTREAM: &str = "downstream";
const PATTERN_NAME_COUPLING: &str = "coupling";
const PATTERN_NAME_SOUND_RIPPLE: &str = "sound_ripple";
const PATTERN_NAME_FLAG_BANDS: &str = "flag_bands";

const PATTERN_ID_DOWNSTREAM: u8 = 0;
const PATTERN_ID_COUPLING: u8 = 1;
const PATTERN_ID_SOUND_RIPPLE: u8 = 2;
const PATTERN_ID_FLAG_BANDS: u8 = 3;

/// Everything a pattern may read or touch during one frame
pub struct PatternContext<'a> {
    pub now: Instant,
    /// Time since the pattern started
    pub run_time: Duration,
    /// Time since the previous update, zero on the first one
    pub frame_time: Duration,
    pub graph: &'a LedGraph,
    pub colors: &'a mut FlagColors,
    pub audio: &'a SpectrumFrame,
}

impl<'a> PatternContext<'a> {
    pub fn new(
        now: Instant,
        graph: &'a LedGraph,
        colors: &'a mut FlagColors,
        audio: &'a SpectrumFrame,
    ) -> Self {
        Self {
            now,
            run_time: Duration::from_millis(0),
            frame_time: Duration::from_millis(0),
            graph,
            colors,
            audio,
        }
    }
}

pub trait Pattern {
    /// Called once when the pattern starts
    fn setup(&mut self, _ctx: &mut PatternContext<'_>) {}

    /// Draw the next frame into the pattern surface
    fn update(&mut self, ctx: &mut PatternContext<'_>);

    /// Pattern surface
    fn leds(&self) -> &[Rgb; NUM_LEDS];

    /// Patterns that depend on sound may refuse to start in silence
    fn wants_to_run(&self, _audio: &SpectrumFrame) -> bool {
        true
    }

    /// Whether the auto-rotation timeout may evict the pattern
    fn wants_to_idle_stop(&self) -> bool {
        true
    }

    /// User nudge, usually cycles a pattern specific variation
    fn poke(&mut self, _now: Instant) {}

    /// The device palette switched between rotation and flags
    fn color_mode_changed(&mut self, _colors: &mut FlagColors) {}

    fn description(&self) -> &'static str;
}

/// Pattern slot - enum containing all possible patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    Downstream(DownstreamPattern),
    Coupling(CouplingPattern),
    SoundRipple(SoundRipplePattern),
    FlagBands(FlagBandsPattern),
}

/// Known pattern ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternId {
    Downstream = PATTERN_ID_DOWNSTREAM,
    Coupling = PATTERN_ID_COUPLING,
    SoundRipple = PATTERN_ID_SOUND_RIPPLE,
    FlagBands = PATTERN_ID_FLAG_BANDS,
}

impl PatternId {
    pub const ALL: [Self; 4] = [
        Self::Downstream,
        Self::Coupling,
        Self::SoundRipple,
        Self::FlagBands,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_DOWNSTREAM => Self::Downstream,
            PATTERN_ID_COUPLING => Self::Coupling,
            PATTERN_ID_SOUND_RIPPLE => Self::SoundRipple,
            PATTERN_ID_FLAG_BANDS => Self::FlagBands,
            _ => return None,
        })
    }

    /// Construct a fresh pattern of this kind
    pub fn to_slot(self, rng: &mut Random) -> PatternSlot {
        let rng = rng.fork();
        match self {
            Self::Downstream => PatternSlot::Downstream(DownstreamPattern::new(rng)),
            Self::Coupling => PatternSlot::Coupling(CouplingPattern::new(rng)),
            Self::SoundRipple => PatternSlot::SoundRipple(SoundRipplePattern::new(rng)),
            Self::FlagBands => PatternSlot::FlagBands(FlagBandsPattern::new()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Downstream => PATTERN_NAME_DOWNSTREAM,
            Self::Coupling => PATTERN_NAME_COUPLING,
            Self::SoundRipple => PATTERN_NAME_SOUND_RIPPLE,
            Self::FlagBands => PATTERN_NAME_FLAG_BANDS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_DOWNSTREAM => Some(Self::Downstream),
            PATTERN_NAME_COUPLING => Some(Self::Coupling),
            PATTERN_NAME_SOUND_RIPPLE => Some(Self::SoundRipple),
            PATTERN_NAME_FLAG_BANDS => Some(Self::FlagBands),
            _ => None,
        }
    }
}

impl PatternSlot {
    pub fn id(&self) -> PatternId {
        match self {
            Self::Downstream(_) => PatternId::Downstream,
            Self::Coupling(_) => PatternId::Coupling,
            Self::SoundRipple(_) => PatternId::SoundRipple,
            Self::FlagBands(_) => PatternId::FlagBands,
        }
    }

    fn as_pattern(&self) -> &dyn Pattern {
        match self {
            Self::Downstream(pattern) => pattern,
            Self::Coupling(pattern) => pattern,
            Self::SoundRipple(pattern) => pattern,
            Self::FlagBands(pattern) => pattern,
        }
    }

    fn as_pattern_mut(&mut self) -> &mut dyn Pattern {
        match self {
            Self::Downstream(pattern) => pattern,
            Self::Coupling(pattern) => pattern,
            Self::SoundRipple(pattern) => pattern,
            Self::FlagBands(pattern) => pattern,
        }
    }
}

impl Pattern for PatternSlot {
    fn setup(&mut self, ctx: &mut PatternContext<'_>) {
        self.as_pattern_mut().setup(ctx);
    }

    fn update(&mut self, ctx: &mut PatternContext<'_>) {
        self.as_pattern_mut().update(ctx);
    }

    fn leds(&self) -> &[Rgb; NUM_LEDS] {
        self.as_pattern().leds()
    }

    fn wants_to_run(&self, audio: &SpectrumFrame) -> bool {
        self.as_pattern().wants_to_run(audio)
    }

    fn wants_to_idle_stop(&self) -> bool {
        self.as_pattern().wants_to_idle_stop()
    }

    fn poke(&mut self, now: Instant) {
        self.as_pattern_mut().poke(now);
    }

    fn color_mode_changed(&mut self, colors: &mut FlagColors) {
        self.as_pattern_mut().color_mode_changed(colors);
    }

    fn description(&self) -> &'static str {
        self.as_pattern().description()
    }
}
