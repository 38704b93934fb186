#![no_std]

pub mod audio;
pub mod bits;
pub mod channel;
pub mod color;
pub mod drawing;
pub mod filter;
pub mod frame_scheduler;
pub mod graph;
pub mod input;
pub mod math8;
pub mod palette;
pub mod pattern;
pub mod random;
pub mod renderer;
pub mod spoke;
pub mod transition;
pub mod welcome;

pub use audio::{SpectrumFrame, SpectrumSource};
pub use bits::{Bit, BitsFiller, BitsFillerConfig, FlowRule, SpawnRule};
pub use filter::BrightnessFilterConfig;
pub use frame_scheduler::FrameScheduler;
pub use graph::{Edge, EdgeTypes, EdgeTypesPair, LedGraph, NUM_LEDS, PixelGraph, Spoke};
pub use input::{InputChannel, InputEvent, InputProcessor, InputReceiver, InputSender};
pub use palette::{ColorMode, FlagColors, PaletteRotation};
pub use pattern::{Pattern, PatternId, PatternManager, PatternManagerConfig, PatternSlot};
pub use renderer::{Renderer, RendererConfig};
pub use spoke::{SpokeKind, SpokeManagerConfig, SpokePatternManager};

pub use color::Rgb;
pub use math8::ease_in_out_quad;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The light engine is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
