use embassy_time::Instant;

use crate::color::Rgb;

mod brightness;

pub use brightness::{BrightnessFilter, BrightnessFilterConfig, DEFAULT_BRIGHTNESS_TRANSITION};

/// Post-processing step applied to every finished frame
pub trait Filter {
    /// Apply the filter to a frame
    fn apply(&mut self, frame: &mut [Rgb]);

    fn tick(&mut self, _now: Instant) {}
}
