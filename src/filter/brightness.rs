//! Global brightness with smooth transitions
//!
//! The brightness knob is sampled once per frame by the caller; changes are
//! eased in over [`BrightnessFilterConfig::transition`] so dial jitter and
//! wake-ups never show as steps.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::Filter;
use crate::color::{Rgb, scale_color};
use crate::drawing::clear;
use crate::math8::scale8;
use crate::transition::ValueTransition;

/// Default easing time for brightness changes
pub const DEFAULT_BRIGHTNESS_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
pub struct BrightnessFilterConfig {
    /// Lowest output brightness for any non-zero request
    pub min_brightness: u8,
    /// Scale factor (0-255 = 0.0-1.0)
    pub scale: u8,
    pub transition: Duration,
}

impl Default for BrightnessFilterConfig {
    fn default() -> Self {
        Self {
            min_brightness: 0,
            scale: 0xFF,
            transition: DEFAULT_BRIGHTNESS_TRANSITION,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrightnessFilter {
    min_brightness: u8,
    scale: u8,
    transition: Duration,
    /// Last requested, uncorrected value
    requested: u8,
    brightness: ValueTransition<u8>,
}

impl BrightnessFilter {
    pub const fn new(brightness: u8, config: &BrightnessFilterConfig) -> Self {
        Self {
            min_brightness: config.min_brightness,
            scale: config.scale,
            transition: config.transition,
            requested: brightness,
            brightness: ValueTransition::new_u8(brightness),
        }
    }

    fn correct(&self, brightness: u8) -> u8 {
        if brightness == 0 {
            return 0;
        }
        let brightness = brightness.saturating_sub(self.min_brightness);
        scale8(brightness, self.scale).saturating_add(self.min_brightness)
    }

    /// Ease toward `brightness`, ignoring repeated requests for the same value
    pub fn set(&mut self, brightness: u8, now: Instant) {
        if brightness == self.requested {
            return;
        }
        self.requested = brightness;
        let corrected = self.correct(brightness);
        #[cfg(feature = "esp32-log")]
        println!(
            "[BrightnessFilter.set] setting brightness to {} ({})",
            brightness, corrected
        );
        self.brightness.set(corrected, self.transition, now);
    }

    /// Jump to `brightness` without correction or easing
    pub fn set_immediate(&mut self, brightness: u8, now: Instant) {
        self.requested = brightness;
        self.brightness.set(brightness, Duration::from_millis(0), now);
    }

    pub fn set_min_brightness(&mut self, min_brightness: u8) {
        self.min_brightness = min_brightness;
    }

    pub fn set_scale(&mut self, scale: u8) {
        self.scale = scale;
    }

    pub const fn current(&self) -> u8 {
        self.brightness.current()
    }

    pub const fn is_transitioning(&self) -> bool {
        self.brightness.is_transitioning()
    }
}

impl Filter for BrightnessFilter {
    fn apply(&mut self, frame: &mut [Rgb]) {
        let current = self.brightness.current();
        match current {
            0xFF => {}
            0 => clear(frame),
            _ => {
                for pixel in frame.iter_mut() {
                    *pixel = scale_color(*pixel, current);
                }
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        self.brightness.tick(now);
    }
}
