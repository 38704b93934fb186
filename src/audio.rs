//! Audio input as seen by patterns
//!
//! Sampling and the FFT live outside this crate; patterns only consume the
//! latest [`SpectrumFrame`].

use heapless::Vec;

/// Number of usable spectrum bins (the two lowest FFT bins are dropped)
pub const SPECTRUM_BINS: usize = 30;

/// One analysed block of microphone samples
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpectrumFrame {
    /// Magnitude per frequency bin, lowest frequency first
    pub spectrum: Vec<u16, SPECTRUM_BINS>,
    /// Overall loudness of the block
    pub amplitude: u32,
}

impl SpectrumFrame {
    pub fn silent() -> Self {
        Self::default()
    }

    /// Index of the strongest bin, `None` for an empty spectrum
    pub fn loudest_bin(&self) -> Option<usize> {
        self.spectrum
            .iter()
            .enumerate()
            .max_by_key(|&(_, magnitude)| *magnitude)
            .map(|(bin, _)| bin)
    }
}

/// Provider of spectrum frames, sampled once per rendered frame
pub trait SpectrumSource {
    fn current_frame(&mut self) -> SpectrumFrame;
}

/// Source for builds without a microphone
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl SpectrumSource for Silence {
    fn current_frame(&mut self) -> SpectrumFrame {
        SpectrumFrame::silent()
    }
}
