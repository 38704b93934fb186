use super::PixelIndex;

/// Set of pixels, for up to 128 pixel indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelMask(u128);

impl PixelMask {
    /// Highest pixel count a mask can describe
    pub const CAPACITY: usize = 128;

    pub const fn empty() -> Self {
        Self(0)
    }

    /// Mask containing every listed pixel; indices past capacity are ignored
    pub const fn from_pixels(pixels: &[PixelIndex]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < pixels.len() {
            if (pixels[i] as usize) < Self::CAPACITY {
                bits |= 1 << pixels[i];
            }
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, px: PixelIndex) -> bool {
        (px as usize) < Self::CAPACITY && self.0 & (1 << px) != 0
    }

    pub fn insert(&mut self, px: PixelIndex) {
        if usize::from(px) < Self::CAPACITY {
            self.0 |= 1 << px;
        }
    }

    pub fn remove(&mut self, px: PixelIndex) {
        if usize::from(px) < Self::CAPACITY {
            self.0 &= !(1 << px);
        }
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn extend(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}
