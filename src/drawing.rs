//! Pixel buffer operations shared by patterns and the compositor

use crate::color::{BLACK, Rgb, blend_colors, scale_color};
use crate::math8::scale8;

/// How a source buffer is combined into a destination buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Crossfade toward the source by the blend intensity
    Overwrite,
    /// Keep the brighter channel
    Brighten,
    /// Keep the darker channel
    Darken,
    /// Remove the source from the destination
    Subtract,
}

pub fn fill_solid(leds: &mut [Rgb], color: Rgb) {
    for led in leds {
        *led = color;
    }
}

pub fn clear(leds: &mut [Rgb]) {
    fill_solid(leds, BLACK);
}

/// Dim every pixel by `amount` (255 clears the buffer)
pub fn fade_to_black_by(leds: &mut [Rgb], amount: u8) {
    if amount == 0 {
        return;
    }
    let keep = 255 - amount;
    for led in leds {
        *led = scale_color(*led, keep);
    }
}

/// Combine one pixel
pub fn blend_pixel(dst: Rgb, src: Rgb, mode: BlendMode, intensity: u8) -> Rgb {
    match mode {
        BlendMode::Overwrite => blend_colors(dst, src, intensity),
        BlendMode::Brighten => {
            let src = scale_color(src, intensity);
            Rgb {
                r: dst.r.max(src.r),
                g: dst.g.max(src.g),
                b: dst.b.max(src.b),
            }
        }
        BlendMode::Darken => {
            let darker = Rgb {
                r: dst.r.min(src.r),
                g: dst.g.min(src.g),
                b: dst.b.min(src.b),
            };
            blend_colors(dst, darker, intensity)
        }
        BlendMode::Subtract => Rgb {
            r: dst.r.saturating_sub(scale8(src.r, intensity)),
            g: dst.g.saturating_sub(scale8(src.g, intensity)),
            b: dst.b.saturating_sub(scale8(src.b, intensity)),
        },
    }
}

/// Combine `src` into `dst` pixel by pixel
///
/// Buffers of different length are combined over the shorter one.
pub fn blend_into(src: &[Rgb], dst: &mut [Rgb], mode: BlendMode, intensity: u8) {
    for (dst, src) in dst.iter_mut().zip(src) {
        *dst = blend_pixel(*dst, *src, mode, intensity);
    }
}
