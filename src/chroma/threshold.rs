use crate::fill::Classifier;
use anyhow::Result;
use image::{Rgba, RgbaImage};

/// Background iff every color channel is strictly above the tolerance floor.
///
/// 200 is safe for a pure white background with some anti-aliasing; the
/// original spritesheets also use 240 when keying without connectivity.
/// Alpha is ignored.
#[derive(Debug, Clone, Copy)]
pub struct NearWhite {
    min: u8,
}

impl NearWhite {
    pub fn new(min: u8) -> Self {
        Self { min }
    }
}

impl Classifier for NearWhite {
    fn is_background(&self, pixel: Rgba<u8>) -> Result<bool> {
        let [r, g, b, _] = pixel.0;
        Ok(r > self.min && g > self.min && b > self.min)
    }
}

/// Background iff every color channel is at or below the tolerance ceiling.
///
/// The black-background renders tolerate far less slack than white ones
/// (5 or 10 versus 200), so the two policies stay independently tunable.
/// Alpha is ignored.
#[derive(Debug, Clone, Copy)]
pub struct NearBlack {
    max: u8,
}

impl NearBlack {
    pub fn new(max: u8) -> Self {
        Self { max }
    }
}

impl Classifier for NearBlack {
    fn is_background(&self, pixel: Rgba<u8>) -> Result<bool> {
        let [r, g, b, _] = pixel.0;
        Ok(r <= self.max && g <= self.max && b <= self.max)
    }
}

/// Naive per-pixel chroma key: every pixel the classifier accepts goes
/// transparent, with no connectivity reasoning. Background-colored pixels
/// enclosed inside the subject are keyed too; use the flood fill when that
/// matters.
///
/// With `erase_color` the color channels are zeroed along with alpha
/// (the treatment black-background renders get); otherwise only alpha
/// drops to 0.
///
/// Returns the number of pixels keyed.
pub fn key_out<C: Classifier>(
    image: &mut RgbaImage,
    classifier: &C,
    erase_color: bool,
) -> Result<u64> {
    let mut keyed = 0u64;
    for pixel in image.pixels_mut() {
        if classifier.is_background(*pixel)? {
            if erase_color {
                *pixel = Rgba([0, 0, 0, 0]);
            } else {
                pixel.0[3] = 0;
            }
            keyed += 1;
        }
    }
    Ok(keyed)
}
