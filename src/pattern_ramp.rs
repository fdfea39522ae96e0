//! Flat fields and calibration ramps.
//!
//! A ramp is a left-to-right linear intensity ramp cut into `2n` horizontal
//! bands. Even bands show the ramp as plain gray; odd bands show a 1-bit
//! rendition of the same ramp, where each pixel is white when a seeded
//! random draw, passed through a transfer table, falls below the column's
//! level. Comparing the two bands by eye shows which transfer curve a
//! display applies.
//!
//! The plain and dithered renditions alternate scan row by scan row in
//! groups of `H / 2n` rows. Density sets the group height, so `n = H / 2`
//! interleaves single rows and lower densities give taller bands that are
//! easier to compare on a large screen.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::canvas::Canvas;
use crate::color::Rgba16;
use crate::pattern::{PatternSpec, Synthesis};
use crate::transfer::TransferLut;

/// Seed for the ramp dither sequence. Each ramp image starts a fresh
/// generator from it.
pub const RAMP_SEED: u64 = 0x5241_4d50_5345_4544;

/// Densities are mapped onto the gray scale as `n / FIELD_STEPS`.
pub const FIELD_STEPS: u32 = 480;

/// Gray level of `field` at density `n`.
pub fn field_level(n: u32) -> u16 {
    (n as u64 * 65535 / FIELD_STEPS as u64).min(65535) as u16
}

/// A uniform gray field.
pub fn field(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let c = Rgba16::gray16(field_level(spec.density.get()));
    Some(Synthesis::new(Canvas::new(spec.size, c), true))
}

/// Linear level of storage column `col` on a ramp `width` pixels wide.
#[inline]
fn ramp_level(col: u32, width: u32) -> u16 {
    let span = width.saturating_sub(1).max(1) as u64;
    (col as u64 * 65535 / span).min(65535) as u16
}

/// Ramp of `n` plain/dithered band pairs, dithered through `lut`.
pub fn ramp(spec: &PatternSpec, lut: &TransferLut) -> Option<Synthesis> {
    spec.cell()?;
    let band = spec.size.height / spec.density.get().saturating_mul(2);
    if band == 0 {
        return None;
    }
    let width = spec.size.width;
    let bounds = spec.size.bounds();
    let mut rng = ChaCha8Rng::seed_from_u64(RAMP_SEED);

    let canvas = Canvas::from_fn(spec.size, |x, y| {
        let col = (x - bounds.x1) as u32;
        let row = (y - bounds.y1) as u32;
        let level = ramp_level(col, width);
        if (row / band) % 2 == 0 {
            Rgba16::gray16(level)
        } else if lut.lookup(rng.gen::<u16>()) < level {
            Rgba16::WHITE
        } else {
            Rgba16::BLACK
        }
    });
    Some(Synthesis::new(canvas, false))
}
