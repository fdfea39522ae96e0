//! Post-processors for continuous-tone patterns.
//!
//! Both strategies turn a gray image into a black-and-white one and leave
//! their input untouched:
//!
//! - **Threshold-and-smooth** (`_clamp`): red above mid-gray becomes white,
//!   the rest black, then a σ = 1 px Gaussian blur softens the edges.
//! - **Stochastic dither** (`_dith`): each pixel becomes white when a seeded
//!   16-bit random draw falls below its red channel. The generator is
//!   re-seeded for every image, so output is reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::blur::gaussian_blur;
use crate::canvas::Canvas;
use crate::color::Rgba16;

/// Seed for the dither sequence.
pub const DITHER_SEED: u64 = 0x4449_5448_4552_0001;

/// Threshold between black and white: half of the 16-bit range.
pub const THRESHOLD: u16 = 0x7fff;

/// Standard deviation of the smoothing blur, in pixels.
pub const SMOOTH_SIGMA: f64 = 1.0;

/// Which post-processor produces the secondary variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostProcessMode {
    /// Threshold-and-smooth.
    #[default]
    Clamp,
    /// Stochastic dither.
    Dither,
}

impl PostProcessMode {
    /// File-name suffix of the variant.
    pub fn suffix(self) -> &'static str {
        match self {
            PostProcessMode::Clamp => "_clamp",
            PostProcessMode::Dither => "_dith",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PostProcessMode::Clamp => "clamp",
            PostProcessMode::Dither => "dither",
        }
    }

    pub fn apply(self, image: &Canvas) -> Canvas {
        match self {
            PostProcessMode::Clamp => threshold_smooth(image),
            PostProcessMode::Dither => dither(image, DITHER_SEED),
        }
    }
}

/// 1-bit stochastic dither of the red channel.
pub fn dither(image: &Canvas, seed: u64) -> Canvas {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    image.map(|c| {
        if rng.gen::<u16>() < c.r {
            Rgba16::WHITE
        } else {
            Rgba16::BLACK
        }
    })
}

/// Hard threshold of the red channel at [`THRESHOLD`].
pub fn threshold(image: &Canvas) -> Canvas {
    image.map(|c| {
        if c.r > THRESHOLD {
            Rgba16::WHITE
        } else {
            Rgba16::BLACK
        }
    })
}

/// Threshold, then blur with σ = [`SMOOTH_SIGMA`].
pub fn threshold_smooth(image: &Canvas) -> Canvas {
    let mut out = threshold(image);
    gaussian_blur(&mut out, SMOOTH_SIGMA);
    out
}
