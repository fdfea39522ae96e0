//! Color types and operations.
//!
//! All synthesis happens at 16 bits per channel, so the only pixel type is
//! [`Rgba16`]. Gray levels are stored with R = G = B.

use crate::basics::uround;

// ============================================================================
// Component order
// ============================================================================

/// RGBA component order: R=0, G=1, B=2, A=3
pub struct OrderRgba;
impl OrderRgba {
    pub const R: usize = 0;
    pub const G: usize = 1;
    pub const B: usize = 2;
    pub const A: usize = 3;
    pub const N: usize = 4;
}

// ============================================================================
// Rgba16 (16-bit per channel)
// ============================================================================

/// RGBA color with u16 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba16 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba16 {
    pub const BASE_SHIFT: u32 = 16;
    pub const BASE_SCALE: u32 = 1 << Self::BASE_SHIFT;
    pub const BASE_MASK: u32 = Self::BASE_SCALE - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const BLACK: Self = Self::gray16(0);
    pub const DARK_GRAY: Self = Self::gray16(16383);
    pub const MID_GRAY: Self = Self::gray16(32767);
    pub const WHITE: Self = Self::gray16(65535);

    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray of the given 16-bit level.
    pub const fn gray16(v: u16) -> Self {
        Self {
            r: v,
            g: v,
            b: v,
            a: Self::BASE_MASK as u16,
        }
    }

    pub fn to_array(self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Interpolate p to q by a. The product needs more than 32 bits at
    /// full scale, so the arithmetic is carried in i64.
    #[inline]
    pub fn lerp(p: u16, q: u16, a: u16) -> u16 {
        let t = (q as i64 - p as i64) * a as i64 + Self::BASE_MSB as i64 - (p > q) as i64;
        (p as i64 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u16
    }

    /// Interpolate toward `c` by an 8-bit cover.
    #[inline]
    pub fn blend_cover(&self, c: &Rgba16, cover: u8) -> Rgba16 {
        let ik = (cover as u16) << 8 | cover as u16;
        Rgba16 {
            r: Self::lerp(self.r, c.r, ik),
            g: Self::lerp(self.g, c.g, ik),
            b: Self::lerp(self.b, c.b, ik),
            a: Self::lerp(self.a, c.a, ik),
        }
    }

    /// Interpolate toward `c` by `k` in `[0, 1]`.
    pub fn gradient(&self, c: &Rgba16, k: f64) -> Rgba16 {
        let ik = uround(k.clamp(0.0, 1.0) * Self::BASE_MASK as f64) as u16;
        Rgba16 {
            r: Self::lerp(self.r, c.r, ik),
            g: Self::lerp(self.g, c.g, ik),
            b: Self::lerp(self.b, c.b, ik),
            a: Self::lerp(self.a, c.a, ik),
        }
    }
}

impl Default for Rgba16 {
    fn default() -> Self {
        Self::BLACK
    }
}

// ============================================================================
// Signed-unit gray mapping
// ============================================================================

/// Map `z` in `[-1, 1]` onto a gray level: `round((z + 1) · 32767.5)`.
///
/// Trigonometric patterns produce values in `[-1, 1]`; this is the single
/// place they become pixels. Input outside the domain is clamped.
#[inline]
pub fn gray(z: f64) -> Rgba16 {
    Rgba16::gray16(gray_level(z))
}

/// The 16-bit level [`gray`] would produce.
#[inline]
pub fn gray_level(z: f64) -> u16 {
    uround((z.clamp(-1.0, 1.0) + 1.0) * 32767.5).min(65535) as u16
}

/// First-order inverse of [`gray_level`]: back to `[-1, 1]`.
#[inline]
pub fn gray_inverse(v: u16) -> f64 {
    v as f64 / 32767.5 - 1.0
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_grays() {
        assert_eq!(Rgba16::BLACK.to_array(), [0, 0, 0, 65535]);
        assert_eq!(Rgba16::DARK_GRAY.r, 16383);
        assert_eq!(Rgba16::MID_GRAY.g, 32767);
        assert_eq!(Rgba16::WHITE.to_array(), [65535; 4]);
    }

    #[test]
    fn test_gray_endpoints() {
        assert_eq!(gray_level(-1.0), 0);
        assert_eq!(gray_level(1.0), 65535);
        assert_eq!(gray_level(0.0), 32768);
        assert_eq!(gray_level(3.0), 65535);
        assert_eq!(gray_level(-3.0), 0);
    }

    #[test]
    fn test_gray_inverse_within_one_step() {
        let step = 1.0 / 32767.5;
        for z in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            let back = gray_inverse(gray_level(z));
            assert!(
                (back - z).abs() <= step,
                "gray({}) decoded to {}, more than one step away",
                z,
                back
            );
        }
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Rgba16::lerp(0, 65535, 0), 0);
        assert_eq!(Rgba16::lerp(0, 65535, 65535), 65535);
        assert_eq!(Rgba16::lerp(65535, 0, 65535), 0);
    }

    #[test]
    fn test_blend_cover() {
        let bg = Rgba16::WHITE;
        assert_eq!(bg.blend_cover(&Rgba16::BLACK, 0), Rgba16::WHITE);
        assert_eq!(bg.blend_cover(&Rgba16::BLACK, 255), Rgba16::BLACK);
        let half = bg.blend_cover(&Rgba16::BLACK, 128);
        assert!((half.r as i32 - 32639).abs() <= 2, "half cover gave {}", half.r);
        assert_eq!(half.a, 65535);
    }

    #[test]
    fn test_gradient_midpoint() {
        let c = Rgba16::BLACK.gradient(&Rgba16::WHITE, 0.5);
        assert!((c.r as i32 - 32768).abs() <= 1);
    }
}
