//! Foundation types, constants, and rounding helpers.
//!
//! Everything else in the crate depends on these: canvas sizes, centred
//! bounds, and the rounding conventions used when quantizing to 16 bits.

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round a double to the nearest unsigned integer (round half up).
/// Negative input saturates to zero.
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

/// Floor a double to the nearest integer toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

/// Quantize a normalized value in `[0, 1]` to a full-range 16-bit sample.
/// Out-of-range input is clamped.
#[inline]
pub fn quantize16(v: f64) -> u16 {
    uround(v.clamp(0.0, 1.0) * 65535.0).min(65535) as u16
}

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

// ============================================================================
// Size
// ============================================================================

/// Pixel dimensions of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The longer of the two edges. Most densities are measured against it.
    #[inline]
    pub fn long_edge(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Half-diagonal from the centre to a corner, using the integer half
    /// extents the centred coordinate system is built on.
    #[inline]
    pub fn half_diagonal(&self) -> f64 {
        let hx = (self.width / 2) as f64;
        let hy = (self.height / 2) as f64;
        (hx * hx + hy * hy).sqrt()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Centred bounds: `[-w/2, -w/2 + w) × [-h/2, -h/2 + h)`.
    pub fn bounds(&self) -> RectI {
        let x1 = -((self.width / 2) as i32);
        let y1 = -((self.height / 2) as i32);
        RectI::new(x1, y1, x1 + self.width as i32, y1 + self.height as i32)
    }
}

// ============================================================================
// RectI
// ============================================================================

/// Half-open integer rectangle `[x1, x2) × [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns `true` if the rectangle is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }

    /// Returns `true` if the point (x, y) is inside the rectangle.
    #[inline]
    pub fn hit_test(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Clip this rectangle to the intersection with `r`.
    /// Returns `true` if the result is non-empty.
    pub fn clip(&mut self, r: &Self) -> bool {
        self.x1 = self.x1.max(r.x1);
        self.y1 = self.y1.max(r.y1);
        self.x2 = self.x2.min(r.x2);
        self.y2 = self.y2.min(r.y2);
        self.is_valid()
    }
}

// ============================================================================
// Tests
// ============================================================================
