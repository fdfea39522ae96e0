//! Canvas: a 16-bit RGBA pixel buffer addressed in centred coordinates.
//!
//! Storage is row-major from the top-left corner, four `u16` samples per
//! pixel. Pattern code never sees storage indices: it reads and writes
//! through coordinates spanning `[-W/2, W/2) × [-H/2, H/2)` (see
//! [`Size::bounds`]). Raw row slices are exposed for whole-buffer passes
//! (colour conversion, blur, encoding).

use crate::basics::{RectI, Size};
use crate::color::{OrderRgba, Rgba16};

const CHANNELS: usize = OrderRgba::N;

/// An RGBA16 pixel buffer with a centred coordinate system.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    bounds: RectI,
    data: Vec<u16>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish()
    }
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(size: Size, background: Rgba16) -> Self {
        let mut data = Vec::with_capacity(size.width as usize * size.height as usize * CHANNELS);
        for _ in 0..size.width as usize * size.height as usize {
            data.extend_from_slice(&background.to_array());
        }
        Self {
            size,
            bounds: size.bounds(),
            data,
        }
    }

    /// Create a canvas by evaluating `f(x, y)` at every centred coordinate.
    pub fn from_fn<F>(size: Size, mut f: F) -> Self
    where
        F: FnMut(i32, i32) -> Rgba16,
    {
        let bounds = size.bounds();
        let mut data = Vec::with_capacity(size.width as usize * size.height as usize * CHANNELS);
        for y in bounds.y1..bounds.y2 {
            for x in bounds.x1..bounds.x2 {
                data.extend_from_slice(&f(x, y).to_array());
            }
        }
        Self { size, bounds, data }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Centred bounds of the addressable area.
    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    /// Raw samples, row-major, `width * height * 4` long.
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    #[inline]
    fn offset(&self, col: usize, row: usize) -> usize {
        (row * self.size.width as usize + col) * CHANNELS
    }

    /// Pixel at storage position (`col`, `row`) from the top-left.
    #[inline]
    pub fn pixel_at(&self, col: usize, row: usize) -> Rgba16 {
        let o = self.offset(col, row);
        Rgba16::new(
            self.data[o + OrderRgba::R],
            self.data[o + OrderRgba::G],
            self.data[o + OrderRgba::B],
            self.data[o + OrderRgba::A],
        )
    }

    #[inline]
    pub fn set_pixel_at(&mut self, col: usize, row: usize, c: Rgba16) {
        let o = self.offset(col, row);
        self.data[o..o + CHANNELS].copy_from_slice(&c.to_array());
    }

    /// Pixel at centred coordinate (x, y).
    ///
    /// # Panics
    /// If (x, y) lies outside [`Canvas::bounds`].
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Rgba16 {
        assert!(
            self.bounds.hit_test(x, y),
            "pixel ({}, {}) out of bounds {:?}",
            x,
            y,
            self.bounds
        );
        self.pixel_at((x - self.bounds.x1) as usize, (y - self.bounds.y1) as usize)
    }

    /// Write the pixel at centred coordinate (x, y). Writes outside the
    /// bounds are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, c: Rgba16) {
        if self.bounds.hit_test(x, y) {
            self.set_pixel_at((x - self.bounds.x1) as usize, (y - self.bounds.y1) as usize, c);
        }
    }

    pub fn row_slice_mut(&mut self, row: u32) -> &mut [u16] {
        let stride = self.size.width as usize * CHANNELS;
        let start = row as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Produce a new canvas of the same size by mapping every pixel.
    pub fn map<F>(&self, mut f: F) -> Canvas
    where
        F: FnMut(Rgba16) -> Rgba16,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for chunk in self.data.chunks_exact(CHANNELS) {
            let c = Rgba16::new(chunk[0], chunk[1], chunk[2], chunk[3]);
            data.extend_from_slice(&f(c).to_array());
        }
        Canvas {
            size: self.size,
            bounds: self.bounds,
            data,
        }
    }

    /// Border correction for bucket-parity rasterization.
    ///
    /// Each pixel of the outermost rows and columns is compared with its
    /// neighbour one step inward; where they differ the border pixel takes
    /// the neighbour's value. Rows are corrected before columns, so corners
    /// follow their (already corrected) column neighbour. Returns the number
    /// of pixels rewritten.
    pub fn correct_edges(&mut self) -> usize {
        let w = self.size.width as usize;
        let h = self.size.height as usize;
        if w < 2 || h < 2 {
            return 0;
        }
        let mut fixed = 0;

        for (edge, inner) in [(0, 1), (h - 1, h - 2)] {
            for col in 0..w {
                let n = self.pixel_at(col, inner);
                if self.pixel_at(col, edge) != n {
                    self.set_pixel_at(col, edge, n);
                    fixed += 1;
                }
            }
        }
        for (edge, inner) in [(0, 1), (w - 1, w - 2)] {
            for row in 0..h {
                let n = self.pixel_at(inner, row);
                if self.pixel_at(edge, row) != n {
                    self.set_pixel_at(edge, row, n);
                    fixed += 1;
                }
            }
        }
        fixed
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_background() {
        let c = Canvas::new(Size::new(4, 3), Rgba16::MID_GRAY);
        assert_eq!(c.data().len(), 4 * 3 * 4);
        assert_eq!(c.pixel(-2, -1), Rgba16::MID_GRAY);
        assert_eq!(c.pixel(1, 1), Rgba16::MID_GRAY);
    }

    #[test]
    fn test_centred_addressing() {
        let mut c = Canvas::new(Size::new(10, 10), Rgba16::BLACK);
        c.set_pixel(0, 0, Rgba16::WHITE);
        assert_eq!(c.pixel_at(5, 5), Rgba16::WHITE);
        c.set_pixel(-5, -5, Rgba16::WHITE);
        assert_eq!(c.pixel_at(0, 0), Rgba16::WHITE);
        // Outside: silently dropped.
        c.set_pixel(5, 0, Rgba16::WHITE);
        assert_eq!(c.pixel_at(9, 5), Rgba16::BLACK);
    }

    #[test]
    #[should_panic]
    fn test_pixel_out_of_bounds_panics() {
        let c = Canvas::new(Size::new(4, 4), Rgba16::BLACK);
        c.pixel(2, 0);
    }

    #[test]
    fn test_from_fn_visits_centred_coords() {
        let c = Canvas::from_fn(Size::new(4, 2), |x, y| {
            Rgba16::gray16(((x + 2) * 10 + (y + 1)) as u16)
        });
        assert_eq!(c.pixel_at(0, 0).r, 0);
        assert_eq!(c.pixel_at(3, 1).r, 31);
        assert_eq!(c.pixel(1, 0).r, 31);
    }

    #[test]
    fn test_map_preserves_input() {
        let src = Canvas::new(Size::new(3, 3), Rgba16::WHITE);
        let out = src.map(|_| Rgba16::BLACK);
        assert_eq!(src.pixel(0, 0), Rgba16::WHITE);
        assert_eq!(out.pixel(0, 0), Rgba16::BLACK);
        assert_eq!(out.size(), src.size());
    }

    #[test]
    fn test_correct_edges_copies_inner_neighbour() {
        let mut c = Canvas::new(Size::new(6, 5), Rgba16::WHITE);
        // Dirty the top row and the right column.
        for col in 0..6 {
            c.set_pixel_at(col, 0, Rgba16::BLACK);
        }
        for row in 0..5 {
            c.set_pixel_at(5, row, Rgba16::DARK_GRAY);
        }
        let fixed = c.correct_edges();
        assert!(fixed > 0);
        for col in 0..6 {
            assert_eq!(c.pixel_at(col, 0), c.pixel_at(col, 1), "col {}", col);
        }
        for row in 0..5 {
            assert_eq!(c.pixel_at(5, row), c.pixel_at(4, row), "row {}", row);
        }
    }

    #[test]
    fn test_correct_edges_leaves_clean_canvas() {
        let mut c = Canvas::new(Size::new(8, 8), Rgba16::MID_GRAY);
        assert_eq!(c.correct_edges(), 0);
    }
}
