//! Coverage rasterizer for the vector-shape patterns.
//!
//! Shapes are accumulated into an 8-bit [`CoverageMask`] over the same
//! centred coordinate system as the [`Canvas`]; overlapping shapes merge by
//! maximum cover. The mask is then composited once: background blended
//! toward the foreground colour by each pixel's cover.
//!
//! Pixel (x, y) spans `[x, x+1) × [y, y+1)` in user units, so its centre is
//! at `(x + 0.5, y + 0.5)`.

use crate::basics::{ifloor, RectI, Size};
use crate::canvas::Canvas;
use crate::color::Rgba16;
use crate::math::{
    band_coverage, calc_distance, calc_segment_point_sq_distance, disc_coverage, to_cover,
    VERTEX_DIST_EPSILON,
};

/// Per-pixel 8-bit cover.
#[derive(Clone)]
pub struct CoverageMask {
    size: Size,
    bounds: RectI,
    covers: Vec<u8>,
}

impl CoverageMask {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            bounds: size.bounds(),
            covers: vec![0; size.width as usize * size.height as usize],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Cover at centred pixel (x, y); zero outside the bounds.
    #[inline]
    pub fn cover(&self, x: i32, y: i32) -> u8 {
        if !self.bounds.hit_test(x, y) {
            return 0;
        }
        self.covers[self.index(x, y)]
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y - self.bounds.y1) as usize * self.size.width as usize + (x - self.bounds.x1) as usize
    }

    /// Merge `cover` into pixel (x, y) by maximum. Caller guarantees bounds.
    #[inline]
    fn add_cover(&mut self, x: i32, y: i32, cover: u8) {
        let i = self.index(x, y);
        if cover > self.covers[i] {
            self.covers[i] = cover;
        }
    }

    /// Clip a float box (expanded to whole pixels) to the mask bounds.
    fn clip_box(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Option<RectI> {
        let mut r = RectI::new(ifloor(x1) - 1, ifloor(y1) - 1, ifloor(x2) + 2, ifloor(y2) + 2);
        if r.clip(&self.bounds) {
            Some(r)
        } else {
            None
        }
    }

    /// Fill a disc centred at (cx, cy).
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        let Some(r) = self.clip_box(cx - radius, cy - radius, cx + radius, cy + radius) else {
            return;
        };
        for y in r.y1..r.y2 {
            let py = y as f64 + 0.5;
            for x in r.x1..r.x2 {
                let d = calc_distance(x as f64 + 0.5, py, cx, cy);
                let c = to_cover(disc_coverage(d, radius));
                if c > 0 {
                    self.add_cover(x, y, c);
                }
            }
        }
    }

    /// Stroke the segment (x1,y1)→(x2,y2) with the given line width.
    ///
    /// Walks the segment's major axis one pixel at a time and evaluates the
    /// exact segment distance only in a narrow window around the line, so the
    /// cost is proportional to length × width rather than to the bounding box.
    /// Ends are rounded, which also closes joins between consecutive edges.
    pub fn stroke_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        let hw = width * 0.5;
        let dx = x2 - x1;
        let dy = y2 - y1;
        let len = (dx * dx + dy * dy).sqrt();
        if len < VERTEX_DIST_EPSILON || hw <= 0.0 {
            return;
        }
        let steep = dy.abs() > dx.abs();

        // Work in (major, minor) coordinates.
        let (a1, b1, a2, b2) = if steep { (y1, x1, y2, x2) } else { (x1, y1, x2, y2) };
        let (a_lo, a_hi) = if a1 < a2 { (a1, a2) } else { (a2, a1) };
        let slope = (b2 - b1) / (a2 - a1);
        // Minor-axis half extent of the band around the infinite line, plus
        // room for the round caps past either end.
        let reach = hw * len / (a2 - a1).abs() + hw + 2.0;

        let (major_lo, major_hi, minor_lo, minor_hi) = if steep {
            (self.bounds.y1, self.bounds.y2, self.bounds.x1, self.bounds.x2)
        } else {
            (self.bounds.x1, self.bounds.x2, self.bounds.y1, self.bounds.y2)
        };
        let start = (ifloor(a_lo - hw) - 1).max(major_lo);
        let end = (ifloor(a_hi + hw) + 2).min(major_hi);

        for a in start..end {
            let pa = a as f64 + 0.5;
            let on_line = b1 + (pa - a1) * slope;
            let lo = (ifloor(on_line - reach)).max(minor_lo);
            let hi = (ifloor(on_line + reach) + 1).min(minor_hi);
            for b in lo..hi {
                let (x, y) = if steep { (b, a) } else { (a, b) };
                let d2 = calc_segment_point_sq_distance(
                    x1,
                    y1,
                    x2,
                    y2,
                    x as f64 + 0.5,
                    y as f64 + 0.5,
                );
                let c = to_cover(band_coverage(d2.sqrt(), hw));
                if c > 0 {
                    self.add_cover(x, y, c);
                }
            }
        }
    }

    /// Stroke a closed polygon outline.
    pub fn stroke_polygon(&mut self, points: &[(f64, f64)], width: f64) {
        if points.len() < 2 {
            return;
        }
        for (i, &(x1, y1)) in points.iter().enumerate() {
            let (x2, y2) = points[(i + 1) % points.len()];
            self.stroke_segment(x1, y1, x2, y2, width);
        }
    }

    /// Blend `background` toward `foreground` by each pixel's cover.
    pub fn composite(&self, background: Rgba16, foreground: Rgba16) -> Canvas {
        let mut covers = self.covers.iter();
        Canvas::from_fn(self.size, |_, _| {
            let c = covers.next().copied().unwrap_or(0);
            match c {
                0 => background,
                255 => foreground,
                _ => background.blend_cover(&foreground, c),
            }
        })
    }
}

/// Vertices of a regular polygon with `n` sides, circumradius `r`, centred
/// at (cx, cy). With even `n` the polygon sits on a flat edge, so a hexagon
/// has vertices at 0°, ±60°, ±120° and 180°.
pub fn regular_polygon(n: usize, cx: f64, cy: f64, r: f64) -> Vec<(f64, f64)> {
    let step = 2.0 * std::f64::consts::PI / n as f64;
    let mut rotation = -std::f64::consts::FRAC_PI_2;
    if n % 2 == 0 {
        rotation += step / 2.0;
    }
    (0..n)
        .map(|i| {
            let a = rotation + step * i as f64;
            (cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}
