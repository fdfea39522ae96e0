//! Grid and line patterns: jails, checkerboards, stripes.
//!
//! Every pixel is classified from its (possibly rotated) user-space
//! coordinate. Checkers and stripes bucket the coordinate by the lattice
//! cell and test bucket parity; jail lines are anti-aliased by the distance
//! from the pixel centre to the nearest lattice line. The registry runs
//! [`Canvas::correct_edges`] over every result.

use crate::basics::deg2rad;
use crate::canvas::Canvas;
use crate::color::{gray, Rgba16};
use crate::math::{band_coverage, distance_to_lattice};
use crate::pattern::{PatternSpec, Synthesis};
use crate::trans_affine::TransAffine;

/// Jail line width as a fraction of the line spacing.
pub const JAIL_LINE_FRACTION: f64 = 0.05;
/// Widest jail line, in pixels.
pub const JAIL_MAX_LINE_WIDTH: f64 = 5.0;

/// Centre of pixel (x, y).
#[inline]
fn center(x: i32, y: i32) -> (f64, f64) {
    (x as f64 + 0.5, y as f64 + 0.5)
}

/// A square lattice of lines through the origin, in a rotated user space.
#[derive(Debug, Clone, Copy)]
struct Jail {
    mtx: TransAffine,
    spacing: f64,
    half_width: f64,
}

impl Jail {
    /// Lines every `width / div` pixels, `0.05 · width / div` wide (capped).
    fn new(width: u32, div: f64, angle_deg: f64) -> Self {
        let width = width as f64;
        let line_width = (JAIL_LINE_FRACTION * width / div).min(JAIL_MAX_LINE_WIDTH);
        Self {
            mtx: TransAffine::new_rotation(deg2rad(angle_deg)),
            spacing: width / div,
            half_width: line_width * 0.5,
        }
    }

    /// Coverage of pixel (x, y) by the nearest horizontal or vertical line.
    fn coverage(&self, x: i32, y: i32) -> f64 {
        let (dx, dy) = center(x, y);
        let (ux, uy) = self.mtx.to_user(dx, dy);
        let cx = band_coverage(distance_to_lattice(ux, self.spacing), self.half_width);
        let cy = band_coverage(distance_to_lattice(uy, self.spacing), self.half_width);
        cx.max(cy)
    }
}

fn jail_over<F>(spec: &PatternSpec, jails: &[Jail], line: Rgba16, mut background: F) -> Canvas
where
    F: FnMut(i32, i32) -> Rgba16,
{
    Canvas::from_fn(spec.size, |x, y| {
        let bg = background(x, y);
        let cover = jails
            .iter()
            .map(|j| j.coverage(x, y))
            .fold(0.0_f64, f64::max);
        if cover <= 0.0 {
            bg
        } else {
            bg.gradient(&line, cover)
        }
    })
}

fn jail(spec: &PatternSpec, background: Rgba16, line: Rgba16) -> Option<Synthesis> {
    spec.cell()?;
    let j = Jail::new(spec.size.width, spec.n(), 0.0);
    let canvas = jail_over(spec, &[j], line, |_, _| background);
    Some(Synthesis::new(canvas, false))
}

/// Black lines on white.
pub fn jail_white(spec: &PatternSpec) -> Option<Synthesis> {
    jail(spec, Rgba16::WHITE, Rgba16::BLACK)
}

/// White lines on black.
pub fn jail_black(spec: &PatternSpec) -> Option<Synthesis> {
    jail(spec, Rgba16::BLACK, Rgba16::WHITE)
}

/// White lines on dark gray.
pub fn jail_dark(spec: &PatternSpec) -> Option<Synthesis> {
    jail(spec, Rgba16::DARK_GRAY, Rgba16::WHITE)
}

/// White lines on mid gray.
pub fn jail_mid(spec: &PatternSpec) -> Option<Synthesis> {
    jail(spec, Rgba16::MID_GRAY, Rgba16::WHITE)
}

/// The jail turned 45°.
pub fn diamond(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let j = Jail::new(spec.size.width, spec.n(), 45.0);
    let canvas = jail_over(spec, &[j], Rgba16::BLACK, |_, _| Rgba16::WHITE);
    Some(Synthesis::new(canvas, false))
}

/// A jail plus a 45° jail whose spacing is √2 wider, so both lattices meet
/// at the same crossings.
pub fn crosshatch(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let w = spec.size.width;
    let jails = [
        Jail::new(w, spec.n(), 0.0),
        Jail::new(w, spec.n() / std::f64::consts::SQRT_2, 45.0),
    ];
    let canvas = jail_over(spec, &jails, Rgba16::BLACK, |_, _| Rgba16::WHITE);
    Some(Synthesis::new(canvas, false))
}

/// Whether pixel (x, y) falls on a dark checker cell. Cells are `cell`
/// pixels square, `n` across the long edge, aligned so the pattern is
/// symmetric about the centre.
#[inline]
fn checker_dark(x: i32, y: i32, cell: f64, n: f64) -> bool {
    let (px, py) = center(x, y);
    let bx = (px / cell + n / 2.0).floor() as i64;
    let by = (py / cell + n / 2.0).floor() as i64;
    (bx + by).rem_euclid(2) == 0
}

/// Black-and-white checkerboard, `n` cells across the long edge.
pub fn check(spec: &PatternSpec) -> Option<Synthesis> {
    let cell = spec.cell()?;
    let n = spec.n();
    let canvas = Canvas::from_fn(spec.size, |x, y| {
        if checker_dark(x, y, cell, n) {
            Rgba16::BLACK
        } else {
            Rgba16::WHITE
        }
    });
    Some(Synthesis::new(canvas, false))
}

/// Black jail lines over a light checkerboard.
pub fn jail_check(spec: &PatternSpec) -> Option<Synthesis> {
    let cell = spec.cell()?;
    let n = spec.n();
    let shade = gray(0.25);
    let j = Jail::new(spec.size.width, n, 0.0);
    let canvas = jail_over(spec, &[j], Rgba16::BLACK, |x, y| {
        if checker_dark(x, y, cell, n) {
            shade
        } else {
            Rgba16::WHITE
        }
    });
    Some(Synthesis::new(canvas, false))
}

/// `n` black stripes across the long edge, alternating with white, with
/// stripe boundaries along the rotated y axis.
pub fn stripes(spec: &PatternSpec, angle_deg: f64) -> Option<Synthesis> {
    let cell = spec.cell()?;
    let n = spec.density.get() as i64;
    let mtx = TransAffine::new_rotation(deg2rad(angle_deg));
    let canvas = Canvas::from_fn(spec.size, |x, y| {
        let (dx, dy) = center(x, y);
        let (u, _) = mtx.to_user(dx, dy);
        let bucket = (u / cell).floor() as i64;
        if (bucket + n).rem_euclid(2) == 0 {
            Rgba16::BLACK
        } else {
            Rgba16::WHITE
        }
    });
    Some(Synthesis::new(canvas, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::Size;
    use crate::pattern::{Density, Pattern};

    fn spec(pattern: Pattern, w: u32, h: u32, n: u32) -> PatternSpec {
        PatternSpec::new(pattern, Size::new(w, h), Density::new(n).unwrap())
    }

    #[test]
    fn test_check_cells() {
        let s = check(&spec(Pattern::Check, 100, 100, 10)).unwrap();
        let c = &s.canvas;
        // Cell [0, 10) x [0, 10) has index (5, 5): dark.
        assert_eq!(c.pixel(0, 0), Rgba16::BLACK);
        assert_eq!(c.pixel(9, 9), Rgba16::BLACK);
        assert_eq!(c.pixel(10, 0), Rgba16::WHITE);
        assert_eq!(c.pixel(-1, 0), Rgba16::WHITE);
        assert_eq!(c.pixel(-1, -1), Rgba16::BLACK);
        assert!(!s.post_process);
    }

    /// Every outermost pixel equals its neighbour one step inward.
    fn assert_clean_edges(c: &Canvas) {
        let (w, h) = (c.width() as usize, c.height() as usize);
        for col in 0..w {
            assert_eq!(c.pixel_at(col, 0), c.pixel_at(col, 1), "top edge at col {}", col);
            assert_eq!(c.pixel_at(col, h - 1), c.pixel_at(col, h - 2), "bottom edge at col {}", col);
        }
        for row in 0..h {
            assert_eq!(c.pixel_at(0, row), c.pixel_at(1, row), "left edge at row {}", row);
            assert_eq!(c.pixel_at(w - 1, row), c.pixel_at(w - 2, row), "right edge at row {}", row);
        }
    }

    #[test]
    fn test_jail_line_on_frame_edge_is_corrected() {
        // Lines every 8 px, 0.4 px wide. The lines at x = -80 and x = 80
        // clip the outer columns, which the next column in never touches.
        let raw = jail_white(&spec(Pattern::JailWhite, 160, 40, 20)).unwrap().canvas;
        assert_ne!(raw.pixel_at(0, 5), raw.pixel_at(1, 5));
        assert_ne!(raw.pixel_at(159, 5), raw.pixel_at(158, 5));
        assert_eq!(raw.pixel_at(1, 5), Rgba16::WHITE);

        let mut fixed = raw.clone();
        // 40 rows per side, less the 10 rows crossed by horizontal lines.
        assert_eq!(fixed.correct_edges(), 60);
        assert_eq!(fixed.pixel_at(0, 5), Rgba16::WHITE);
        assert_eq!(fixed.pixel_at(159, 5), Rgba16::WHITE);
        assert_clean_edges(&fixed);
        assert_eq!(fixed.correct_edges(), 0);
    }

    #[test]
    fn test_grid_patterns_through_registry_have_clean_edges() {
        let luts = crate::transfer::TransferLuts::build();
        for (pattern, w, h, n) in [
            (Pattern::JailWhite, 160, 40, 20),
            (Pattern::JailMid, 160, 40, 20),
            (Pattern::Check, 90, 60, 7),
            (Pattern::StripesDl, 90, 60, 7),
        ] {
            let c = spec(pattern, w, h, n).synthesize(&luts).unwrap().canvas;
            assert_clean_edges(&c);
        }
    }

    #[test]
    fn test_jail_lines_on_lattice() {
        // 200 px wide, n = 4: lines every 50 px, 2.5 px wide.
        let s = jail_white(&spec(Pattern::JailWhite, 200, 100, 4)).unwrap();
        let c = &s.canvas;
        assert_eq!(c.pixel(0, 20), Rgba16::BLACK);
        assert_eq!(c.pixel(-1, 20), Rgba16::BLACK);
        assert_eq!(c.pixel(50, 20), Rgba16::BLACK);
        assert_eq!(c.pixel(25, 20), Rgba16::WHITE);
        assert_eq!(c.pixel(25, -50), Rgba16::BLACK);
        assert_eq!(c.pixel(25, 25), Rgba16::WHITE);
    }

    #[test]
    fn test_jail_line_width_capped() {
        // 0.05 * 1000 / 2 = 25 px, capped to 5.
        let s = jail_black(&spec(Pattern::JailBlack, 1000, 40, 2)).unwrap();
        let lit = (-20..20)
            .filter(|&x| s.canvas.pixel(x, 10) != Rgba16::BLACK)
            .count();
        assert!((5..=6).contains(&lit), "line spans {} px", lit);
    }

    #[test]
    fn test_jail_backgrounds() {
        let sp = spec(Pattern::JailDark, 200, 100, 4);
        assert_eq!(jail_dark(&sp).unwrap().canvas.pixel(25, 25), Rgba16::DARK_GRAY);
        assert_eq!(jail_mid(&sp).unwrap().canvas.pixel(25, 25), Rgba16::MID_GRAY);
        assert_eq!(jail_mid(&sp).unwrap().canvas.pixel(0, 25), Rgba16::WHITE);
    }

    #[test]
    fn test_jail_check_layers() {
        let s = jail_check(&spec(Pattern::JailCheck, 200, 200, 4)).unwrap();
        let c = &s.canvas;
        assert_eq!(c.pixel(25, 25), gray(0.25));
        assert_eq!(c.pixel(-25, 25), Rgba16::WHITE);
        assert_eq!(c.pixel(0, 25), Rgba16::BLACK);
    }

    #[test]
    fn test_diamond_lines_are_diagonal() {
        let s = diamond(&spec(Pattern::Diamond, 200, 200, 4)).unwrap();
        let c = &s.canvas;
        // Along the diagonal through the origin every pixel is on a line.
        for i in -40..40 {
            assert_ne!(c.pixel(i, i), Rgba16::WHITE, "({}, {})", i, i);
        }
        assert_eq!(c.pixel(0, 0), Rgba16::BLACK);
        assert_eq!(c.pixel(20, 0), Rgba16::WHITE);
    }

    #[test]
    fn test_crosshatch_superset_of_jail() {
        let sp = spec(Pattern::Crosshatch, 160, 120, 4);
        let j = jail_white(&sp).unwrap().canvas;
        let x = crosshatch(&sp).unwrap().canvas;
        for y in -60..60 {
            for px in -80..80 {
                if j.pixel(px, y) == Rgba16::BLACK {
                    assert_eq!(x.pixel(px, y), Rgba16::BLACK);
                }
            }
        }
        assert!(x.data() != j.data());
    }

    #[test]
    fn test_vertical_stripes() {
        // 100 px long edge, n = 10: 10 px stripes, dark from x = 0.
        let s = stripes(&spec(Pattern::StripesV, 100, 50, 10), 0.0).unwrap();
        let c = &s.canvas;
        assert_eq!(c.pixel(0, 0), Rgba16::BLACK);
        assert_eq!(c.pixel(9, -20), Rgba16::BLACK);
        assert_eq!(c.pixel(10, 0), Rgba16::WHITE);
        assert_eq!(c.pixel(-1, 0), Rgba16::WHITE);
        assert_eq!(c.pixel(-11, 0), Rgba16::BLACK);
        // Columns are uniform.
        for x in -50..50 {
            let top = c.pixel(x, -25);
            assert!((-25..25).all(|y| c.pixel(x, y) == top));
        }
    }

    #[test]
    fn test_horizontal_stripes_are_rows() {
        let c = stripes(&spec(Pattern::StripesH, 80, 80, 8), 90.0).unwrap().canvas;
        for y in -40..40 {
            let left = c.pixel(-40, y);
            assert!((-40..40).all(|x| c.pixel(x, y) == left), "row {}", y);
        }
    }

    #[test]
    fn test_diagonal_stripes_balanced() {
        let c = stripes(&spec(Pattern::StripesDl, 120, 120, 6), 45.0).unwrap().canvas;
        let dark = c
            .data()
            .chunks_exact(4)
            .filter(|p| p[0] == 0)
            .count() as f64;
        let frac = dark / (120.0 * 120.0);
        assert!((frac - 0.5).abs() < 0.05, "dark fraction {}", frac);
    }
}
