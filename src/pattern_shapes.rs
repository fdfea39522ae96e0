//! Vector-shape patterns.
//!
//! Dots, hexagons and string-art chords are accumulated into a
//! [`CoverageMask`] and composited once over the background. Wedges are
//! classified per pixel by the angle around their apex.

use crate::basics::{Size, PI};
use crate::canvas::Canvas;
use crate::color::Rgba16;
use crate::pattern::{PatternSpec, Synthesis};
use crate::raster::{regular_polygon, CoverageMask};
use crate::trans_affine::TransAffine;

/// Stroke width of honeycomb and s-curve lines as a fraction of `long / n`.
pub const SHAPE_LINE_FRACTION: f64 = 0.06;
/// Widest honeycomb or s-curve line, in pixels.
pub const SHAPE_MAX_LINE_WIDTH: f64 = 6.0;

fn line_width(spec: &PatternSpec) -> f64 {
    (SHAPE_LINE_FRACTION * spec.size.long_edge() as f64 / spec.n()).min(SHAPE_MAX_LINE_WIDTH)
}

// ============================================================================
// Polka dots
// ============================================================================

/// Dot centres for a polka pattern: the `(n-1)²` interior points of an
/// `n × n` lattice laid along the long edge. Both axes start from the long
/// edge's minimum, so on a non-square canvas some rows fall outside the
/// short edge; they still count as placed.
pub fn dot_centers(size: Size, n: u32) -> Vec<(i32, i32)> {
    let long = size.long_edge() as i64;
    let bounds = size.bounds();
    let long_min = if size.height > size.width {
        bounds.y1
    } else {
        bounds.x1
    } as i64;
    let n = n as i64;
    let offset = |i: i64| (long_min + long * i / n) as i32;

    let mut centers = Vec::with_capacity(((n - 1).max(0) * (n - 1).max(0)) as usize);
    for xi in 1..n {
        for yi in 1..n {
            centers.push((offset(xi), offset(yi)));
        }
    }
    centers
}

/// Dot radius in whole pixels: a fifth of the lattice cell.
pub fn dot_radius(size: Size, n: u32) -> u32 {
    (size.long_edge() / n) / 5
}

fn polka(spec: &PatternSpec, foreground: Rgba16, background: Rgba16) -> Option<Synthesis> {
    spec.cell()?;
    let n = spec.density.get();
    let radius = dot_radius(spec.size, n);
    if radius == 0 {
        return None;
    }
    let mut mask = CoverageMask::new(spec.size);
    for (cx, cy) in dot_centers(spec.size, n) {
        mask.fill_circle(cx as f64, cy as f64, radius as f64);
    }
    Some(Synthesis::new(mask.composite(background, foreground), false))
}

/// Black dots on white.
pub fn polka_dot(spec: &PatternSpec) -> Option<Synthesis> {
    polka(spec, Rgba16::BLACK, Rgba16::WHITE)
}

/// White dots on dark gray.
pub fn polka_dark(spec: &PatternSpec) -> Option<Synthesis> {
    polka(spec, Rgba16::WHITE, Rgba16::DARK_GRAY)
}

/// White dots on mid gray.
pub fn polka_mid(spec: &PatternSpec) -> Option<Synthesis> {
    polka(spec, Rgba16::WHITE, Rgba16::MID_GRAY)
}

// ============================================================================
// Honeycomb
// ============================================================================

/// Flat-topped hexagon outlines tiling the canvas, `long / n` across
/// corners, starting at the top-left corner.
pub fn honeycomb(spec: &PatternSpec) -> Option<Synthesis> {
    let d = spec.cell()?;
    let r = d / 2.0;
    let inner_r = r * (PI / 6.0).cos();
    let side = d * (PI / 6.0).sin();
    let wedge = side * (PI / 3.0).cos();
    let width = line_width(spec);

    let (min_x, min_y) = (
        -(spec.size.width as f64) / 2.0,
        -(spec.size.height as f64) / 2.0,
    );
    let (max_x, max_y) = (-min_x, -min_y);

    let mut mask = CoverageMask::new(spec.size);
    let mut y = min_y;
    while y < max_y + inner_r {
        let mut x = min_x;
        while x < max_x + inner_r {
            mask.stroke_polygon(&regular_polygon(6, x, y, r), width);
            x += d + side;
        }
        let mut x = min_x + wedge + side;
        while x < max_x + inner_r {
            mask.stroke_polygon(&regular_polygon(6, x, y + inner_r, r), width);
            x += d + side;
        }
        y += 2.0 * inner_r;
    }
    Some(Synthesis::new(mask.composite(Rgba16::WHITE, Rgba16::BLACK), false))
}

// ============================================================================
// S-curve
// ============================================================================

/// String art: in each quadrant, `n + 1` chords joining a point on one
/// axis to a point on the other, their intercepts moving in opposite
/// directions. The envelope is a four-lobed curve.
pub fn s_curve(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let n = spec.n();
    let max_x = spec.size.width as f64 / 2.0;
    let max_y = spec.size.height as f64 / 2.0;
    let dx = max_x / n;
    let dy = max_y / n;
    let width = line_width(spec);

    let mut mask = CoverageMask::new(spec.size);
    for i in 0..=spec.density.get() {
        let xd = dx * i as f64;
        let yd = max_y - dy * i as f64;
        mask.stroke_segment(0.0, yd, xd, 0.0, width);
        mask.stroke_segment(xd, 0.0, 0.0, -yd, width);
        mask.stroke_segment(0.0, -yd, -xd, 0.0, width);
        mask.stroke_segment(-xd, 0.0, 0.0, yd, width);
    }
    Some(Synthesis::new(mask.composite(Rgba16::WHITE, Rgba16::BLACK), false))
}

// ============================================================================
// Radial wedges
// ============================================================================

/// `n` black wedges alternating with `n` white ones around an apex at
/// `(offset_x · W/2, offset_y · H/2)`. The first black wedge starts at 45°.
pub fn radial_wedge(spec: &PatternSpec, offset_x: f64, offset_y: f64) -> Option<Synthesis> {
    spec.cell()?;
    let sectors = 2 * spec.density.get() as i64;
    let step = 2.0 * PI / sectors as f64;
    let mut frame = TransAffine::new_rotation(PI / 4.0);
    frame.translate(
        spec.size.width as f64 / 2.0 * offset_x,
        spec.size.height as f64 / 2.0 * offset_y,
    );

    let canvas = Canvas::from_fn(spec.size, |x, y| {
        let (ux, uy) = frame.to_user(x as f64 + 0.5, y as f64 + 0.5);
        let a = uy.atan2(ux).rem_euclid(2.0 * PI);
        let sector = ((a / step) as i64).min(sectors - 1);
        if sector % 2 == 0 {
            Rgba16::BLACK
        } else {
            Rgba16::WHITE
        }
    });
    Some(Synthesis::new(canvas, false))
}
