//! Recursive (IIR) Gaussian blur for 16-bit RGBA canvases.
//!
//! Young–van Vliet recursive approximation: a causal and an anti-causal
//! third-order filter per row, then per column. Cost is independent of the
//! radius, which matters on 8K canvases.

use crate::canvas::Canvas;
use crate::color::{OrderRgba, Rgba16};

/// Smallest radius that produces a visible effect; below it the blur is a
/// no-op.
pub const MIN_RADIUS: f64 = 0.62;

/// Per-pixel accumulator for all four channels.
#[derive(Clone, Copy, Default)]
struct RecursiveBlurCalcRgba {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl RecursiveBlurCalcRgba {
    fn from_pix(c: &Rgba16) -> Self {
        Self {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }

    fn calc(k: &Coefficients, c1: &Self, c2: &Self, c3: &Self, c4: &Self) -> Self {
        Self {
            r: k.b * c1.r + k.b1 * c2.r + k.b2 * c3.r + k.b3 * c4.r,
            g: k.b * c1.g + k.b1 * c2.g + k.b2 * c3.g + k.b3 * c4.g,
            b: k.b * c1.b + k.b1 * c2.b + k.b2 * c3.b + k.b3 * c4.b,
            a: k.b * c1.a + k.b1 * c2.a + k.b2 * c3.a + k.b3 * c4.a,
        }
    }

    fn to_pix(self) -> Rgba16 {
        let q = |v: f64| (v + 0.5).clamp(0.0, 65535.0) as u16;
        Rgba16::new(q(self.r), q(self.g), q(self.b), q(self.a))
    }
}

/// Filter coefficients for one radius.
struct Coefficients {
    b: f64,
    b1: f64,
    b2: f64,
    b3: f64,
}

impl Coefficients {
    fn new(radius: f64) -> Self {
        let s = radius * 0.5;
        let q = if s < 2.5 {
            3.97156 - 4.14554 * (1.0 - 0.26891 * s).sqrt()
        } else {
            0.98711 * s - 0.96330
        };

        let q2 = q * q;
        let q3 = q2 * q;

        let b0 = 1.0 / (1.578250 + 2.444130 * q + 1.428100 * q2 + 0.422205 * q3);
        let b1 = 2.44413 * q + 2.85619 * q2 + 1.26661 * q3;
        let b2 = -1.42810 * q2 - 1.26661 * q3;
        let b3 = 0.422205 * q3;
        let b = 1.0 - (b1 + b2 + b3) * b0;

        Self {
            b,
            b1: b1 * b0,
            b2: b2 * b0,
            b3: b3 * b0,
        }
    }
}

/// Filter one line of pixels in place. `line.len()` must be at least 3.
fn blur_line(
    k: &Coefficients,
    line: &mut [Rgba16],
    sum1: &mut [RecursiveBlurCalcRgba],
    sum2: &mut [RecursiveBlurCalcRgba],
) {
    let n = line.len();

    // Forward pass
    let c = RecursiveBlurCalcRgba::from_pix(&line[0]);
    sum1[0] = RecursiveBlurCalcRgba::calc(k, &c, &c, &c, &c);
    let c = RecursiveBlurCalcRgba::from_pix(&line[1]);
    sum1[1] = RecursiveBlurCalcRgba::calc(k, &c, &sum1[0], &sum1[0], &sum1[0]);
    let c = RecursiveBlurCalcRgba::from_pix(&line[2]);
    sum1[2] = RecursiveBlurCalcRgba::calc(k, &c, &sum1[1], &sum1[0], &sum1[0]);
    for i in 3..n {
        let c = RecursiveBlurCalcRgba::from_pix(&line[i]);
        sum1[i] = RecursiveBlurCalcRgba::calc(k, &c, &sum1[i - 1], &sum1[i - 2], &sum1[i - 3]);
    }

    // Backward pass
    let m = n - 1;
    sum2[m] = RecursiveBlurCalcRgba::calc(k, &sum1[m], &sum1[m], &sum1[m], &sum1[m]);
    sum2[m - 1] = RecursiveBlurCalcRgba::calc(k, &sum1[m - 1], &sum2[m], &sum2[m], &sum2[m]);
    sum2[m - 2] = RecursiveBlurCalcRgba::calc(k, &sum1[m - 2], &sum2[m - 1], &sum2[m], &sum2[m]);
    for i in (0..m.saturating_sub(2)).rev() {
        sum2[i] = RecursiveBlurCalcRgba::calc(k, &sum1[i], &sum2[i + 1], &sum2[i + 2], &sum2[i + 3]);
    }

    for (px, s) in line.iter_mut().zip(sum2.iter()) {
        *px = s.to_pix();
    }
}

/// Horizontal recursive blur pass.
pub fn recursive_blur_x(canvas: &mut Canvas, radius: f64) {
    if radius < MIN_RADIUS {
        return;
    }
    let w = canvas.width() as usize;
    if w < 3 {
        return;
    }
    let k = Coefficients::new(radius);
    let mut sum1 = vec![RecursiveBlurCalcRgba::default(); w];
    let mut sum2 = vec![RecursiveBlurCalcRgba::default(); w];
    let mut line = vec![Rgba16::default(); w];

    for row in 0..canvas.height() {
        let samples = canvas.row_slice_mut(row);
        for (px, chunk) in line.iter_mut().zip(samples.chunks_exact(OrderRgba::N)) {
            *px = Rgba16::new(chunk[0], chunk[1], chunk[2], chunk[3]);
        }
        blur_line(&k, &mut line, &mut sum1, &mut sum2);
        for (px, chunk) in line.iter().zip(samples.chunks_exact_mut(OrderRgba::N)) {
            chunk.copy_from_slice(&px.to_array());
        }
    }
}

/// Vertical recursive blur pass.
pub fn recursive_blur_y(canvas: &mut Canvas, radius: f64) {
    if radius < MIN_RADIUS {
        return;
    }
    let h = canvas.height() as usize;
    if h < 3 {
        return;
    }
    let k = Coefficients::new(radius);
    let mut sum1 = vec![RecursiveBlurCalcRgba::default(); h];
    let mut sum2 = vec![RecursiveBlurCalcRgba::default(); h];
    let mut line = vec![Rgba16::default(); h];

    for col in 0..canvas.width() as usize {
        for (row, px) in line.iter_mut().enumerate() {
            *px = canvas.pixel_at(col, row);
        }
        blur_line(&k, &mut line, &mut sum1, &mut sum2);
        for (row, px) in line.iter().enumerate() {
            canvas.set_pixel_at(col, row, *px);
        }
    }
}

/// Apply recursive blur in both directions, in place.
pub fn recursive_blur(canvas: &mut Canvas, radius: f64) {
    recursive_blur_x(canvas, radius);
    recursive_blur_y(canvas, radius);
}

/// Gaussian blur with standard deviation `sigma` pixels.
pub fn gaussian_blur(canvas: &mut Canvas, sigma: f64) {
    recursive_blur(canvas, sigma * 2.0);
}
