//! Radial and periodic patterns.
//!
//! Each pixel value is a trigonometric function of the integer centred
//! coordinate (x, y), its radius and/or its angle, mapped through
//! [`gray`]. The results are continuous-tone, so all of them except
//! `ring_fade` ask for a post-processed variant.

use crate::basics::PI;
use crate::canvas::Canvas;
use crate::color::{gray, Rgba16};
use crate::pattern::{PatternSpec, Synthesis};

#[inline]
fn radius(x: i32, y: i32) -> f64 {
    let fx = x as f64;
    let fy = y as f64;
    (fx * fx + fy * fy).sqrt()
}

#[inline]
fn angle(x: i32, y: i32) -> f64 {
    (y as f64).atan2(x as f64)
}

/// Ring period in pixels, truncated to a whole pixel.
#[inline]
fn ring_frequency(spec: &PatternSpec) -> f64 {
    2.0 * PI / (spec.size.long_edge() / spec.density.get()) as f64
}

/// Zone-plate chirp: `cos(r² · π / (n · half-diagonal))`. The local
/// frequency grows linearly with the radius.
pub fn radial(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let slope = PI / spec.n() / spec.size.half_diagonal();
    let canvas = Canvas::from_fn(spec.size, |x, y| {
        let r = radius(x, y);
        gray((r * r * slope).cos())
    });
    Some(Synthesis::new(canvas, true))
}

/// Concentric rings with a period of `long / n` pixels, peaking at the
/// centre.
pub fn rings(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let f = ring_frequency(spec);
    let canvas = Canvas::from_fn(spec.size, |x, y| gray((radius(x, y) * f).cos()));
    Some(Synthesis::new(canvas, true))
}

/// `sin(r') / r'` with a period of `half-diagonal / n` pixels.
pub fn ring_fade(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let f = 2.0 * PI / (spec.size.half_diagonal() / spec.n());
    let canvas = Canvas::from_fn(spec.size, |x, y| {
        if x == 0 && y == 0 {
            // sinc(0) = 1
            return Rgba16::WHITE;
        }
        let r = radius(x, y) * f;
        gray(r.sin() / r)
    });
    Some(Synthesis::new(canvas, false))
}

/// Egg-crate: `(cos(x·s) + cos(y·s)) / 2` with `s = π / (long / n)`.
pub fn wavy(spec: &PatternSpec) -> Option<Synthesis> {
    let cell = spec.cell()?;
    let s = PI / cell;
    let canvas = Canvas::from_fn(spec.size, |x, y| {
        gray(((x as f64 * s).cos() + (y as f64 * s).cos()) / 2.0)
    });
    Some(Synthesis::new(canvas, true))
}

/// `n` angular periods around the centre.
pub fn radial_wave(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let n = spec.n();
    let canvas = Canvas::from_fn(spec.size, |x, y| gray((PI + angle(x, y) * n).cos()));
    Some(Synthesis::new(canvas, true))
}

/// Product of `radial_wave` and `rings`.
pub fn ring_wave(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let n = spec.n();
    let f = ring_frequency(spec);
    let canvas = Canvas::from_fn(spec.size, |x, y| {
        let z = (PI + angle(x, y) * n).cos() * (radius(x, y) * f).cos();
        gray(z)
    });
    Some(Synthesis::new(canvas, true))
}

/// Exponent divisor for `square_wave`.
const SQUARE_WAVE_EXP: f64 = 100.0;

/// `cos(|y|^e) · cos(|x|^e)` with `e = n / 100`.
pub fn square_wave(spec: &PatternSpec) -> Option<Synthesis> {
    spec.cell()?;
    let e = spec.n() / SQUARE_WAVE_EXP;
    let bounds = spec.size.bounds();
    // cos(|x|^e) per column, computed once.
    let columns: Vec<f64> = (bounds.x1..bounds.x2)
        .map(|x| (x as f64).abs().powf(e).cos())
        .collect();
    let mut row = bounds.y1 - 1;
    let mut zp = 0.0;
    let canvas = Canvas::from_fn(spec.size, |x, y| {
        if y != row {
            row = y;
            zp = (y as f64).abs().powf(e).cos();
        }
        gray(zp * columns[(x - bounds.x1) as usize])
    });
    Some(Synthesis::new(canvas, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::Size;
    use crate::color::gray_level;
    use crate::pattern::{Density, Pattern};

    fn spec(pattern: Pattern, w: u32, h: u32, n: u32) -> PatternSpec {
        PatternSpec::new(pattern, Size::new(w, h), Density::new(n).unwrap())
    }

    #[test]
    fn test_rings_peak_and_period() {
        let s = rings(&spec(Pattern::Rings, 512, 512, 10)).unwrap();
        let c = &s.canvas;
        assert_eq!(c.pixel(0, 0).r, 65535);
        assert!(s.post_process);

        // Local maxima along the positive x axis.
        let row: Vec<u16> = (0..256).map(|x| c.pixel(x, 0).r).collect();
        let peaks: Vec<usize> = (1..row.len() - 1)
            .filter(|&i| row[i] >= row[i - 1] && row[i] > row[i + 1])
            .collect();
        assert!(peaks.len() >= 4, "peaks {:?}", peaks);
        for (k, p) in peaks.iter().enumerate() {
            let expected = 51.2 * (k + 1) as f64;
            assert!(
                (*p as f64 - expected).abs() <= 2.0,
                "peak {} at {} expected near {}",
                k,
                p,
                expected
            );
        }
        // A trough half a period out.
        assert!(c.pixel(25, 0).r < 1000, "trough = {}", c.pixel(25, 0).r);
    }

    #[test]
    fn test_radial_centre_white_and_chirps() {
        let s = radial(&spec(Pattern::Radial, 200, 100, 2)).unwrap();
        let c = &s.canvas;
        assert_eq!(c.pixel(0, 0).r, 65535);
        // At the corner r = half-diagonal, so r² · slope = half-diagonal · π / n.
        let hd = Size::new(200, 100).half_diagonal();
        let r = radius(-100, -50);
        assert!((r - hd).abs() < 1e-9);
        let expected = gray_level((r * r * (PI / 2.0 / hd)).cos());
        assert_eq!(c.pixel(-100, -50).r, expected);
    }

    #[test]
    fn test_ring_fade_origin_and_decay() {
        let s = ring_fade(&spec(Pattern::RingFade, 128, 128, 4)).unwrap();
        let c = &s.canvas;
        assert_eq!(c.pixel(0, 0), Rgba16::WHITE);
        assert!(!s.post_process);
        // Envelope shrinks with the radius.
        let near = (c.pixel(30, 0).r as i32 - 32768).abs();
        let far = (c.pixel(60, 0).r as i32 - 32768).abs();
        assert!(c.pixel(1, 0).r > 60000);
        assert!(near < 32768 && far < near + 2000);
    }

    #[test]
    fn test_wavy_symmetry() {
        let c = wavy(&spec(Pattern::Wavy, 100, 80, 5)).unwrap().canvas;
        assert_eq!(c.pixel(0, 0).r, 65535);
        // Period 40 px: x = 40 is another crest.
        assert_eq!(c.pixel(40, 0).r, 65535);
        assert_eq!(c.pixel(20, 0).r, 32768);
        // Half a period out on both axes: trough.
        assert_eq!(c.pixel(20, 20).r, 0);
        for (x, y) in [(3, 7), (13, -4), (-9, 21)] {
            assert_eq!(c.pixel(x, y), c.pixel(y, x));
        }
    }

    #[test]
    fn test_radial_wave_angular_periods() {
        let c = radial_wave(&spec(Pattern::RadialWave, 100, 100, 4)).unwrap().canvas;
        // theta = 0: cos(pi) = -1.
        assert_eq!(c.pixel(30, 0).r, 0);
        // theta = pi/4: cos(2pi) = 1.
        assert_eq!(c.pixel(30, 30).r, 65535);
        // Independent of radius.
        assert_eq!(c.pixel(10, 10), c.pixel(40, 40));
    }

    #[test]
    fn test_ring_wave_is_product() {
        let sp = spec(Pattern::RingWave, 120, 90, 6);
        let c = ring_wave(&sp).unwrap().canvas;
        let f = ring_frequency(&sp);
        for (x, y) in [(0, 1), (17, -5), (-40, 30), (59, 44)] {
            let z = (PI + angle(x, y) * 6.0).cos() * (radius(x, y) * f).cos();
            assert_eq!(c.pixel(x, y).r, gray_level(z));
        }
    }

    #[test]
    fn test_square_wave_matches_formula() {
        let c = square_wave(&spec(Pattern::SquareWave, 64, 40, 60)).unwrap().canvas;
        let e = 0.6;
        for (x, y) in [(0, 0), (5, -3), (-32, 19), (31, -20)] {
            let z = ((y as f64).abs().powf(e)).cos() * ((x as f64).abs().powf(e)).cos();
            assert_eq!(c.pixel(x, y).r, gray_level(z), "({}, {})", x, y);
        }
    }
}
