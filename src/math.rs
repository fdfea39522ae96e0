//! Geometric math utilities.
//!
//! Distances to points and segments, plus the 1-D coverage helpers the
//! pattern rasterizers use to turn a distance into a pixel cover.

// ============================================================================
// Constants
// ============================================================================

/// Coinciding points maximal distance (epsilon).
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

// ============================================================================
// Distance calculations
// ============================================================================

/// Euclidean distance between two points.
#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn calc_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

/// Parameter `u` of the projection of (x, y) onto segment (x1,y1)→(x2,y2).
/// Returns 0 if the segment is degenerate.
#[inline]
pub fn calc_segment_point_u(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;

    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }

    ((x - x1) * dx + (y - y1) * dy) / (dx * dx + dy * dy)
}

/// Squared distance from point (x, y) to the closest point on segment
/// (x1,y1)→(x2,y2).
#[inline]
pub fn calc_segment_point_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    let u = calc_segment_point_u(x1, y1, x2, y2, x, y);
    if u <= 0.0 {
        calc_sq_distance(x, y, x1, y1)
    } else if u >= 1.0 {
        calc_sq_distance(x, y, x2, y2)
    } else {
        calc_sq_distance(x, y, x1 + u * (x2 - x1), y1 + u * (y2 - y1))
    }
}

// ============================================================================
// Coverage
// ============================================================================

/// Fraction of a unit pixel, centred at distance `d` from the axis of a band
/// of half-width `half_width`, that the band covers (1-D box filter).
#[inline]
pub fn band_coverage(d: f64, half_width: f64) -> f64 {
    let d = d.abs();
    let lo = (d - 0.5).max(-half_width);
    let hi = (d + 0.5).min(half_width);
    (hi - lo).clamp(0.0, 1.0)
}

/// Coverage of a unit pixel centred at distance `d` from a disc's centre.
#[inline]
pub fn disc_coverage(d: f64, radius: f64) -> f64 {
    (radius + 0.5 - d).clamp(0.0, 1.0)
}

/// Distance from `v` to the nearest integer multiple of `spacing`.
#[inline]
pub fn distance_to_lattice(v: f64, spacing: f64) -> f64 {
    let t = v / spacing;
    (t - t.round()).abs() * spacing
}

/// Convert a fractional coverage to an 8-bit cover.
#[inline]
pub fn to_cover(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_calc_distance() {
        assert!((calc_distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < EPSILON);
        assert!((calc_sq_distance(1.0, 1.0, 4.0, 5.0) - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_segment_distance_clamps_to_ends() {
        let d = calc_segment_point_sq_distance(0.0, 0.0, 10.0, 0.0, 5.0, 3.0);
        assert!((d - 9.0).abs() < EPSILON);
        let d = calc_segment_point_sq_distance(0.0, 0.0, 10.0, 0.0, -3.0, 4.0);
        assert!((d - 25.0).abs() < EPSILON);
        let d = calc_segment_point_sq_distance(0.0, 0.0, 10.0, 0.0, 13.0, 0.0);
        assert!((d - 9.0).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_segment() {
        let d = calc_segment_point_sq_distance(2.0, 2.0, 2.0, 2.0, 5.0, 6.0);
        assert!((d - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_band_coverage() {
        assert!((band_coverage(0.0, 2.0) - 1.0).abs() < EPSILON);
        assert!((band_coverage(0.0, 0.25) - 0.5).abs() < EPSILON);
        assert!((band_coverage(2.0, 2.0) - 0.5).abs() < EPSILON);
        assert_eq!(band_coverage(3.0, 2.0), 0.0);
        assert!((band_coverage(-2.0, 2.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_disc_coverage() {
        assert_eq!(disc_coverage(0.0, 3.0), 1.0);
        assert!((disc_coverage(3.0, 3.0) - 0.5).abs() < EPSILON);
        assert_eq!(disc_coverage(4.0, 3.0), 0.0);
    }

    #[test]
    fn test_distance_to_lattice() {
        assert!((distance_to_lattice(0.0, 10.0)).abs() < EPSILON);
        assert!((distance_to_lattice(13.0, 10.0) - 3.0).abs() < EPSILON);
        assert!((distance_to_lattice(-18.0, 10.0) - 2.0).abs() < EPSILON);
        assert!((distance_to_lattice(25.0, 10.0) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_to_cover() {
        assert_eq!(to_cover(0.0), 0);
        assert_eq!(to_cover(1.0), 255);
        assert_eq!(to_cover(2.0), 255);
        assert_eq!(to_cover(0.5), 128);
    }
}
