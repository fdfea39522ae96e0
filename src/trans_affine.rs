//! Pattern frames as affine matrices.
//!
//! Several patterns are defined in a "user space" that is rotated and then
//! moved relative to the centred canvas: rotated stripes, the 45° jail,
//! wedges around an off-centre apex. Patterns are evaluated per pixel, so
//! the only mapping they need is device pixel → user space.

/// Rotation followed by translation, stored as the six components of
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    /// Rotation by `a` radians about the origin.
    pub fn new_rotation(a: f64) -> Self {
        let (sa, ca) = a.sin_cos();
        Self {
            sx: ca,
            shy: sa,
            shx: -sa,
            sy: ca,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Move the frame's origin to `(x, y)` after any rotation.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += x;
        self.ty += y;
        self
    }

    /// Map a device point into user space.
    #[inline]
    pub fn to_user(&self, x: f64, y: f64) -> (f64, f64) {
        let d = 1.0 / (self.sx * self.sy - self.shy * self.shx);
        let a = (x - self.tx) * d;
        let b = (y - self.ty) * d;
        (a * self.sy - b * self.shx, b * self.sx - a * self.shy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{deg2rad, PI};

    const EPS: f64 = 1e-10;

    #[test]
    fn test_zero_rotation_is_identity() {
        let m = TransAffine::new_rotation(0.0);
        assert_eq!(m.to_user(3.0, -4.0), (3.0, -4.0));
    }

    #[test]
    fn test_quarter_turn_maps_y_axis_to_x_axis() {
        let m = TransAffine::new_rotation(PI / 2.0);
        let (ux, uy) = m.to_user(0.0, 1.0);
        assert!((ux - 1.0).abs() < EPS, "ux = {}", ux);
        assert!(uy.abs() < EPS, "uy = {}", uy);
    }

    #[test]
    fn test_translated_origin_maps_to_zero() {
        let mut m = TransAffine::new_rotation(deg2rad(45.0));
        m.translate(-150.0, 20.0);
        let (ux, uy) = m.to_user(-150.0, 20.0);
        assert!(ux.abs() < EPS && uy.abs() < EPS, "({}, {})", ux, uy);

        // A point one unit along the rotated x axis from the new origin.
        let (s, c) = deg2rad(45.0).sin_cos();
        let (ux, uy) = m.to_user(-150.0 + c, 20.0 + s);
        assert!((ux - 1.0).abs() < EPS, "ux = {}", ux);
        assert!(uy.abs() < EPS, "uy = {}", uy);
    }

    #[test]
    fn test_user_angle_is_offset_by_rotation() {
        let m = TransAffine::new_rotation(deg2rad(30.0));
        let (ux, uy) = m.to_user(0.0, 2.0);
        let angle = uy.atan2(ux);
        assert!((angle - deg2rad(60.0)).abs() < 1e-9, "angle = {}", angle);
    }
}
