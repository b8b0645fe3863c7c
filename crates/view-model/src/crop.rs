//! Crop bounds: the active sub-rectangle of the capture.
//!
//! Unlike screen geometry, crop bounds are whole image pixels. They are
//! always kept inside the capture they were built for.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point2D, ScreenRect};

/// A pixel rectangle `(x, y, w, h)` in world (image) space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CropBounds {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl CropBounds {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Bounds covering a whole capture.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Build the initial crop from a configured corner pair `[x1, y1, x2, y2]`.
    ///
    /// Negative near corners clamp to zero, a non-positive far corner means
    /// "to the edge of the capture", every corner clamps to the capture size,
    /// and the corners may be given in either order.
    pub fn from_pre_crop(corners: [i32; 4], width: u32, height: u32) -> Self {
        let [x1, y1, x2, y2] = corners;
        let (w, h) = (width as i64, height as i64);

        let x1 = (x1 as i64).clamp(0, w);
        let y1 = (y1 as i64).clamp(0, h);
        let x2 = if x2 <= 0 { w } else { (x2 as i64).min(w) };
        let y2 = if y2 <= 0 { h } else { (y2 as i64).min(h) };

        Self {
            x: x1.min(x2) as u32,
            y: y1.min(y2) as u32,
            w: (x2 - x1).unsigned_abs() as u32,
            h: (y2 - y1).unsigned_abs() as u32,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Whether pixel `(px, py)` lies inside the bounds.
    pub fn contains_pixel(&self, px: i64, py: i64) -> bool {
        px >= self.x as i64
            && px < self.right() as i64
            && py >= self.y as i64
            && py < self.bottom() as i64
    }

    /// Clamp a world point onto the closed rectangle `[x, x+w] × [y, y+h]`.
    pub fn clamp_point(&self, p: Point2D) -> Point2D {
        Point2D::new(
            p.x.clamp(self.x as f64, self.right() as f64),
            p.y.clamp(self.y as f64, self.bottom() as f64),
        )
    }

    /// The bounds as a floating-point world rectangle.
    pub fn to_rect(&self) -> ScreenRect {
        ScreenRect::new(self.x as f64, self.y as f64, self.w as f64, self.h as f64)
    }
}

impl std::fmt::Display for CropBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x: {} y: {} w: {} h: {}", self.x, self.y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pre_crop_zero_means_full_capture() {
        let crop = CropBounds::from_pre_crop([0, 0, 0, 0], 1920, 1080);
        assert_eq!(crop, CropBounds::full(1920, 1080));
    }

    #[test]
    fn test_pre_crop_reversed_corners() {
        let crop = CropBounds::from_pre_crop([500, 400, 100, 50], 1920, 1080);
        assert_eq!(crop, CropBounds::new(100, 50, 400, 350));
    }

    #[test]
    fn test_pre_crop_clamps_to_capture() {
        let crop = CropBounds::from_pre_crop([-20, -5, 5000, 5000], 800, 600);
        assert_eq!(crop, CropBounds::full(800, 600));

        let crop = CropBounds::from_pre_crop([900, 0, 0, 0], 800, 600);
        assert_eq!(crop, CropBounds::new(800, 0, 0, 600));
        assert!(crop.is_empty());
    }

    #[test]
    fn test_contains_pixel_is_half_open() {
        let crop = CropBounds::new(10, 10, 50, 50);
        assert!(crop.contains_pixel(10, 10));
        assert!(crop.contains_pixel(59, 59));
        assert!(!crop.contains_pixel(60, 20));
        assert!(!crop.contains_pixel(9, 20));
    }

    #[test]
    fn test_clamp_point_is_closed() {
        let crop = CropBounds::new(10, 10, 50, 50);
        assert_eq!(
            crop.clamp_point(Point2D::new(0.0, 100.0)),
            Point2D::new(10.0, 60.0)
        );
        assert_eq!(
            crop.clamp_point(Point2D::new(30.0, 30.0)),
            Point2D::new(30.0, 30.0)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CropBounds::new(1, 2, 3, 4).to_string(),
            "x: 1 y: 2 w: 3 h: 4"
        );
    }

    proptest! {
        #[test]
        fn prop_pre_crop_stays_inside_capture(
            corners in prop::array::uniform4(-3000i32..3000),
            width in 1u32..2000,
            height in 1u32..2000,
        ) {
            let crop = CropBounds::from_pre_crop(corners, width, height);
            prop_assert!(crop.right() <= width);
            prop_assert!(crop.bottom() <= height);
        }

        #[test]
        fn prop_clamped_points_lie_in_bounds(
            x in -1e4f64..1e4,
            y in -1e4f64..1e4,
        ) {
            let crop = CropBounds::new(10, 20, 300, 200);
            let p = crop.clamp_point(Point2D::new(x, y));
            prop_assert!(p.x >= 10.0 && p.x <= 310.0);
            prop_assert!(p.y >= 20.0 && p.y <= 220.0);
        }
    }
}
