//! World/screen coordinate transform.
//!
//! `screen = (world - position) * scale`. The caller keeps `scale` inside
//! its own `[min, max]` range and must never drive it to zero or below;
//! the camera does not check.

use cappy_view_model::geometry::{Point2D, ScreenRect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point shown at the screen origin.
    position: Point2D,
    /// Screen pixels per world pixel.
    scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point2D::ZERO,
            scale: 1.0,
        }
    }
}

impl Camera {
    pub fn new(position: Point2D, scale: f64) -> Self {
        Self { position, scale }
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn set_position(&mut self, position: Point2D) {
        self.position = position;
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn world_to_screen(&self, world: Point2D) -> Point2D {
        (world - self.position) * self.scale
    }

    pub fn screen_to_world(&self, screen: Point2D) -> Point2D {
        screen * (1.0 / self.scale) + self.position
    }

    /// Map a world rectangle to the screen.
    pub fn rect_to_screen(&self, world: ScreenRect) -> ScreenRect {
        let origin = self.world_to_screen(world.top_left());
        ScreenRect::new(
            origin.x,
            origin.y,
            world.w * self.scale,
            world.h * self.scale,
        )
    }

    /// Move the view by a screen-space drag delta; content follows the drag.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.position -= Point2D::new(dx, dy) * (1.0 / self.scale);
    }

    /// Multiply the scale by `1 + amount`, keeping the world point under
    /// `anchor` (screen space) where it is on screen.
    pub fn zoom(&mut self, amount: f64, anchor: Point2D) {
        let before = self.screen_to_world(anchor);
        self.scale *= 1.0 + amount;
        let after = self.screen_to_world(anchor);
        self.position -= after - before;
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.position = Point2D::ZERO;
    }
}
