//! Camera with polled zoom and fling animations.

use std::ops::{Deref, DerefMut};

use cappy_view_model::geometry::Point2D;

use crate::animation::{Fling, Ramp};
use crate::camera::Camera;

/// Lowest per-step zoom amount. `zoom(amount)` multiplies the scale by
/// `1 + amount`, so anything at or below -1 would flip or zero it.
const MIN_ZOOM_STEP: f64 = -0.999;

/// A [`Camera`] plus two independent animations.
///
/// The zoom ramp repeatedly applies [`Camera::zoom`] around a fixed screen
/// anchor; the fling repeatedly applies [`Camera::pan`] with a decaying
/// velocity. Neither advances on its own: call [`AnimatedCamera::update`]
/// once per frame.
#[derive(Debug, Clone, Default)]
pub struct AnimatedCamera {
    camera: Camera,
    zoom: Ramp,
    zoom_anchor: Point2D,
    fling: Fling,
}

impl AnimatedCamera {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Start a zoom ramp of `amount` around the screen point `anchor`,
    /// spread over `duration_ms`. Replaces any running zoom.
    pub fn start_zoom(&mut self, amount: f64, anchor: Point2D, duration_ms: u64, now_ms: u64) {
        let amount = if amount <= -1.0 {
            tracing::warn!(amount, "zoom amount would collapse the scale; clamping");
            MIN_ZOOM_STEP
        } else {
            amount
        };
        self.zoom_anchor = anchor;
        self.zoom.start(amount, duration_ms, now_ms);
    }

    pub fn cancel_zoom(&mut self) {
        self.zoom.cancel();
    }

    /// Start an inertial pan with a screen-space `velocity` (pixels per
    /// tick) that is multiplied by `damping` every `tick_ms`.
    pub fn start_pan(
        &mut self,
        velocity: Point2D,
        damping: f64,
        tick_ms: u64,
        stop_epsilon: f64,
        now_ms: u64,
    ) {
        self.fling
            .start(velocity, damping, tick_ms, stop_epsilon, now_ms);
    }

    pub fn cancel_pan(&mut self) {
        self.fling.cancel();
    }

    /// Advance both animations to `now_ms`. Returns whether either is
    /// still running afterwards.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if let Some(step) = self.zoom.advance(now_ms) {
            if step != 0.0 {
                self.camera.zoom(step.max(MIN_ZOOM_STEP), self.zoom_anchor);
            }
        }

        if let Some(delta) = self.fling.advance(now_ms) {
            if delta != Point2D::ZERO {
                self.camera.pan(delta.x, delta.y);
            }
        }

        self.is_animating()
    }

    pub fn is_zooming(&self) -> bool {
        self.zoom.is_active()
    }

    pub fn is_panning(&self) -> bool {
        self.fling.is_active()
    }

    pub fn is_animating(&self) -> bool {
        self.is_zooming() || self.is_panning()
    }

    /// Reset the transform and stop both animations.
    pub fn reset(&mut self) {
        self.cancel_zoom();
        self.cancel_pan();
        self.camera.reset();
    }
}

impl Deref for AnimatedCamera {
    type Target = Camera;

    fn deref(&self) -> &Camera {
        &self.camera
    }
}

impl DerefMut for AnimatedCamera {
    fn deref_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
