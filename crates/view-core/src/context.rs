//! State shared by every interaction mode.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use cappy_common::config::AppConfig;
use cappy_view_model::capture::{CaptureSurface, Rgb};
use cappy_view_model::crop::CropBounds;
use cappy_view_model::event::{ButtonMask, Modifiers};
use cappy_view_model::geometry::{Point2D, ScreenRect};

use crate::animated::AnimatedCamera;
use crate::render::{RenderSink, Rgba, SpotlightColors};

const GRID_MINOR_ALPHA: u8 = 75;
const GRID_MAJOR_ALPHA: u8 = 150;

/// System cursor shapes the host can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorIcon {
    #[default]
    Default,
    Crosshair,
    /// Four-way arrow shown while panning.
    Move,
    ResizeNs,
    ResizeEw,
    ResizeNwse,
    ResizeNesw,
}

/// Cursor appearance requested by the core. The host mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    pub visible: bool,
    pub icon: CursorIcon,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            visible: true,
            icon: CursorIcon::Default,
        }
    }
}

/// Side effects the core cannot perform itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HostRequest {
    CopyToClipboard(String),
    /// Export this region of the capture.
    SaveCrop(CropBounds),
}

/// Last known pointer state, updated before any mode sees an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub position: Point2D,
    pub buttons: ButtonMask,
    pub modifiers: Modifiers,
    /// Screen delta of the most recent primary-button drag motion.
    pub last_drag: Point2D,
    pub last_drag_ms: u64,
}

/// Everything a mode may read or change.
pub struct ViewContext {
    pub camera: AnimatedCamera,
    /// Working sub-region of the capture.
    pub crop: CropBounds,
    pub capture: Arc<dyn CaptureSurface>,
    pub config: AppConfig,
    pub pointer: PointerState,
    pub cursor: CursorState,
    /// Drawable size in screen pixels.
    pub viewport: Point2D,
    /// Clock reading for the event or frame being processed.
    pub now_ms: u64,
    pub grid_enabled: bool,
    requests: Vec<HostRequest>,
}

impl ViewContext {
    pub fn new(capture: Arc<dyn CaptureSurface>, config: AppConfig) -> Self {
        let (width, height) = (capture.width(), capture.height());
        let crop = CropBounds::from_pre_crop(config.window.pre_crop, width, height);
        let grid_enabled = config.appearance.grid_enabled;
        Self {
            camera: AnimatedCamera::default(),
            crop,
            capture,
            config,
            pointer: PointerState::default(),
            cursor: CursorState::default(),
            viewport: Point2D::new(width as f64, height as f64),
            now_ms: 0,
            grid_enabled,
            requests: Vec::new(),
        }
    }

    /// Start a wheel zoom around `anchor`, within the configured range.
    ///
    /// Zooming in is allowed while the scale is at most `max_scale`, out
    /// while it is at least `min_scale`, so a ramp may overshoot by one step.
    pub fn zoom_step(&mut self, zoom_in: bool, anchor: Point2D) -> bool {
        let view = &self.config.view;
        let scale = self.camera.scale();
        let (amount, duration_ms) = if zoom_in {
            if scale > view.max_scale {
                return false;
            }
            (view.zoom_in_amount, view.zoom_in_ms)
        } else {
            if scale < view.min_scale {
                return false;
            }
            (-view.zoom_out_amount, view.zoom_out_ms)
        };
        self.camera
            .start_zoom(amount, anchor, duration_ms, self.now_ms);
        true
    }

    /// Step camera animations to `now_ms`.
    pub fn advance_camera(&mut self) -> bool {
        self.camera.update(self.now_ms)
    }

    /// Working crop back to the whole capture.
    pub fn reset_crop(&mut self) {
        self.crop = CropBounds::full(self.capture.width(), self.capture.height());
        tracing::info!(crop = %self.crop, "Crop reset");
    }

    /// Capture pixel under a world point, when it lies inside the crop.
    ///
    /// The point is floored, not rounded: a world point belongs to the
    /// pixel whose square contains it, which is the one the grid outlines.
    pub fn pixel_at_world(&self, world: Point2D) -> Option<(i64, i64, Rgb)> {
        let (px, py) = (world.x.floor() as i64, world.y.floor() as i64);
        if !self.crop.contains_pixel(px, py) {
            return None;
        }
        self.capture.pixel(px, py).map(|rgb| (px, py, rgb))
    }

    /// Capture pixel under the pointer.
    pub fn pixel_under_pointer(&self) -> Option<(i64, i64, Rgb)> {
        self.pixel_at_world(self.camera.screen_to_world(self.pointer.position))
    }

    /// Background, the cropped capture, then the pixel grid when shown.
    pub fn render_capture(&self, sink: &mut dyn RenderSink) {
        sink.clear(Rgba::opaque(self.config.appearance.background_color));
        sink.draw_capture(self.crop, self.crop_on_screen());

        if self.grid_visible() {
            self.render_grid(sink);
        }
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_enabled && self.camera.scale() >= self.config.appearance.grid_min_scale
    }

    /// One line per pixel boundary inside both the crop and the viewport;
    /// every `grid_major_every`-th line is drawn heavier on top.
    pub fn render_grid(&self, sink: &mut dyn RenderSink) {
        let top_left = self.camera.screen_to_world(Point2D::ZERO);
        let bottom_right = self.camera.screen_to_world(self.viewport);

        let x1 = top_left.x.floor().max(self.crop.x as f64) as i64;
        let y1 = top_left.y.floor().max(self.crop.y as f64) as i64;
        let x2 = bottom_right.x.ceil().min(self.crop.right() as f64) as i64;
        let y2 = bottom_right.y.ceil().min(self.crop.bottom() as f64) as i64;
        if x1 > x2 || y1 > y2 {
            return;
        }

        let every = self.config.appearance.grid_major_every.max(1) as i64;
        let base = Rgba::opaque(self.config.appearance.grid_color);

        for major in [false, true] {
            let color = base.with_alpha(if major {
                GRID_MAJOR_ALPHA
            } else {
                GRID_MINOR_ALPHA
            });
            for x in (x1..=x2).filter(|x| (x % every == 0) == major) {
                sink.line(
                    self.camera.world_to_screen(Point2D::new(x as f64, y1 as f64)),
                    self.camera.world_to_screen(Point2D::new(x as f64, y2 as f64)),
                    color,
                );
            }
            for y in (y1..=y2).filter(|y| (y % every == 0) == major) {
                sink.line(
                    self.camera.world_to_screen(Point2D::new(x1 as f64, y as f64)),
                    self.camera.world_to_screen(Point2D::new(x2 as f64, y as f64)),
                    color,
                );
            }
        }
    }

    /// Spotlight colors for the flashlight.
    pub fn flashlight_colors(&self) -> SpotlightColors {
        let flashlight = &self.config.flashlight;
        SpotlightColors {
            inner: flashlight.center_inner_color.into(),
            edge: flashlight.center_outer_color.into(),
            outside: flashlight.outer_color.into(),
        }
    }

    /// The screen rectangle the working crop occupies.
    pub fn crop_on_screen(&self) -> ScreenRect {
        self.camera.rect_to_screen(self.crop.to_rect())
    }

    pub fn push_request(&mut self, request: HostRequest) {
        tracing::debug!(?request, "Host request queued");
        self.requests.push(request);
    }

    pub fn pending_requests(&self) -> &[HostRequest] {
        &self.requests
    }

    pub fn drain_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSink};
    use cappy_view_model::capture::RgbImage;

    fn context(width: u32, height: u32) -> ViewContext {
        ViewContext::new(Arc::new(RgbImage::gradient(width, height)), AppConfig::default())
    }

    #[test]
    fn test_pre_crop_applies_on_creation() {
        let mut config = AppConfig::default();
        config.window.pre_crop = [30, 40, 10, 20];
        let ctx = ViewContext::new(Arc::new(RgbImage::gradient(100, 100)), config);
        assert_eq!(ctx.crop, CropBounds::new(10, 20, 20, 20));
    }

    #[test]
    fn test_zoom_policy_respects_limits() {
        let mut ctx = context(100, 100);

        ctx.camera.set_scale(100.0);
        assert!(ctx.zoom_step(true, Point2D::ZERO));
        ctx.camera.cancel_zoom();
        ctx.camera.set_scale(100.5);
        assert!(!ctx.zoom_step(true, Point2D::ZERO));
        assert!(ctx.zoom_step(false, Point2D::ZERO));

        ctx.camera.cancel_zoom();
        ctx.camera.set_scale(0.2);
        assert!(!ctx.zoom_step(false, Point2D::ZERO));
        assert!(ctx.zoom_step(true, Point2D::ZERO));
    }

    #[test]
    fn test_pixel_lookup_respects_crop() {
        let mut ctx = context(100, 100);
        ctx.crop = CropBounds::new(10, 10, 20, 20);

        assert!(ctx.pixel_at_world(Point2D::new(5.0, 5.0)).is_none());
        let (x, y, _) = ctx.pixel_at_world(Point2D::new(12.7, 29.9)).unwrap();
        assert_eq!((x, y), (12, 29));
        assert!(ctx.pixel_at_world(Point2D::new(30.0, 15.0)).is_none());
    }

    #[test]
    fn test_render_capture_without_grid() {
        let ctx = context(64, 48);
        let mut sink = RecordingSink::new();
        ctx.render_capture(&mut sink);

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.commands()[1],
            DrawCommand::Capture {
                src: CropBounds::full(64, 48),
                dst: ScreenRect::new(0.0, 0.0, 64.0, 48.0),
            }
        );
    }

    #[test]
    fn test_grid_covers_visible_crop_only() {
        let mut ctx = context(1000, 1000);
        ctx.viewport = Point2D::new(100.0, 50.0);
        ctx.camera.set_scale(10.0);

        let mut sink = RecordingSink::new();
        ctx.render_capture(&mut sink);

        // 10x5 visible pixels: 11 vertical and 6 horizontal boundaries.
        assert_eq!(sink.line_count(), 17);

        ctx.grid_enabled = false;
        let mut sink = RecordingSink::new();
        ctx.render_capture(&mut sink);
        assert_eq!(sink.line_count(), 0);
    }

    #[test]
    fn test_requests_drain_in_order() {
        let mut ctx = context(10, 10);
        ctx.push_request(HostRequest::CopyToClipboard("0x000000".into()));
        ctx.push_request(HostRequest::SaveCrop(ctx.crop));
        assert_eq!(ctx.pending_requests().len(), 2);

        let drained = ctx.drain_requests();
        assert_eq!(drained[0], HostRequest::CopyToClipboard("0x000000".into()));
        assert!(ctx.pending_requests().is_empty());
    }
}
