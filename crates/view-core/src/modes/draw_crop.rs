use cappy_view_model::event::{InputEvent, MouseButton};
use cappy_view_model::geometry::Point2D;

use super::{ModeTag, MoveMode, ViewOutcome};
use crate::bindings::{resolve, KeyAction};
use crate::camera::Camera;
use crate::context::{CursorIcon, ViewContext};
use crate::machine::Mode;
use crate::render::{LabelAnchor, RenderSink, Rgba, SpotlightColors};
use crate::selection::{CropSelection, DragOutcome, ResizeHandle};

/// Distance between the pointer and the live size readout.
const READOUT_OFFSET: f64 = 25.0;

const SELECTION_SHADE: SpotlightColors = SpotlightColors {
    inner: Rgba::TRANSPARENT,
    edge: Rgba::TRANSPARENT,
    outside: Rgba::new(128, 128, 128, 128),
};

fn cursor_for(handle: ResizeHandle) -> CursorIcon {
    match handle {
        ResizeHandle::N | ResizeHandle::S => CursorIcon::ResizeNs,
        ResizeHandle::E | ResizeHandle::W => CursorIcon::ResizeEw,
        ResizeHandle::NE | ResizeHandle::SW => CursorIcon::ResizeNesw,
        ResizeHandle::NW | ResizeHandle::SE => CursorIcon::ResizeNwse,
        ResizeHandle::Center | ResizeHandle::None => CursorIcon::Default,
    }
}

/// Draws a crop selection with the secondary button, then lets the user
/// resize or move it until it is committed or abandoned.
#[derive(Debug)]
pub struct DrawCropMode {
    selection: CropSelection,
    /// Camera the screen-space corners were last expressed against.
    seen: Camera,
}

impl DrawCropMode {
    /// Start drawing at the screen point `at`.
    pub fn new(at: Point2D, camera: Camera) -> Self {
        Self {
            selection: CropSelection::new(at),
            seen: camera,
        }
    }

    pub fn selection(&self) -> &CropSelection {
        &self.selection
    }

    /// Re-anchor a drawing selection after the camera moved.
    fn sync(&mut self, camera: &Camera) {
        if *camera != self.seen {
            self.selection.reproject(&self.seen, camera);
            self.seen = *camera;
        }
    }

    fn follow_pointer(&mut self, ctx: &ViewContext) {
        if self.selection.handle() != ResizeHandle::Center {
            self.selection
                .drag_to(ctx.pointer.position, ctx.pointer.modifiers.shift);
        }
    }

    fn draw_readout(&self, ctx: &ViewContext, sink: &mut dyn RenderSink) {
        if self.selection.is_drawing() {
            let (start, end) = self.selection.world_corners(ctx.camera.camera());
            let (w, h) = (end.x - start.x, end.y - start.y);
            let origin = start.min(end);
            let text = format!(
                "x: {:.2} y: {:.2}\nw: {:.2} h: {:.2}",
                origin.x,
                origin.y,
                w.abs(),
                h.abs()
            );

            // Keep the readout on the far side of the pointer from the anchor.
            let empty = w == 0.0 && h == 0.0;
            let mouse = ctx.pointer.position;
            let (dx, dy, placement) = match (w > 0.0 || empty, h > 0.0 || empty) {
                (true, true) => (READOUT_OFFSET, READOUT_OFFSET, LabelAnchor::TopLeft),
                (false, true) => (-READOUT_OFFSET, READOUT_OFFSET, LabelAnchor::TopRight),
                (true, false) => (READOUT_OFFSET, -READOUT_OFFSET, LabelAnchor::BottomLeft),
                (false, false) => (-READOUT_OFFSET, -READOUT_OFFSET, LabelAnchor::BottomRight),
            };
            sink.label(Point2D::new(mouse.x + dx, mouse.y + dy), &text, placement);
        } else if let Some(bounds) = self.selection.bounds() {
            sink.label(
                ctx.viewport,
                &format!("x: {} y: {}\nw: {} h: {}", bounds.x, bounds.y, bounds.w, bounds.h),
                LabelAnchor::BottomRight,
            );
        }
    }
}

impl Mode<ViewContext, ModeTag> for DrawCropMode {
    fn tag(&self) -> ModeTag {
        ModeTag::DrawCrop
    }

    fn on_enter(&mut self, ctx: &mut ViewContext) {
        ctx.cursor.visible = true;
        ctx.cursor.icon = CursorIcon::Crosshair;
    }

    fn on_exit(&mut self, ctx: &mut ViewContext) {
        ctx.cursor.icon = CursorIcon::Default;
    }

    fn handle_event(&mut self, ctx: &mut ViewContext, event: &InputEvent) -> ViewOutcome {
        self.sync(ctx.camera.camera());

        match event {
            InputEvent::KeyDown { key, modifiers } => {
                match resolve(&ctx.config.keys, key, *modifiers) {
                    Some(KeyAction::Commit) => match self.selection.bounds() {
                        Some(bounds) => {
                            tracing::info!(crop = %bounds, "Crop committed");
                            ctx.crop = bounds;
                            ViewOutcome::switch_to(MoveMode)
                        }
                        None => ViewOutcome::ignored(),
                    },
                    Some(KeyAction::Cancel) => ViewOutcome::switch_to(MoveMode),
                    _ => ViewOutcome::ignored(),
                }
            }

            InputEvent::MouseButtonDown { button, .. } if !self.selection.is_drawing() => {
                match button {
                    MouseButton::Secondary if self.selection.begin_drag(ctx.camera.camera()) => {
                        ctx.cursor.icon = CursorIcon::Crosshair;
                        ViewOutcome::consumed()
                    }
                    // Nothing hovered: the session starts a fresh selection.
                    _ => ViewOutcome::ignored(),
                }
            }

            InputEvent::MouseButtonUp {
                button: MouseButton::Secondary,
                ..
            } if self.selection.is_drawing() => {
                match self.selection.commit(ctx.camera.camera(), ctx.crop) {
                    DragOutcome::Cancelled => {
                        tracing::debug!("Selection collapsed; leaving crop mode");
                        ViewOutcome::switch_to(MoveMode)
                    }
                    DragOutcome::Selected(_) => {
                        ctx.cursor.icon = CursorIcon::Default;
                        ViewOutcome::consumed()
                    }
                }
            }

            InputEvent::MouseMotion {
                xrel, yrel, buttons, ..
            } => {
                if self.selection.is_drawing() {
                    if self.selection.handle() == ResizeHandle::Center {
                        if buttons.secondary {
                            self.selection.translate(*xrel, *yrel);
                        }
                    } else {
                        self.follow_pointer(ctx);
                    }
                } else if !buttons.primary {
                    let handle = self.selection.hover(
                        ctx.pointer.position,
                        ctx.camera.camera(),
                        ctx.config.view.handle_size,
                    );
                    ctx.cursor.icon = cursor_for(handle);
                }
                // Left to the session so a primary drag still pans.
                ViewOutcome::ignored()
            }

            _ => ViewOutcome::ignored(),
        }
    }

    fn draw_frame(&mut self, ctx: &mut ViewContext, sink: &mut dyn RenderSink) -> bool {
        self.sync(ctx.camera.camera());
        let animating = ctx.advance_camera();
        self.sync(ctx.camera.camera());

        if self.selection.is_drawing() {
            self.follow_pointer(ctx);
        }

        ctx.render_capture(sink);

        let rect = self.selection.screen_rect(ctx.camera.camera());
        sink.spotlight_rect(rect, &SELECTION_SHADE);
        sink.stroke_rect(rect, Rgba::RED);
        self.draw_readout(ctx, sink);

        animating
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::render::RecordingSink;
    use cappy_common::config::AppConfig;
    use cappy_view_model::capture::RgbImage;
    use cappy_view_model::crop::CropBounds;
    use cappy_view_model::event::{ButtonMask, Modifiers};

    fn context() -> ViewContext {
        ViewContext::new(Arc::new(RgbImage::gradient(200, 200)), AppConfig::default())
    }

    fn start_at(ctx: &mut ViewContext, x: f64, y: f64) -> DrawCropMode {
        ctx.pointer.position = Point2D::new(x, y);
        let mut mode = DrawCropMode::new(Point2D::new(x, y), *ctx.camera.camera());
        mode.on_enter(ctx);
        mode
    }

    fn drag(mode: &mut DrawCropMode, ctx: &mut ViewContext, x: f64, y: f64) {
        let from = ctx.pointer.position;
        ctx.pointer.position = Point2D::new(x, y);
        let held = ButtonMask::default().with(MouseButton::Secondary);
        mode.handle_event(ctx, &InputEvent::motion(x, y, x - from.x, y - from.y, held));
    }

    fn release(mode: &mut DrawCropMode, ctx: &mut ViewContext) -> ViewOutcome {
        let p = ctx.pointer.position;
        mode.handle_event(ctx, &InputEvent::button_up(MouseButton::Secondary, p.x, p.y))
    }

    #[test]
    fn test_draw_release_and_commit() {
        let mut ctx = context();
        let mut mode = start_at(&mut ctx, 20.0, 30.0);
        assert_eq!(ctx.cursor.icon, CursorIcon::Crosshair);

        drag(&mut mode, &mut ctx, 70.0, 90.0);
        assert!(release(&mut mode, &mut ctx).consumed);
        assert_eq!(mode.selection().bounds(), Some(CropBounds::new(20, 30, 50, 60)));

        let outcome = mode.handle_event(&mut ctx, &InputEvent::key("x", Modifiers::NONE));
        assert_eq!(outcome.transition.map(|m| m.tag()), Some(ModeTag::Move));
        assert_eq!(ctx.crop, CropBounds::new(20, 30, 50, 60));
    }

    #[test]
    fn test_click_without_drag_leaves_mode() {
        let mut ctx = context();
        let mut mode = start_at(&mut ctx, 20.0, 30.0);
        let outcome = release(&mut mode, &mut ctx);
        assert_eq!(outcome.transition.map(|m| m.tag()), Some(ModeTag::Move));
        assert_eq!(ctx.crop, CropBounds::full(200, 200));
    }

    #[test]
    fn test_commit_key_ignored_while_drawing() {
        let mut ctx = context();
        let mut mode = start_at(&mut ctx, 20.0, 30.0);
        drag(&mut mode, &mut ctx, 70.0, 90.0);
        let outcome = mode.handle_event(&mut ctx, &InputEvent::key("x", Modifiers::NONE));
        assert!(!outcome.consumed);
        assert!(outcome.transition.is_none());
    }

    #[test]
    fn test_hover_sets_resize_cursor_and_drag_resizes() {
        let mut ctx = context();
        let mut mode = start_at(&mut ctx, 20.0, 20.0);
        drag(&mut mode, &mut ctx, 120.0, 120.0);
        release(&mut mode, &mut ctx);

        ctx.pointer.position = Point2D::new(118.0, 70.0);
        mode.handle_event(
            &mut ctx,
            &InputEvent::motion(118.0, 70.0, 0.0, 0.0, ButtonMask::default()),
        );
        assert_eq!(ctx.cursor.icon, CursorIcon::ResizeEw);

        let down = InputEvent::button_down(MouseButton::Secondary, 118.0, 70.0);
        assert!(mode.handle_event(&mut ctx, &down).consumed);
        drag(&mut mode, &mut ctx, 150.0, 10.0);
        release(&mut mode, &mut ctx);
        assert_eq!(mode.selection().bounds(), Some(CropBounds::new(20, 20, 130, 100)));
    }

    #[test]
    fn test_selection_follows_camera_pan_while_drawing() {
        let mut ctx = context();
        let mut mode = start_at(&mut ctx, 20.0, 20.0);
        drag(&mut mode, &mut ctx, 60.0, 60.0);

        ctx.camera.pan(10.0, 5.0);
        let mut sink = RecordingSink::new();
        mode.draw_frame(&mut ctx, &mut sink);

        // Anchor corner moves with the content, dragged corner stays on the pointer.
        assert_eq!(mode.selection().start(), Point2D::new(30.0, 25.0));
        assert_eq!(mode.selection().end(), Point2D::new(60.0, 60.0));
    }

    #[test]
    fn test_cancel_key_leaves_mode() {
        let mut ctx = context();
        let mut mode = start_at(&mut ctx, 20.0, 20.0);
        let outcome = mode.handle_event(&mut ctx, &InputEvent::key("escape", Modifiers::NONE));
        assert_eq!(outcome.transition.map(|m| m.tag()), Some(ModeTag::Move));
        mode.on_exit(&mut ctx);
        assert_eq!(ctx.cursor.icon, CursorIcon::Default);
    }

    #[test]
    fn test_frame_draws_outline_and_readout() {
        let mut ctx = context();
        let mut mode = start_at(&mut ctx, 10.0, 10.0);
        drag(&mut mode, &mut ctx, 40.0, 30.0);
        let mut sink = RecordingSink::new();
        mode.draw_frame(&mut ctx, &mut sink);
        assert_eq!(
            sink.labels(),
            vec!["x: 10.00 y: 10.00\nw: 30.00 h: 20.00"]
        );
    }
}
