use cappy_view_model::event::InputEvent;

use super::{ModeTag, MoveMode, ViewOutcome};
use crate::animation::Ramp;
use crate::bindings::{resolve, KeyAction};
use crate::context::ViewContext;
use crate::machine::Mode;
use crate::render::RenderSink;

/// Spotlight around the pointer. Shift+wheel resizes it.
#[derive(Debug, Default)]
pub struct FlashlightMode {
    radius: f64,
    resize: Ramp,
}

impl FlashlightMode {
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Mode<ViewContext, ModeTag> for FlashlightMode {
    fn tag(&self) -> ModeTag {
        ModeTag::Flashlight
    }

    fn on_enter(&mut self, ctx: &mut ViewContext) {
        self.radius = ctx.config.flashlight.size;
        ctx.cursor.visible = false;
    }

    fn on_exit(&mut self, ctx: &mut ViewContext) {
        ctx.cursor.visible = true;
    }

    fn handle_event(&mut self, ctx: &mut ViewContext, event: &InputEvent) -> ViewOutcome {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                match resolve(&ctx.config.keys, key, *modifiers) {
                    Some(KeyAction::Flashlight) => ViewOutcome::switch_to(MoveMode),
                    _ => ViewOutcome::ignored(),
                }
            }
            InputEvent::MouseWheel {
                delta, modifiers, ..
            } if modifiers.shift => {
                // Wheel toward the user grows the light.
                let amount = ctx.config.flashlight.resize_amount;
                let amount = if *delta <= 0.0 { amount } else { -amount };
                self.resize
                    .start(amount, ctx.config.flashlight.resize_ms, ctx.now_ms);
                ViewOutcome::consumed()
            }
            _ => ViewOutcome::ignored(),
        }
    }

    fn draw_frame(&mut self, ctx: &mut ViewContext, sink: &mut dyn RenderSink) -> bool {
        let camera_animating = ctx.advance_camera();

        if let Some(step) = self.resize.advance(ctx.now_ms) {
            self.radius += step;
            if self.radius <= 0.0 {
                self.radius = 0.0;
                self.resize.cancel();
            }
        }

        ctx.render_capture(sink);
        let colors = ctx.flashlight_colors();
        sink.spotlight_circle(ctx.pointer.position, self.radius, &colors);

        camera_animating || self.resize.is_active()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::render::{DrawCommand, RecordingSink};
    use cappy_common::config::AppConfig;
    use cappy_view_model::capture::RgbImage;
    use cappy_view_model::event::Modifiers;

    fn entered() -> (FlashlightMode, ViewContext) {
        let mut ctx = ViewContext::new(Arc::new(RgbImage::gradient(20, 20)), AppConfig::default());
        let mut mode = FlashlightMode::default();
        mode.on_enter(&mut ctx);
        (mode, ctx)
    }

    fn shift_wheel(delta: f64) -> InputEvent {
        InputEvent::wheel(delta, 0.0, 0.0).with_modifiers(Modifiers::SHIFT)
    }

    #[test]
    fn test_enter_hides_cursor_and_sets_radius() {
        let (mut mode, mut ctx) = entered();
        assert!(!ctx.cursor.visible);
        assert_eq!(mode.radius(), 150.0);
        mode.on_exit(&mut ctx);
        assert!(ctx.cursor.visible);
    }

    #[test]
    fn test_shift_wheel_down_grows_radius_over_time() {
        let (mut mode, mut ctx) = entered();
        ctx.now_ms = 1_000;
        assert!(mode.handle_event(&mut ctx, &shift_wheel(-1.0)).consumed);

        let mut sink = RecordingSink::new();
        ctx.now_ms = 1_010;
        assert!(mode.draw_frame(&mut ctx, &mut sink));
        assert!((mode.radius() - 210.0).abs() < 1e-9);

        ctx.now_ms = 1_100;
        assert!(!mode.draw_frame(&mut ctx, &mut sink));
        assert!((mode.radius() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_radius_never_negative() {
        let (mut mode, mut ctx) = entered();
        let mut sink = RecordingSink::new();
        for i in 0..3 {
            ctx.now_ms = i * 100;
            mode.handle_event(&mut ctx, &shift_wheel(1.0));
            ctx.now_ms += 50;
            mode.draw_frame(&mut ctx, &mut sink);
        }
        assert_eq!(mode.radius(), 0.0);
        assert!(matches!(
            sink.commands().last(),
            Some(DrawCommand::SpotlightCircle { radius, .. }) if *radius == 0.0
        ));
    }

    #[test]
    fn test_plain_wheel_is_left_for_camera_zoom() {
        let (mut mode, mut ctx) = entered();
        assert!(!mode.handle_event(&mut ctx, &InputEvent::wheel(1.0, 0.0, 0.0)).consumed);
    }
}
