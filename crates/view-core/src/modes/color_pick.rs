use cappy_view_model::event::InputEvent;
use cappy_view_model::geometry::{Point2D, ScreenRect};

use super::{ModeTag, MoveMode, ViewOutcome};
use crate::bindings::{resolve, KeyAction};
use crate::context::{HostRequest, ViewContext};
use crate::machine::Mode;
use crate::render::{LabelAnchor, RenderSink, Rgba};

/// Above this scale the picked pixel is outlined and the cursor hidden.
const HIGHLIGHT_MIN_SCALE: f64 = 7.5;
const PANEL_WIDTH: f64 = 120.0;
const PANEL_OFFSET: f64 = 15.0;
/// Room left for the two-line readout between the anchor and the swatch.
const READOUT_HEIGHT: f64 = 40.0;

/// Shows the color of the pixel under the pointer and copies it on
/// request.
#[derive(Debug, Default)]
pub struct ColorPickMode;

impl Mode<ViewContext, ModeTag> for ColorPickMode {
    fn tag(&self) -> ModeTag {
        ModeTag::ColorPick
    }

    fn on_enter(&mut self, ctx: &mut ViewContext) {
        ctx.cursor.visible = true;
    }

    fn on_exit(&mut self, ctx: &mut ViewContext) {
        ctx.cursor.visible = true;
    }

    fn handle_event(&mut self, ctx: &mut ViewContext, event: &InputEvent) -> ViewOutcome {
        let InputEvent::KeyDown { key, modifiers } = event else {
            return ViewOutcome::ignored();
        };

        match resolve(&ctx.config.keys, key, *modifiers) {
            Some(KeyAction::ColorPick) => ViewOutcome::switch_to(MoveMode),
            Some(KeyAction::Copy { format, separated }) => {
                let Some((x, y, rgb)) = ctx.pixel_under_pointer() else {
                    return ViewOutcome::ignored();
                };
                let text = format.render(&rgb, separated);
                tracing::info!(x, y, %text, "Copying picked color");
                ctx.push_request(HostRequest::CopyToClipboard(text));
                ViewOutcome::consumed()
            }
            _ => ViewOutcome::ignored(),
        }
    }

    fn draw_frame(&mut self, ctx: &mut ViewContext, sink: &mut dyn RenderSink) -> bool {
        let animating = ctx.advance_camera();
        ctx.render_capture(sink);

        let Some((px, py, rgb)) = ctx.pixel_under_pointer() else {
            ctx.cursor.visible = true;
            return animating;
        };

        let scale = ctx.camera.scale();
        let mut anchor = ctx.pointer.position;

        if scale > HIGHLIGHT_MIN_SCALE {
            let origin = ctx
                .camera
                .world_to_screen(Point2D::new(px as f64, py as f64));
            let outline = if rgb.brightness() > 0.5 {
                Rgba::BLACK
            } else {
                Rgba::WHITE
            };
            let thickness = (scale / HIGHLIGHT_MIN_SCALE) as usize;
            for i in 0..thickness {
                let inset = i as f64;
                sink.stroke_rect(
                    ScreenRect::new(
                        origin.x + inset,
                        origin.y + inset,
                        scale - 2.0 * inset,
                        scale - 2.0 * inset,
                    ),
                    outline,
                );
            }
            anchor = origin;
            ctx.cursor.visible = false;
        } else {
            ctx.cursor.visible = true;
        }

        let swatch = ScreenRect::new(
            anchor.x + PANEL_OFFSET,
            anchor.y - PANEL_OFFSET - READOUT_HEIGHT - PANEL_WIDTH,
            PANEL_WIDTH,
            PANEL_WIDTH,
        );
        sink.fill_rect(swatch, Rgba::new(rgb.r, rgb.g, rgb.b, 255));
        sink.stroke_rect(swatch, Rgba::BLACK);

        sink.label(
            Point2D::new(anchor.x + PANEL_OFFSET, anchor.y - PANEL_OFFSET),
            &format!(
                "r: {:3} g: {:3} b: {:3}\nx: {} y: {}",
                rgb.r, rgb.g, rgb.b, px, py
            ),
            LabelAnchor::BottomLeft,
        );

        animating
    }
}
