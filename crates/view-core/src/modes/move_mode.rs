use cappy_view_model::event::InputEvent;

use super::{ModeTag, ViewOutcome};
use crate::context::{CursorIcon, ViewContext};
use crate::machine::Mode;
use crate::render::RenderSink;

/// Plain viewing. Panning and zooming are handled by the session.
#[derive(Debug, Default)]
pub struct MoveMode;

impl Mode<ViewContext, ModeTag> for MoveMode {
    fn tag(&self) -> ModeTag {
        ModeTag::Move
    }

    fn on_enter(&mut self, ctx: &mut ViewContext) {
        ctx.cursor.visible = true;
        ctx.cursor.icon = CursorIcon::Default;
    }

    fn handle_event(&mut self, _ctx: &mut ViewContext, _event: &InputEvent) -> ViewOutcome {
        ViewOutcome::ignored()
    }

    fn draw_frame(&mut self, ctx: &mut ViewContext, sink: &mut dyn RenderSink) -> bool {
        let animating = ctx.advance_camera();
        ctx.render_capture(sink);
        animating
    }
}
