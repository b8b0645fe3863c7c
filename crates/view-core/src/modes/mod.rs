//! The interaction modes driven by the view's state machine.
//!
//! Exactly one is active at a time. Each mode handles the events it cares
//! about and leaves the rest to the session's default handling.

mod color_pick;
mod draw_crop;
mod flashlight;
mod move_mode;

pub use color_pick::ColorPickMode;
pub use draw_crop::DrawCropMode;
pub use flashlight::FlashlightMode;
pub use move_mode::MoveMode;

use serde::{Deserialize, Serialize};

use crate::context::ViewContext;
use crate::machine::{EventOutcome, StateMachine};

/// Identity of an interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeTag {
    Move,
    ColorPick,
    Flashlight,
    DrawCrop,
}

impl std::fmt::Display for ModeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModeTag::Move => "move",
            ModeTag::ColorPick => "color_pick",
            ModeTag::Flashlight => "flashlight",
            ModeTag::DrawCrop => "draw_crop",
        };
        f.write_str(name)
    }
}

pub type ViewMachine = StateMachine<ViewContext, ModeTag>;
pub type ViewOutcome = EventOutcome<ViewContext, ModeTag>;
