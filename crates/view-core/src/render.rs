//! Drawing interface between the view core and its host.
//!
//! The core never touches pixels. Every frame it issues a short list of
//! primitive draw calls against a [`RenderSink`]; the host maps them onto
//! its renderer. [`RecordingSink`] keeps them as data for replay and tests.

use serde::{Deserialize, Serialize};

use cappy_view_model::crop::CropBounds;
use cappy_view_model::geometry::{Point2D, ScreenRect};

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const RED: Rgba = Rgba::new(255, 0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Colors of a spotlight overlay: the lit region fades from `inner` at
/// its center to `edge` at its boundary; everything outside gets `outside`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotlightColors {
    pub inner: Rgba,
    pub edge: Rgba,
    pub outside: Rgba,
}

/// Which corner of a label's box is pinned to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Host-side drawing surface.
pub trait RenderSink {
    /// Fill the whole target.
    fn clear(&mut self, color: Rgba);

    /// Draw the `src` region of the capture scaled into `dst`.
    fn draw_capture(&mut self, src: CropBounds, dst: ScreenRect);

    fn fill_rect(&mut self, rect: ScreenRect, color: Rgba);

    fn stroke_rect(&mut self, rect: ScreenRect, color: Rgba);

    fn line(&mut self, from: Point2D, to: Point2D, color: Rgba);

    /// Darken everything except a disc of `radius` around `center`.
    fn spotlight_circle(&mut self, center: Point2D, radius: f64, colors: &SpotlightColors);

    /// Darken everything except `rect`.
    fn spotlight_rect(&mut self, rect: ScreenRect, colors: &SpotlightColors);

    /// Text on a padded panel. Lines are separated by `\n`.
    fn label(&mut self, anchor: Point2D, text: &str, placement: LabelAnchor);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Rgba,
    },
    Capture {
        src: CropBounds,
        dst: ScreenRect,
    },
    FillRect {
        rect: ScreenRect,
        color: Rgba,
    },
    StrokeRect {
        rect: ScreenRect,
        color: Rgba,
    },
    Line {
        from: Point2D,
        to: Point2D,
        color: Rgba,
    },
    SpotlightCircle {
        center: Point2D,
        radius: f64,
        colors: SpotlightColors,
    },
    SpotlightRect {
        rect: ScreenRect,
        colors: SpotlightColors,
    },
    Label {
        anchor: Point2D,
        text: String,
        placement: LabelAnchor,
    },
}

/// A [`RenderSink`] that stores every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    commands: Vec<DrawCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the sink empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every label drawn, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count()
    }
}

impl RenderSink for RecordingSink {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn draw_capture(&mut self, src: CropBounds, dst: ScreenRect) {
        self.commands.push(DrawCommand::Capture { src, dst });
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: ScreenRect, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }

    fn line(&mut self, from: Point2D, to: Point2D, color: Rgba) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn spotlight_circle(&mut self, center: Point2D, radius: f64, colors: &SpotlightColors) {
        self.commands.push(DrawCommand::SpotlightCircle {
            center,
            radius,
            colors: *colors,
        });
    }

    fn spotlight_rect(&mut self, rect: ScreenRect, colors: &SpotlightColors) {
        self.commands.push(DrawCommand::SpotlightRect {
            rect,
            colors: *colors,
        });
    }

    fn label(&mut self, anchor: Point2D, text: &str, placement: LabelAnchor) {
        self.commands.push(DrawCommand::Label {
            anchor,
            text: text.to_string(),
            placement,
        });
    }
}
