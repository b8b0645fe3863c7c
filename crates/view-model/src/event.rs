//! Input events consumed by the view core.
//!
//! Hosts translate their windowing system's events into [`InputEvent`]s.
//! For headless replay, events are stored as timed JSONL scripts: one
//! [`ScriptedEvent`] per line, blank lines and `#` comments ignored.

use serde::{Deserialize, Serialize};

use cappy_common::error::{CappyError, CappyResult};

use crate::geometry::Point2D;

/// Keyboard modifier flags held while an event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Pans the view (usually the left button).
    Primary,
    /// Draws and edits crop selections (usually the right button).
    Secondary,
    Middle,
}

/// Set of mouse buttons held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonMask {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl ButtonMask {
    pub fn contains(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Primary => self.primary,
            MouseButton::Secondary => self.secondary,
            MouseButton::Middle => self.middle,
        }
    }

    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Primary => self.primary = down,
            MouseButton::Secondary => self.secondary = down,
            MouseButton::Middle => self.middle = down,
        }
    }

    pub fn with(mut self, button: MouseButton) -> Self {
        self.set(button, true);
        self
    }
}

/// Discriminated union of input events. Coordinates are screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A key was pressed. `key` is a lowercase key name ("c", "escape").
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },

    /// Pointer moved to `(x, y)` by `(xrel, yrel)`.
    MouseMotion {
        x: f64,
        y: f64,
        xrel: f64,
        yrel: f64,
        /// Buttons held during the motion.
        #[serde(default)]
        buttons: ButtonMask,
        #[serde(default)]
        modifiers: Modifiers,
    },

    /// Wheel scrolled by `delta` notches (positive = away from the user)
    /// with the pointer at `(x, y)`.
    MouseWheel {
        delta: f64,
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },

    /// The window's drawable area changed size.
    WindowResized { width: f64, height: f64 },

    Quit,
}

impl InputEvent {
    /// Create a key-down event.
    pub fn key(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::KeyDown {
            key: key.into(),
            modifiers,
        }
    }

    /// Create a button press event.
    pub fn button_down(button: MouseButton, x: f64, y: f64) -> Self {
        Self::MouseButtonDown {
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a button release event.
    pub fn button_up(button: MouseButton, x: f64, y: f64) -> Self {
        Self::MouseButtonUp {
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a motion event.
    pub fn motion(x: f64, y: f64, xrel: f64, yrel: f64, buttons: ButtonMask) -> Self {
        Self::MouseMotion {
            x,
            y,
            xrel,
            yrel,
            buttons,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a wheel event.
    pub fn wheel(delta: f64, x: f64, y: f64) -> Self {
        Self::MouseWheel {
            delta,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Replace the modifier flags of events that carry them.
    pub fn with_modifiers(mut self, mods: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. }
            | Self::MouseMotion { modifiers, .. }
            | Self::MouseWheel { modifiers, .. } => *modifiers = mods,
            Self::WindowResized { .. } | Self::Quit => {}
        }
        self
    }

    /// Extract the pointer position if this event carries one.
    pub fn pointer_position(&self) -> Option<Point2D> {
        match self {
            Self::MouseButtonDown { x, y, .. }
            | Self::MouseButtonUp { x, y, .. }
            | Self::MouseMotion { x, y, .. }
            | Self::MouseWheel { x, y, .. } => Some(Point2D::new(*x, *y)),
            _ => None,
        }
    }

    /// Modifier flags, if this event carries them.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            Self::KeyDown { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. }
            | Self::MouseMotion { modifiers, .. }
            | Self::MouseWheel { modifiers, .. } => Some(*modifiers),
            _ => None,
        }
    }
}

/// An input event stamped with the clock reading (ms) it should be fed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    #[serde(rename = "t")]
    pub time_ms: u64,

    #[serde(flatten)]
    pub event: InputEvent,
}

impl ScriptedEvent {
    pub fn new(time_ms: u64, event: InputEvent) -> Self {
        Self { time_ms, event }
    }
}

/// Parse a JSONL event script. Timestamps must not decrease.
pub fn parse_script(jsonl: &str) -> CappyResult<Vec<ScriptedEvent>> {
    let mut events: Vec<ScriptedEvent> = Vec::new();
    for (index, line) in jsonl.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: ScriptedEvent =
            serde_json::from_str(line).map_err(|e| CappyError::script(index + 1, e.to_string()))?;
        if let Some(prev) = events.last() {
            if event.time_ms < prev.time_ms {
                return Err(CappyError::script(
                    index + 1,
                    format!(
                        "timestamp {} is earlier than the previous event ({})",
                        event.time_ms, prev.time_ms
                    ),
                ));
            }
        }
        events.push(event);
    }
    Ok(events)
}

/// Serialize events to JSONL format.
pub fn serialize_script(events: &[ScriptedEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
