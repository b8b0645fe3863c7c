//! Key binding resolution.

use cappy_common::config::KeyBindings;
use cappy_view_model::capture::ColorFormat;
use cappy_view_model::event::Modifiers;

/// What a key press means, independent of the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ColorPick,
    Flashlight,
    Commit,
    Cancel,
    Reset,
    Quit,
    Save,
    ToggleGrid,
    /// Copy the picked color; shift selects the comma-separated form.
    Copy {
        format: ColorFormat,
        separated: bool,
    },
}

/// Map a key press onto an action.
///
/// With ctrl held only the chords (save, copy) match. Key names compare
/// case-insensitively.
pub fn resolve(keys: &KeyBindings, key: &str, modifiers: Modifiers) -> Option<KeyAction> {
    let is = |binding: &str| binding.eq_ignore_ascii_case(key);

    if modifiers.ctrl {
        let copy = |format| KeyAction::Copy {
            format,
            separated: modifiers.shift,
        };
        return if is(&keys.save) {
            Some(KeyAction::Save)
        } else if is(&keys.copy_decimal) {
            Some(copy(ColorFormat::Decimal))
        } else if is(&keys.copy_hex) {
            Some(copy(ColorFormat::Hex))
        } else if is(&keys.copy_binary) {
            Some(copy(ColorFormat::Binary))
        } else {
            None
        };
    }

    let plain = [
        (&keys.color_pick, KeyAction::ColorPick),
        (&keys.flashlight, KeyAction::Flashlight),
        (&keys.commit, KeyAction::Commit),
        (&keys.cancel, KeyAction::Cancel),
        (&keys.reset, KeyAction::Reset),
        (&keys.quit, KeyAction::Quit),
        (&keys.grid, KeyAction::ToggleGrid),
    ];
    plain
        .into_iter()
        .find(|(binding, _)| is(binding))
        .map(|(_, action)| action)
}
