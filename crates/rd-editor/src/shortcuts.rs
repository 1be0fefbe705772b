//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser host and native tests resolve keys identically.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Delete,
    Duplicate,
    /// Move the selection by `(dx, dy)` grid steps or pixels, see `fine`.
    Nudge {
        dx: i8,
        dy: i8,
        /// `true`: 1 px per step. `false`: one grid pitch per step.
        fine: bool,
    },

    // ── Z-order ──
    BringToFront,
    SendToBack,

    // ── Document ──
    Save,
    Export,
    ToggleSnap,

    // ── UI ──
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘, on other
/// platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "]" => Some(ShortcutAction::BringToFront),
                "[" => Some(ShortcutAction::SendToBack),
                "s" | "S" => Some(ShortcutAction::Save),
                "e" | "E" => Some(ShortcutAction::Export),
                "g" | "G" => Some(ShortcutAction::ToggleSnap),
                _ => None,
            };
        }

        if let Some((dx, dy)) = arrow(key) {
            return Some(ShortcutAction::Nudge {
                dx,
                dy,
                fine: !modifiers.shift,
            });
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}

fn arrow(key: &str) -> Option<(i8, i8)> {
    match key {
        "ArrowLeft" => Some((-1, 0)),
        "ArrowRight" => Some((1, 0)),
        "ArrowUp" => Some((0, -1)),
        "ArrowDown" => Some((0, 1)),
        _ => None,
    }
}

/// Stable name for an action, as reported to the host.
pub fn action_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Delete => "delete",
        ShortcutAction::Duplicate => "duplicate",
        ShortcutAction::Nudge { .. } => "nudge",
        ShortcutAction::BringToFront => "bringToFront",
        ShortcutAction::SendToBack => "sendToBack",
        ShortcutAction::Save => "save",
        ShortcutAction::Export => "export",
        ShortcutAction::ToggleSnap => "toggleSnap",
        ShortcutAction::Deselect => "deselect",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Default::default()
        }
    }

    #[test]
    fn resolved_actions_have_host_names() {
        let names: Vec<_> = [("s", cmd()), ("]", cmd()), ("ArrowUp", Modifiers::NONE)]
            .into_iter()
            .filter_map(|(key, mods)| ShortcutMap::resolve(key, mods))
            .map(action_name)
            .collect();
        assert_eq!(names, ["save", "bringToFront", "nudge"]);
    }

    #[test]
    fn resolve_delete() {
        assert_eq!(
            ShortcutMap::resolve("Delete", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
    }

    #[test]
    fn resolve_command_combos() {
        assert_eq!(
            ShortcutMap::resolve("d", cmd()),
            Some(ShortcutAction::Duplicate)
        );
        assert_eq!(
            ShortcutMap::resolve("]", cmd()),
            Some(ShortcutAction::BringToFront)
        );
        assert_eq!(
            ShortcutMap::resolve("[", cmd()),
            Some(ShortcutAction::SendToBack)
        );
        assert_eq!(ShortcutMap::resolve("s", cmd()), Some(ShortcutAction::Save));
        assert_eq!(
            ShortcutMap::resolve("g", cmd()),
            Some(ShortcutAction::ToggleSnap)
        );
    }

    #[test]
    fn meta_acts_as_command() {
        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert_eq!(
            ShortcutMap::resolve("e", meta),
            Some(ShortcutAction::Export)
        );
    }

    #[test]
    fn arrows_nudge() {
        assert_eq!(
            ShortcutMap::resolve("ArrowLeft", Modifiers::NONE),
            Some(ShortcutAction::Nudge {
                dx: -1,
                dy: 0,
                fine: true
            })
        );
        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert_eq!(
            ShortcutMap::resolve("ArrowDown", shift),
            Some(ShortcutAction::Nudge {
                dx: 0,
                dy: 1,
                fine: false
            })
        );
    }

    #[test]
    fn unbound_keys() {
        assert_eq!(ShortcutMap::resolve("d", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("q", cmd()), None);
        assert_eq!(ShortcutMap::resolve("Delete", cmd()), None);
    }

    #[test]
    fn escape_deselects() {
        assert_eq!(
            ShortcutMap::resolve("Escape", Modifiers::NONE),
            Some(ShortcutAction::Deselect)
        );
    }
}
