//! Pointer events delivered to the gesture handler.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift locks aspect ratio on resize and snaps rotation.
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false };

    pub const SHIFT: Self = Self { shift: true };
}

/// Pointer event type for unified mouse/touch handling.
///
/// A click is reported separately from the down/up pair, after the up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Click {
        position: Point,
    },
}

impl PointerEvent {
    /// Pointer position of the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Click { position } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{ "type": "down", "position": { "x": 1.0, "y": 2.0 } }"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(1.0, 2.0),
                modifiers: Modifiers::NONE,
            }
        );
        assert_eq!(event.position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_partial_modifiers() {
        let modifiers: Modifiers = serde_json::from_str(r#"{ "shift": true }"#).unwrap();
        assert_eq!(modifiers, Modifiers::SHIFT);
    }
}
