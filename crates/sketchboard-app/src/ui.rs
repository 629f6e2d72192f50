//! UI actions: the toolbar buttons, file input and stage pointer events.

use serde::{Deserialize, Serialize};
use sketchboard_core::input::{Modifiers, PointerEvent};
use sketchboard_core::tools::ToolKind;
use std::path::PathBuf;

/// Actions that can be triggered from the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiAction {
    /// Change the current tool.
    SelectTool { tool: ToolKind },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    /// Click on the stage (reported after the pointer-up).
    Click { x: f64, y: f64 },
    /// File input change; an empty list means the picker was cancelled.
    UploadImage {
        #[serde(default)]
        paths: Vec<PathBuf>,
    },
    /// TRANSFORM IMAGE button.
    TransformImage,
    /// CLEAR button.
    Clear,
    /// Remove the overlay image.
    ClearImage,
}

impl UiAction {
    /// The stage pointer event this action represents, if any.
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        let modifiers = |shift: bool| Modifiers { shift };
        match *self {
            UiAction::PointerDown { x, y, shift } => Some(PointerEvent::Down {
                position: kurbo::Point::new(x, y),
                modifiers: modifiers(shift),
            }),
            UiAction::PointerMove { x, y } => Some(PointerEvent::Move {
                position: kurbo::Point::new(x, y),
            }),
            UiAction::PointerUp { x, y, shift } => Some(PointerEvent::Up {
                position: kurbo::Point::new(x, y),
                modifiers: modifiers(shift),
            }),
            UiAction::Click { x, y } => Some(PointerEvent::Click {
                position: kurbo::Point::new(x, y),
            }),
            _ => None,
        }
    }
}

/// A recorded sequence of UI actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub actions: Vec<UiAction>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
