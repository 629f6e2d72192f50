//! Sketchboard Core Library
//!
//! Platform-agnostic shape model, canvas state and gesture handling for the
//! Sketchboard drawing canvas.

pub mod canvas;
pub mod config;
pub mod gesture;
pub mod input;
pub mod overlay;
pub mod registry;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use canvas::{Canvas, InteractionState};
pub use config::{CanvasConfig, ConfigError};
pub use gesture::GestureHandler;
pub use input::{Modifiers, PointerEvent};
pub use overlay::{ImageFile, ImageFormat, ImageOverlay, OverlayError, OverlayImage};
pub use registry::ShapeRegistry;
pub use selection::{Corner, Handle, HandleKind, ManipulationState, ManipulationTarget};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use tools::{DrawingBuffer, ToolKind};
