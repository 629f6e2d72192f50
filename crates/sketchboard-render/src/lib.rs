//! Sketchboard Render Library
//!
//! Renderer abstraction for the Sketchboard canvas, a backend-neutral
//! display list and an SVG implementation.

pub mod display;
mod renderer;
mod svg;

pub use display::{ImageItem, ItemSource, RenderItem, ShapeItem, build_display_list};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
