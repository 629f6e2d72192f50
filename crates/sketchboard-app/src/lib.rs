//! Sketchboard Application
//!
//! Headless application shell: replays recorded UI actions against a canvas
//! and renders the result.

mod app;
mod ui;

pub use app::{App, AppError, load_script};
pub use ui::{Script, UiAction};
