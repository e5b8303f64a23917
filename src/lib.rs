//! Hue-grouped color swatches and a named color map editor for the terminal.

pub mod cli;
pub mod color;
pub mod error;
pub mod events;
pub mod index;
pub mod named;
pub mod picker;
pub mod selection;
pub mod surface;
pub mod tui;
pub mod viewer;

pub use color::Color;
pub use error::{Error, Result};
