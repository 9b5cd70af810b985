//! Data models for theme configuration.
//!
//! This module contains the value tree handed over by the Rime engine and the
//! color types resolved from it. Models are independent of where the values
//! were loaded from.

pub mod color;
pub mod value;

// Re-export all model types
pub use color::{parse_color, Color, Drawable};
pub use value::{ConfigScope, Scalar, Value};
