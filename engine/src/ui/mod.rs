//! UI-facing state owned by the engine.

mod input;

pub use input::FieldInput;
pub use reel_types::ui::{FocusTarget, UiOptions};
