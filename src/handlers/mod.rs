//! Front-end handlers module
//!
//! This module contains the front-ends that feed user input into the
//! conversation controller and render its transcript.

pub mod terminal;

// Re-export commonly used handler functions
pub use terminal::{run_terminal, render_entry, render_event, render_hint};
