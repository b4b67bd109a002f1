//! Terminal presentation

pub mod preview;

pub use preview::{show_in_terminal, WeekPreview};
