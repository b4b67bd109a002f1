//! Type definitions for weekgrid

mod color;
mod error;
mod schedule;

pub use color::*;
pub use error::*;
pub use schedule::*;
