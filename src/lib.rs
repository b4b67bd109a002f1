//! weekgrid: one PNG heat-map per calendar week from a JSON schedule

pub mod cli;
pub mod parsers;
pub mod render;
pub mod services;
pub mod tui;
pub mod types;
