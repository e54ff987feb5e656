//! Widgets shared across the screen.

pub mod form;
pub mod status_bar;
