//! The two output panels: orders and activity.

pub mod activity;
pub mod orders;
