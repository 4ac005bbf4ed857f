//! TUI widgets

pub mod cards;
pub mod chart;
pub mod charts_page;
pub mod error_panel;
pub mod help;
pub mod layout;
pub mod overview;
pub mod spinner;
pub mod tabs;
