//! Interactive terminal dashboard

mod app;
pub mod theme;
pub mod widgets;

pub use app::{run, App, AppState};
pub use theme::Theme;
