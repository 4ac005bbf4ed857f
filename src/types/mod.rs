//! Type definitions for execdash

mod error;
mod execution;
mod lenient;
mod stats;

pub use error::*;
pub use execution::*;
pub use stats::*;
