//! CLI command implementations

mod show;
pub mod style;

pub use show::{ShowOptions, run_show};
