//! Configuration and dependency wiring for the search reindexer.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{LogFormat, Settings};
