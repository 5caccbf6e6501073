//! CLI library components for the block randomization tool.

pub mod logging;
pub mod pipeline;
pub mod summary;
