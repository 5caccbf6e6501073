//! Data model for block-randomized treatment allocation.

pub mod config;
pub mod error;
pub mod ids;
pub mod record;
pub mod summary;

pub use config::{RandomizationConfig, letter_labels, multiplier_for_block_size};
pub use error::{ModelError, Result};
pub use ids::BlockId;
pub use record::{AnnotatedRecord, AssignmentRecord};
pub use summary::AllocationSummary;
