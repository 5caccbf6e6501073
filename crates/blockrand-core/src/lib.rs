//! Block randomization core.
//!
//! Two steps, run in order:
//! - **Generation**: partition a target sample size into whole blocks, each
//!   holding every treatment label equally often in a shuffled order.
//! - **Layout**: derive per-block positions and treatment codes, and lay the
//!   sequence onto a block × position grid for display.
//!
//! # Example
//!
//! ```ignore
//! use blockrand_core::{AllocationGrid, annotate, generate_block_randomization};
//! use blockrand_model::RandomizationConfig;
//!
//! let schedule = generate_block_randomization(&RandomizationConfig::default(), &mut rand::thread_rng())?;
//! let (records, codes) = annotate(&schedule.records);
//! let grid = AllocationGrid::from_annotated(&records, codes);
//! ```

pub mod generator;
pub mod layout;

pub use generator::{AllocationSchedule, generate_block_randomization, num_blocks};
pub use layout::{
    AllocationGrid, TreatmentCodes, annotate, natural_block_order, positions_in_block,
};
