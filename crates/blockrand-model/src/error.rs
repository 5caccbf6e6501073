//! Configuration errors for block randomization.

use thiserror::Error;

/// Errors raised while validating a randomization configuration.
///
/// Every variant is a configuration error: it is detected before any
/// allocation work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No treatment labels were supplied.
    #[error("treatment labels cannot be empty")]
    EmptyTreatments,

    /// The block-size multiplier was zero.
    #[error("block size multiplier must be positive")]
    NonPositiveMultiplier,

    /// The same treatment label was supplied more than once.
    #[error("treatment label '{0}' appears more than once")]
    DuplicateTreatment(String),

    /// A generated-label arm count fell outside the supported range.
    #[error("number of treatments must be between {min} and {max}, got {arms}")]
    ArmCountOutOfRange { arms: usize, min: usize, max: usize },

    /// An explicit block size cannot hold one subject per arm.
    #[error(
        "block size ({block_size}) must be greater than or equal to the number of treatments ({arms})"
    )]
    BlockSizeTooSmall { block_size: usize, arms: usize },

    /// An explicit block size cannot be split evenly across the arms.
    #[error(
        "block size ({block_size}) must be divisible by the number of treatments ({arms}) to ensure equal allocation within blocks"
    )]
    BlockSizeNotDivisible { block_size: usize, arms: usize },

    /// Whole blocks covering the target would exceed the largest
    /// allocation that subject ids can number.
    #[error(
        "allocation for target {target} with {multiplier} x {arms} subjects per block exceeds the maximum of {max} subjects"
    )]
    AllocationTooLarge {
        target: usize,
        multiplier: usize,
        arms: usize,
        max: usize,
    },

    /// A block identifier was blank.
    #[error("invalid block id: '{0}'")]
    InvalidBlockId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
