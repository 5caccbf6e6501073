//! Randomization parameters and their validation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Default target number of subjects.
pub const DEFAULT_TARGET: usize = 30;
/// Default occurrences of each treatment label per block.
pub const DEFAULT_MULTIPLIER: usize = 5;
/// Default prefix for block names.
pub const DEFAULT_BLOCK_PREFIX: &str = "Block ";
/// Default treatment arm names.
pub const DEFAULT_TREATMENTS: [&str; 2] = ["Treatment", "Control"];

/// Smallest arm count accepted when labels are generated.
pub const MIN_GENERATED_ARMS: usize = 2;
/// Largest arm count accepted when labels are generated (`A` through `J`).
pub const MAX_GENERATED_ARMS: usize = 10;
/// Largest number of subjects in one allocation; ids are `u32`.
pub const MAX_ALLOCATION_SIZE: usize = u32::MAX as usize;

/// Parameters for one block randomization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomizationConfig {
    /// Target total number of subjects. Whole blocks are generated to meet
    /// or exceed it.
    pub target: usize,
    /// Unique treatment arm names.
    pub treatments: Vec<String>,
    /// Occurrences of each treatment label within a single block.
    pub multiplier: usize,
    /// Prefix for block names.
    pub block_prefix: String,
}

impl Default for RandomizationConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            treatments: DEFAULT_TREATMENTS.iter().map(ToString::to_string).collect(),
            multiplier: DEFAULT_MULTIPLIER,
            block_prefix: DEFAULT_BLOCK_PREFIX.to_string(),
        }
    }
}

impl RandomizationConfig {
    #[must_use]
    pub fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_treatments<I, S>(mut self, treatments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.treatments = treatments.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_multiplier(mut self, multiplier: usize) -> Self {
        self.multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_block_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.block_prefix = prefix.into();
        self
    }

    /// Number of treatment arms.
    pub fn arms(&self) -> usize {
        self.treatments.len()
    }

    /// Subjects per block: `multiplier × arms`.
    ///
    /// Saturates on overflow; [`validate`](Self::validate) rejects such
    /// configurations.
    pub fn block_size(&self) -> usize {
        self.multiplier.saturating_mul(self.arms())
    }

    /// Number of subjects in the whole blocks that cover `target`.
    ///
    /// A zero target still takes one full block.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AllocationTooLarge`] when the block size or the
    /// total overflows, or the total exceeds [`MAX_ALLOCATION_SIZE`].
    pub fn allocation_size(&self) -> Result<usize> {
        let too_large = || ModelError::AllocationTooLarge {
            target: self.target,
            multiplier: self.multiplier,
            arms: self.arms(),
            max: MAX_ALLOCATION_SIZE,
        };
        let block_size = self
            .multiplier
            .checked_mul(self.arms())
            .filter(|&size| size > 0)
            .ok_or_else(too_large)?;
        self.target
            .div_ceil(block_size)
            .max(1)
            .checked_mul(block_size)
            .filter(|&total| total <= MAX_ALLOCATION_SIZE)
            .ok_or_else(too_large)
    }

    /// Checks the configuration before any generation work.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyTreatments`] for an empty label list,
    /// [`ModelError::NonPositiveMultiplier`] for a zero multiplier,
    /// [`ModelError::DuplicateTreatment`] when a label repeats and
    /// [`ModelError::AllocationTooLarge`] when the whole blocks covering the
    /// target cannot be numbered.
    pub fn validate(&self) -> Result<()> {
        if self.treatments.is_empty() {
            return Err(ModelError::EmptyTreatments);
        }
        if self.multiplier == 0 {
            return Err(ModelError::NonPositiveMultiplier);
        }
        let mut seen = BTreeSet::new();
        for label in &self.treatments {
            if !seen.insert(label.as_str()) {
                return Err(ModelError::DuplicateTreatment(label.clone()));
            }
        }
        self.allocation_size()?;
        Ok(())
    }
}

/// Generates letter labels `A`, `B`, `C`, ... for `arms` treatment arms.
///
/// # Errors
///
/// Returns [`ModelError::ArmCountOutOfRange`] unless `arms` is within
/// [`MIN_GENERATED_ARMS`]..=[`MAX_GENERATED_ARMS`].
pub fn letter_labels(arms: usize) -> Result<Vec<String>> {
    if !(MIN_GENERATED_ARMS..=MAX_GENERATED_ARMS).contains(&arms) {
        return Err(ModelError::ArmCountOutOfRange {
            arms,
            min: MIN_GENERATED_ARMS,
            max: MAX_GENERATED_ARMS,
        });
    }
    Ok((b'A'..)
        .take(arms)
        .map(|letter| char::from(letter).to_string())
        .collect())
}

/// Converts an explicit block size into a per-arm multiplier.
///
/// # Errors
///
/// Returns [`ModelError::EmptyTreatments`] when `arms` is zero,
/// [`ModelError::NonPositiveMultiplier`] for a zero block size,
/// [`ModelError::BlockSizeTooSmall`] when the block is smaller than the arm
/// count and [`ModelError::BlockSizeNotDivisible`] when it does not split
/// evenly.
pub fn multiplier_for_block_size(block_size: usize, arms: usize) -> Result<usize> {
    if arms == 0 {
        return Err(ModelError::EmptyTreatments);
    }
    if block_size == 0 {
        return Err(ModelError::NonPositiveMultiplier);
    }
    if block_size < arms {
        return Err(ModelError::BlockSizeTooSmall { block_size, arms });
    }
    if block_size % arms != 0 {
        return Err(ModelError::BlockSizeNotDivisible { block_size, arms });
    }
    Ok(block_size / arms)
}
