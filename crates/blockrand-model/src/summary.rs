use serde::{Deserialize, Serialize};

/// Aggregate figures describing a generated allocation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Requested number of subjects.
    pub target_sample_size: usize,
    /// Number of subjects actually allocated (whole blocks).
    pub actual_allocation_size: usize,
    pub num_blocks: usize,
    pub block_size: usize,
    pub num_treatments: usize,
}

impl AllocationSummary {
    /// True when whole blocks pushed the allocation past the target.
    pub fn is_adjusted(&self) -> bool {
        self.actual_allocation_size != self.target_sample_size
    }

    /// Human-readable note about the allocation size adjustment, if any.
    ///
    /// A zero target is a multiple of every block size, so it gets no note;
    /// the generator reports that case itself.
    pub fn adjustment_warning(&self) -> Option<String> {
        if self.target_sample_size == 0 {
            return None;
        }
        self.is_adjusted().then(|| {
            format!(
                "Target sample size ({}) is not a multiple of block size ({}). \
                 Allocation generated for {} subjects.",
                self.target_sample_size, self.block_size, self.actual_allocation_size
            )
        })
    }
}
