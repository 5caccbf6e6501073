//! Block-randomized allocation sequence generation.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use blockrand_model::{AllocationSummary, AssignmentRecord, BlockId, RandomizationConfig, Result};

/// A generated allocation sequence together with its summary figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSchedule {
    pub records: Vec<AssignmentRecord>,
    pub summary: AllocationSummary,
}

/// Number of whole blocks needed to cover `target` subjects.
///
/// Rounds up, and never returns fewer than one block, so a zero target
/// still yields a single full block.
pub fn num_blocks(target: usize, block_size: usize) -> usize {
    target.div_ceil(block_size).max(1)
}

/// Generates a block randomization allocation sequence.
///
/// Each block holds every treatment label `config.multiplier` times in a
/// uniformly shuffled order. Whole blocks are always returned, so the
/// sequence may be longer than `config.target`; it is never truncated.
///
/// # Errors
///
/// Returns a configuration error when the label list is empty, a label
/// repeats, the multiplier is zero or the allocation is too large to
/// number. No records are produced in that case.
pub fn generate_block_randomization<R>(
    config: &RandomizationConfig,
    rng: &mut R,
) -> Result<AllocationSchedule>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let block_size = config.block_size();
    let allocation_size = config.allocation_size()?;
    let num_blocks = allocation_size / block_size;
    if config.target == 0 {
        warn!(
            block_size,
            "target sample size is zero; generating a single block"
        );
    }

    let template = block_template(&config.treatments, config.multiplier);
    let mut records = Vec::with_capacity(allocation_size);
    // validate() caps the allocation at u32::MAX subjects
    let mut ids = 1..=u32::MAX;
    for index in 0..num_blocks {
        let block_id = BlockId::numbered(&config.block_prefix, index);
        let mut block = template.clone();
        block.shuffle(rng);
        debug!(block = %block_id, size = block.len(), "shuffled block");
        for (treatment, id) in block.into_iter().zip(ids.by_ref()) {
            records.push(AssignmentRecord {
                id,
                block_id: block_id.clone(),
                block_size,
                treatment: treatment.to_string(),
            });
        }
    }

    let summary = AllocationSummary {
        target_sample_size: config.target,
        actual_allocation_size: records.len(),
        num_blocks,
        block_size,
        num_treatments: config.arms(),
    };
    info!(
        blocks = num_blocks,
        block_size,
        target = config.target,
        subjects = records.len(),
        "generated block randomization"
    );
    Ok(AllocationSchedule { records, summary })
}

/// Every label repeated `multiplier` times, in label order.
fn block_template(labels: &[String], multiplier: usize) -> Vec<&str> {
    labels
        .iter()
        .flat_map(|label| std::iter::repeat_n(label.as_str(), multiplier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_blocks_rounds_up() {
        assert_eq!(num_blocks(30, 10), 3);
        assert_eq!(num_blocks(31, 10), 4);
        assert_eq!(num_blocks(7, 10), 1);
    }

    #[test]
    fn num_blocks_floor_is_one() {
        assert_eq!(num_blocks(0, 10), 1);
    }

    #[test]
    fn template_repeats_each_label() {
        let labels = vec!["T".to_string(), "C".to_string()];
        assert_eq!(block_template(&labels, 2), vec!["T", "T", "C", "C"]);
    }
}
