//! Derived columns and the block × position grid used for display.
//!
//! The generator emits a flat sequence. This module annotates each record
//! with its position in the block and a numeric treatment code, then lays
//! the sequence onto a grid: one row per block, one column per position.

use std::collections::HashMap;

use blockrand_model::{AnnotatedRecord, AssignmentRecord, BlockId};

/// Treatment labels indexed by their numeric code.
///
/// Codes follow the order in which each label first appears in the
/// sequence, not the configured label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatmentCodes {
    labels: Vec<String>,
}

impl TreatmentCodes {
    pub fn from_records(records: &[AssignmentRecord]) -> Self {
        let mut labels: Vec<String> = Vec::new();
        for record in records {
            if !labels.contains(&record.treatment) {
                labels.push(record.treatment.clone());
            }
        }
        Self { labels }
    }

    pub fn code_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|known| known == label)
    }

    pub fn label(&self, code: usize) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// 1-based running position of each record within its block.
///
/// Positions follow generation order; records of one block need not be
/// contiguous.
pub fn positions_in_block(records: &[AssignmentRecord]) -> Vec<usize> {
    let mut counters: HashMap<&BlockId, usize> = HashMap::new();
    records
        .iter()
        .map(|record| {
            let counter = counters.entry(&record.block_id).or_default();
            *counter += 1;
            *counter
        })
        .collect()
}

/// Adds `position_in_block` and the treatment code to every record.
pub fn annotate(records: &[AssignmentRecord]) -> (Vec<AnnotatedRecord>, TreatmentCodes) {
    let codes = TreatmentCodes::from_records(records);
    let annotated = records
        .iter()
        .zip(positions_in_block(records))
        .map(|(record, position_in_block)| AnnotatedRecord {
            record: record.clone(),
            position_in_block,
            // Every label was collected from these same records.
            treatment_code: codes.code_of(&record.treatment).unwrap_or_default(),
        })
        .collect();
    (annotated, codes)
}

/// Distinct block ids in natural numeric order.
///
/// Blocks are ordered by the integer suffix of their name, so `"Block 10"`
/// follows `"Block 9"`. Names without a numeric suffix sort last, by name.
pub fn natural_block_order<'a, I>(ids: I) -> Vec<BlockId>
where
    I: IntoIterator<Item = &'a BlockId>,
{
    let mut blocks: Vec<BlockId> = Vec::new();
    for id in ids {
        if !blocks.contains(id) {
            blocks.push(id.clone());
        }
    }
    blocks.sort_by(|a, b| natural_key(a).cmp(&natural_key(b)));
    blocks
}

fn natural_key(id: &BlockId) -> (bool, Option<u64>, &str) {
    let number = id.number();
    (number.is_none(), number, id.as_str())
}

/// Allocation sequence laid out as blocks (rows) × positions (columns).
///
/// Row 0 is the first block in natural order. Cells with no subject, which
/// only occur when blocks differ in size, are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationGrid {
    pub blocks: Vec<BlockId>,
    pub columns: usize,
    pub treatment_codes: Vec<Vec<Option<usize>>>,
    pub subject_ids: Vec<Vec<Option<u32>>>,
    pub treatments: TreatmentCodes,
    /// Block size of the first record, used for display.
    pub samples_per_block: usize,
}

impl AllocationGrid {
    pub fn from_annotated(records: &[AnnotatedRecord], treatments: TreatmentCodes) -> Self {
        let blocks = natural_block_order(records.iter().map(|r| &r.record.block_id));
        let columns = records
            .iter()
            .map(|r| r.position_in_block)
            .max()
            .unwrap_or(0);
        let row_of: HashMap<&BlockId, usize> =
            blocks.iter().enumerate().map(|(row, id)| (id, row)).collect();

        let mut treatment_codes = vec![vec![None; columns]; blocks.len()];
        let mut subject_ids = vec![vec![None; columns]; blocks.len()];
        for record in records {
            let Some(&row) = row_of.get(&record.record.block_id) else {
                continue;
            };
            let Some(column) = record.position_in_block.checked_sub(1) else {
                continue;
            };
            treatment_codes[row][column] = Some(record.treatment_code);
            subject_ids[row][column] = Some(record.record.id);
        }

        Self {
            blocks,
            columns,
            treatment_codes,
            subject_ids,
            treatments,
            samples_per_block: records.first().map_or(0, |r| r.record.block_size),
        }
    }

    pub fn rows(&self) -> usize {
        self.blocks.len()
    }

    /// Treatment code and subject id at a cell, if occupied.
    pub fn cell(&self, row: usize, column: usize) -> Option<(usize, u32)> {
        let code = (*self.treatment_codes.get(row)?.get(column)?)?;
        let id = (*self.subject_ids.get(row)?.get(column)?)?;
        Some((code, id))
    }

    /// Second title line: blocks, samples per block and arm count.
    ///
    /// Samples per block comes from the first block and assumes blocks of
    /// equal size.
    pub fn subtitle(&self) -> String {
        format!(
            "{} blocks with {} samples per block, randomized to {} treatments",
            self.rows(),
            self.samples_per_block,
            self.treatments.len()
        )
    }
}
