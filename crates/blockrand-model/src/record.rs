use serde::{Deserialize, Serialize};

use crate::BlockId;

/// One subject's treatment assignment, as produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Sequential subject id, 1-based, in generation order.
    pub id: u32,
    /// Block the subject belongs to.
    #[serde(rename = "block.id")]
    pub block_id: BlockId,
    /// Number of subjects in that block.
    #[serde(rename = "block.size")]
    pub block_size: usize,
    /// Assigned treatment label.
    pub treatment: String,
}

/// An assignment record with the columns derived for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: AssignmentRecord,
    /// 1-based running position within the record's block.
    pub position_in_block: usize,
    /// Numeric treatment code, by first appearance of the label.
    #[serde(rename = "treatment_num")]
    pub treatment_code: usize,
}
