use std::fmt;

use crate::ModelError;

/// Name of a randomization block, e.g. `"Block 3"`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::InvalidBlockId(value));
        }
        Ok(Self(value))
    }

    /// Builds the 1-based block name `"{prefix}{index + 1}"`.
    pub fn numbered(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer suffix of the block name, if the name ends in digits.
    ///
    /// `"Block 10"` yields `Some(10)`; `"Pilot"` yields `None`.
    pub fn number(&self) -> Option<u64> {
        let digits_start = self
            .0
            .char_indices()
            .rev()
            .take_while(|(_, ch)| ch.is_ascii_digit())
            .last()
            .map(|(index, _)| index)?;
        self.0[digits_start..].parse().ok()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_is_one_based() {
        assert_eq!(BlockId::numbered("Block ", 0).as_str(), "Block 1");
        assert_eq!(BlockId::numbered("B", 9).as_str(), "B10");
    }

    #[test]
    fn number_reads_trailing_digits() {
        assert_eq!(BlockId::numbered("Block ", 9).number(), Some(10));
        assert_eq!(BlockId::new("Pilot").unwrap().number(), None);
        assert_eq!(BlockId::new("Arm 2 Block 7").unwrap().number(), Some(7));
    }

    #[test]
    fn blank_id_is_rejected() {
        assert_eq!(
            BlockId::new("  "),
            Err(ModelError::InvalidBlockId("  ".to_string()))
        );
    }
}
