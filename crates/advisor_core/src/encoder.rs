//! Label encoders mapping category strings to integer codes
//!
//! Vocabularies are sorted lexicographically when fitted, so the same set of
//! labels always yields the same codes regardless of row order.

use crate::categories::Column;
use crate::errors::{AdvisorError, Result};
use crate::serde_canon::hash_canonical_hex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bidirectional mapping between a finite label set and `u32` codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Column the encoder belongs to
    pub column: String,

    /// Sorted vocabulary; a label's code is its index
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder from every label observed in a column
    pub fn fit<I, S>(column: Column, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();

        Self {
            column: column.name().to_string(),
            classes: distinct.into_iter().collect(),
        }
    }

    /// Encode a label into its integer code
    pub fn encode(&self, label: &str) -> Result<u32> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map(|idx| idx as u32)
            .map_err(|_| AdvisorError::UnknownCategoryValue {
                feature: column_name(&self.column),
                value: label.to_string(),
            })
    }

    /// Decode an integer code back into its label
    pub fn decode(&self, code: u32) -> Result<&str> {
        self.classes
            .get(code as usize)
            .map(String::as_str)
            .ok_or(AdvisorError::UnknownClassCode(code))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Check the vocabulary is sorted and free of duplicates
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(AdvisorError::InvalidModel(format!(
                "encoder {} has an empty vocabulary",
                self.column
            )));
        }
        if self.classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(AdvisorError::InvalidModel(format!(
                "encoder {} vocabulary is not strictly sorted",
                self.column
            )));
        }
        Ok(())
    }
}

/// Map a stored column name back to its static form for error reporting
fn column_name(column: &str) -> &'static str {
    Column::ALL
        .into_iter()
        .find(|c| c.name() == column)
        .map(Column::name)
        .unwrap_or("category")
}

/// One encoder per categorical column; the first artifact of the pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderSet {
    pub project_type: LabelEncoder,
    pub perf_need: LabelEncoder,
    pub experience: LabelEncoder,
    pub stack: LabelEncoder,
}

impl EncoderSet {
    pub fn get(&self, column: Column) -> &LabelEncoder {
        match column {
            Column::ProjectType => &self.project_type,
            Column::PerfNeed => &self.perf_need,
            Column::Experience => &self.experience,
            Column::Stack => &self.stack,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for column in Column::ALL {
            let encoder = self.get(column);
            if encoder.column != column.name() {
                return Err(AdvisorError::InvalidModel(format!(
                    "encoder stored under {} is labelled {}",
                    column, encoder.column
                )));
            }
            encoder.validate()?;
        }
        Ok(())
    }

    /// BLAKE3 hash of the canonical JSON form, recorded in the model metadata
    pub fn hash_hex(&self) -> Result<String> {
        hash_canonical_hex(self)
    }
}
