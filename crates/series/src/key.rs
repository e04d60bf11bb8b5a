//! Spatial-unit keys.

use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// Identifies one spatial unit: an ordered tuple of string fields such as
/// `(iso3, pcode)`, or a single `cell_NNNN` field for a raster cell.
///
/// Grouping always uses the whole tuple. Keys order lexicographically field
/// by field, which fixes the row order of every keyed output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitKey(Vec<String>);

impl UnitKey {
    /// Builds a key from its fields.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptyKey`] if no fields are given.
    pub fn new<I, S>(fields: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(SeriesError::EmptyKey);
        }
        Ok(Self(fields))
    }

    /// Key of the raster cell at column `index` of a [`DenseGrid`](crate::DenseGrid).
    pub fn cell(index: usize) -> Self {
        Self(vec![format!("cell_{index:04}")])
    }

    /// The key's fields in order.
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; keys are constructed non-empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for UnitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
