// ============================================================
// Layer 4 — Label Encoders
// ============================================================
// Each categorical column gets its own LabelEncoder: the sorted
// list of distinct labels observed in training, where a label's
// code is its index in that list.
//
//   observed:  Startup, MNC, Startup, Product
//   classes:   [MNC, Product, Startup]
//   codes:      0     1        2
//
// Sorting is plain byte-order on the UTF-8 label, so fitting the
// same dataset twice produces identical encoders.
//
// The set of labels an encoder was fitted on is exactly the set
// of valid inputs at prediction time. Anything else is an
// UnknownCategory error. There is no fallback code.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::data::dataset::SalaryRecord;
use crate::domain::error::EncodeError;
use crate::domain::schema::CategoricalColumn;

/// Minimum distinct labels a column needs to be worth encoding.
const MIN_CLASSES: usize = 2;

// ─── LabelEncoder ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    column:  CategoricalColumn,
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on every value observed for `column`.
    pub fn fit<'a, I>(column: CategoricalColumn, values: I) -> Result<Self, EncodeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unique: BTreeSet<&str> = values.into_iter().collect();
        Self::from_classes(column, unique.into_iter().map(str::to_string).collect())
    }

    /// Rebuild from a persisted class list. The list must be
    /// strictly ascending (sorted and unique) and non-degenerate.
    pub fn from_classes(column: CategoricalColumn, classes: Vec<String>) -> Result<Self, EncodeError> {
        if classes.len() < MIN_CLASSES {
            return Err(EncodeError::DegenerateColumn { column, classes: classes.len() });
        }
        if let Some(pair) = classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(EncodeError::InvalidEncoder {
                column,
                reason: format!("classes not strictly ascending at '{}' / '{}'", pair[0], pair[1]),
            });
        }
        Ok(Self { column, classes })
    }

    pub fn transform(&self, value: &str) -> Result<usize, EncodeError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .map_err(|_| EncodeError::UnknownCategory {
                column: self.column,
                value:  value.to_string(),
            })
    }

    /// Label behind a code; the inverse of `transform`.
    pub fn inverse(&self, code: usize) -> Result<&str, EncodeError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(EncodeError::UnknownCode {
                column:  self.column,
                code,
                classes: self.classes.len(),
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

// ─── EncoderSet ───────────────────────────────────────────────────────────────
/// One encoder per CategoricalColumn, no more, no fewer.
/// Persisted as `{ "company_type": ["MNC", ...], ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<CategoricalColumn, Vec<String>>",
    into = "BTreeMap<CategoricalColumn, Vec<String>>"
)]
pub struct EncoderSet {
    encoders: BTreeMap<CategoricalColumn, LabelEncoder>,
}

impl EncoderSet {
    /// Fit every categorical column independently.
    pub fn fit(records: &[SalaryRecord]) -> Result<Self, EncodeError> {
        let encoders = CategoricalColumn::ALL
            .into_iter()
            .map(|col| {
                let enc = LabelEncoder::fit(col, records.iter().map(|r| r.category(col)))?;
                tracing::debug!("Fitted encoder '{}' with {} classes", col, enc.classes.len());
                Ok((col, enc))
            })
            .collect::<Result<BTreeMap<_, _>, EncodeError>>()?;
        Ok(Self { encoders })
    }

    pub fn get(&self, column: CategoricalColumn) -> Result<&LabelEncoder, EncodeError> {
        self.encoders
            .get(&column)
            .ok_or(EncodeError::MissingEncoder(column))
    }

    pub fn encode(&self, column: CategoricalColumn, value: &str) -> Result<usize, EncodeError> {
        self.get(column)?.transform(value)
    }

    /// Known labels for a column, in code order.
    pub fn classes(&self, column: CategoricalColumn) -> Result<&[String], EncodeError> {
        Ok(self.get(column)?.classes())
    }
}

impl TryFrom<BTreeMap<CategoricalColumn, Vec<String>>> for EncoderSet {
    type Error = EncodeError;

    fn try_from(mut raw: BTreeMap<CategoricalColumn, Vec<String>>) -> Result<Self, Self::Error> {
        let encoders = CategoricalColumn::ALL
            .into_iter()
            .map(|col| {
                let classes = raw.remove(&col).ok_or(EncodeError::MissingEncoder(col))?;
                Ok((col, LabelEncoder::from_classes(col, classes)?))
            })
            .collect::<Result<BTreeMap<_, _>, EncodeError>>()?;
        Ok(Self { encoders })
    }
}

impl From<EncoderSet> for BTreeMap<CategoricalColumn, Vec<String>> {
    fn from(set: EncoderSet) -> Self {
        set.encoders
            .into_iter()
            .map(|(col, enc)| (col, enc.classes))
            .collect()
    }
}
