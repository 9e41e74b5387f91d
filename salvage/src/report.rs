//! The structured record of validation failures for one construction call.

use indexmap::IndexMap;
use salvage_path::FieldPath;
use serde::Serialize;

use crate::error::ErrorDetail;

/// The per-field record of validation failures accompanying a partially
/// constructed model.
///
/// An ordered mapping from field path to the details recorded at that path,
/// in the order failures were encountered. A path appears here if and only
/// if its field failed validation; an empty report means the input was
/// fully valid.
///
/// Serializes as a JSON object keyed by the dotted path form
/// (`{"address.zipcode": [{"type": ..., "msg": ...}]}`); for a flat,
/// row-per-error shape see [`to_error_list`](Self::to_error_list).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    entries: IndexMap<FieldPath, Vec<ErrorDetail>>,
}

impl ErrorReport {
    pub(crate) fn from_entries(entries: IndexMap<FieldPath, Vec<ErrorDetail>>) -> Self {
        Self { entries }
    }

    /// Check whether any field failed validation.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct field paths with failures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of recorded failure details across all paths.
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// The failing field paths, in the order failures were recorded.
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.entries.keys()
    }

    /// Details recorded at the given path, if any.
    ///
    /// The path may be given in dotted form: `report.get("address.zipcode")`.
    pub fn get(&self, path: impl Into<FieldPath>) -> Option<&[ErrorDetail]> {
        self.entries.get(&path.into()).map(Vec::as_slice)
    }

    /// Check whether the given path has a recorded failure.
    pub fn contains(&self, path: impl Into<FieldPath>) -> bool {
        self.entries.contains_key(&path.into())
    }

    /// Iterate over (path, details) pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &[ErrorDetail])> {
        self.entries.iter().map(|(path, details)| (path, details.as_slice()))
    }

    /// Flatten the report into one row per failure, suitable for a
    /// JSON-typed error column.
    pub fn to_error_list(&self) -> Vec<ErrorEntry> {
        self.entries
            .iter()
            .flat_map(|(path, details)| {
                details.iter().map(|detail| ErrorEntry {
                    field: path.format(),
                    kind: detail.kind().tag(),
                    msg: detail.message().to_string(),
                })
            })
            .collect()
    }
}

/// One flattened row of an [`ErrorReport`].
///
/// Serializes as `{"field": "age", "type": "missing", "msg": "Field required"}`.
/// The failing raw value is not included; the audit copy of the input
/// already carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    /// Dotted path of the failing field.
    pub field: String,
    /// Machine-readable error tag (`missing`, `int_type`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message.
    pub msg: String,
}
