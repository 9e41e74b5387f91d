//! The partial result bundle returned by construction.

use core::fmt;
use core::ops::Index;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::report::ErrorReport;

/// A partially constructed model instance.
///
/// An ordered map of field name to value, in schema declaration order.
/// Every declared field is present: its value is either the validated
/// (possibly coerced) value, or the substituted fallback for a field that
/// failed. Which is which is recorded in the accompanying
/// [`ErrorReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Instance {
    fields: Map<String, Value>,
}

impl Instance {
    pub(crate) fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Get a field's value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the instance has no fields (empty schema).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over (name, value) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// The instance as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl Index<&str> for Instance {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        &self.fields[name]
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Everything one partial construction call produces: the instance, the
/// error report, and an untouched copy of the raw input for audit storage.
///
/// Immutable once returned; persistence is the caller's responsibility
/// (typically: valid fields into typed columns, the report and raw input
/// into JSON-typed columns).
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    instance: Instance,
    report: ErrorReport,
    raw: Value,
}

impl Bundle {
    pub(crate) fn new(fields: Map<String, Value>, report: ErrorReport, raw: Value) -> Self {
        Self {
            instance: Instance::new(fields),
            report,
            raw,
        }
    }

    /// The partially constructed instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The per-field record of validation failures.
    pub fn report(&self) -> &ErrorReport {
        &self.report
    }

    /// The original raw input, exactly as supplied.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Check whether every field validated successfully.
    pub fn is_fully_valid(&self) -> bool {
        self.report.is_empty()
    }

    /// Names of the top-level fields that validated successfully, in
    /// declaration order.
    ///
    /// A field counts as failed if any report entry is rooted at it,
    /// including entries for nested sub-fields and list elements.
    pub fn valid_fields(&self) -> Vec<&str> {
        self.instance
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| !self.report.paths().any(|path| path.root_field() == Some(*name)))
            .collect()
    }

    /// The instance as a JSON object with failed top-level fields omitted.
    pub fn dump_valid(&self) -> Value {
        let valid: std::collections::HashSet<&str> = self.valid_fields().into_iter().collect();
        Value::Object(
            self.instance
                .iter()
                .filter(|(name, _)| valid.contains(name.as_str()))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }

    /// Decompose the bundle into (instance, report, raw input).
    pub fn into_parts(self) -> (Instance, ErrorReport, Value) {
        (self.instance, self.report, self.raw)
    }
}
