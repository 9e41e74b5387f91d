//! The field interceptor: wraps each field's normal validation step.
//!
//! On success the validated value passes straight through; on failure the
//! error is captured, reported to the call's [`Aggregator`], and a fallback
//! value is substituted so model construction can proceed. This is the
//! tagged-outcome replacement for a wrap-mode validation hook: the
//! interceptor observes both the raw value and the validation result for
//! every field, including fields of nested models and list elements.

use salvage_path::FieldPath;
use serde_json::{Map, Value};

use crate::aggregate::Aggregator;
use crate::error::ErrorDetail;
use crate::schema::{FieldKind, FieldSpec, Schema};

/// The outcome of intercepting one field's validation.
#[derive(Debug)]
pub enum Outcome {
    /// Validation succeeded; carries the validated (possibly coerced) value.
    Validated(Value),
    /// Validation failed; carries the raw value (if one was supplied) and
    /// the failure details. The failure has already been reported to the
    /// enclosing aggregator.
    Failed {
        /// The raw value supplied for the field, `None` for missing fields.
        raw: Option<Value>,
        /// Why validation failed.
        error: ErrorDetail,
    },
}

/// What value to substitute for a field that failed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Substitute the raw input value, loosely typed. Missing fields get
    /// `null` (there is no raw value to substitute).
    #[default]
    Raw,
    /// Substitute `null` unconditionally.
    Null,
    /// Substitute the field's declared default, or `null` if it has none.
    Default,
}

/// Policy for optional fields with no supplied value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingOptional {
    /// Treat as valid with `null`; no report entry.
    #[default]
    Null,
    /// Record a `missing` entry (and still substitute `null`).
    Report,
}

/// Options governing one partial construction call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Substitution policy for failed fields.
    pub fallback: Fallback,
    /// Policy for missing optional fields.
    pub missing_optional: MissingOptional,
}

/// Run the interceptor over every declared field of `schema`, resolving raw
/// values from `map`. Returns the field values of the partial instance in
/// declaration order.
pub(crate) fn process_fields(
    schema: &Schema,
    map: &Map<String, Value>,
    path: &mut FieldPath,
    aggregator: &mut Aggregator,
    options: &Options,
) -> Map<String, Value> {
    let mut out = Map::with_capacity(schema.fields().len());
    for spec in schema.fields() {
        path.push_field(spec.name());
        let value = process_field(spec, map.get(spec.name()), path, aggregator, options);
        path.pop();
        out.insert(spec.name().to_string(), value);
    }
    out
}

/// Resolve one field: handle the missing-value policies, or hand a present
/// value to [`intercept`] and substitute on failure.
fn process_field(
    spec: &FieldSpec,
    raw: Option<&Value>,
    path: &mut FieldPath,
    aggregator: &mut Aggregator,
    options: &Options,
) -> Value {
    let Some(raw) = raw else {
        if let Some(default) = spec.default() {
            return default.clone();
        }
        if spec.required() || options.missing_optional == MissingOptional::Report {
            log::trace!("field {path} is missing");
            aggregator.record(path.clone(), ErrorDetail::missing());
        }
        return Value::Null;
    };

    match intercept(spec.kind(), raw, path, aggregator, options) {
        Outcome::Validated(value) => value,
        Outcome::Failed { raw, .. } => fallback_value(raw, spec.default(), options),
    }
}

/// Intercept one field's validation step.
///
/// Failures are reported to `aggregator` under the current `path` before
/// the outcome is returned; nested models and lists recurse with the path
/// extended accordingly.
pub(crate) fn intercept(
    kind: &FieldKind,
    raw: &Value,
    path: &mut FieldPath,
    aggregator: &mut Aggregator,
    options: &Options,
) -> Outcome {
    match kind {
        FieldKind::Leaf(validator) => match validator(raw) {
            Ok(value) => Outcome::Validated(value),
            Err(error) => {
                log::trace!("field {path} failed validation: {error}");
                aggregator.record(path.clone(), error.clone());
                Outcome::Failed {
                    raw: Some(raw.clone()),
                    error,
                }
            }
        },
        FieldKind::Nested(schema) => match raw {
            Value::Object(map) => {
                // Sub-field failures land in the shared aggregator with
                // dotted paths; the nested object itself always constructs.
                let fields = process_fields(schema, map, path, aggregator, options);
                Outcome::Validated(Value::Object(fields))
            }
            _ => {
                let error = ErrorDetail::not_a_mapping(raw);
                log::trace!("field {path} failed validation: {error}");
                aggregator.record(path.clone(), error.clone());
                Outcome::Failed {
                    raw: Some(raw.clone()),
                    error,
                }
            }
        },
        FieldKind::List(inner) => match raw {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    path.push_index(index);
                    let value = match intercept(inner, item, path, aggregator, options) {
                        Outcome::Validated(value) => value,
                        // List elements have no declared default.
                        Outcome::Failed { raw, .. } => fallback_value(raw, None, options),
                    };
                    path.pop();
                    out.push(value);
                }
                Outcome::Validated(Value::Array(out))
            }
            _ => {
                let error = ErrorDetail::invalid_type("list", raw);
                log::trace!("field {path} failed validation: {error}");
                aggregator.record(path.clone(), error.clone());
                Outcome::Failed {
                    raw: Some(raw.clone()),
                    error,
                }
            }
        },
    }
}

/// Pick the substituted value for a failed field.
fn fallback_value(raw: Option<Value>, default: Option<&Value>, options: &Options) -> Value {
    match options.fallback {
        Fallback::Raw => match raw {
            Some(value) => value,
            None => Value::Null,
        },
        Fallback::Null => Value::Null,
        Fallback::Default => match default {
            Some(value) => value.clone(),
            None => Value::Null,
        },
    }
}
