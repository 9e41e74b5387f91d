//! Explicit field-spec layer: what the core consumes per field.

use core::fmt;

use serde_json::Value;

use crate::aggregate::Aggregator;
use crate::bundle::Bundle;
use crate::error::{ErrorDetail, StructuralError, StructuralErrorKind, json_type_name};
use crate::intercept::{self, Options};

/// A per-field validation function.
///
/// Receives the raw value supplied for the field and returns the validated
/// (possibly coerced) value, or the details of the failure. Validators must
/// be deterministic, side-effect-free, and thread-safe; `Send + Sync` is
/// part of the type so schemas can be shared across threads freely.
pub type Validator = Box<dyn Fn(&Value) -> Result<Value, ErrorDetail> + Send + Sync>;

/// How one field's value is validated.
pub enum FieldKind {
    /// A scalar field checked by a single validator function.
    Leaf(Validator),
    /// A nested composite model, partially constructed with the same
    /// contract as the outer one.
    Nested(Schema),
    /// A homogeneous list whose elements are each checked by the inner
    /// kind, with indexed error paths (`items[2]`).
    List(Box<FieldKind>),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Leaf(_) => f.write_str("Leaf(..)"),
            FieldKind::Nested(schema) => f.debug_tuple("Nested").field(schema).finish(),
            FieldKind::List(inner) => f.debug_tuple("List").field(inner).finish(),
        }
    }
}

/// Declaration of one field of a [`Schema`].
#[derive(Debug)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
}

impl FieldSpec {
    /// Declare a required field with the given name and kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
        }
    }

    /// Mark the field as optional: a missing value is not an error.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Declare a default used when no value is supplied.
    ///
    /// A field with a default never produces a `missing` error.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// The field's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the field's value is validated.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether a missing value is an error (absent a default).
    pub const fn required(&self) -> bool {
        self.required
    }

    /// The declared default, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// An ordered set of field declarations for one model.
///
/// Schemas are built once via [`Schema::builder`] and then shared freely;
/// construction calls borrow them immutably.
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Start declaring a schema with the given model name.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The model name (used in log output).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Construct a partial model instance from raw input, with default
    /// [`Options`].
    ///
    /// See [`construct_partial_with`](Self::construct_partial_with).
    pub fn construct_partial(&self, raw: &Value) -> Result<Bundle, StructuralError> {
        self.construct_partial_with(raw, &Options::default())
    }

    /// Construct a partial model instance from raw input.
    ///
    /// Every declared field is resolved from `raw` and run through its
    /// validator; failures are recovered by substituting a fallback value
    /// (per `options`) and recorded in the returned bundle's
    /// [`ErrorReport`](crate::ErrorReport). The call fails only when `raw`
    /// is not a mapping — never for field content. Keys in `raw` that no
    /// field declares are ignored here but remain visible in the bundle's
    /// audit copy of the input.
    pub fn construct_partial_with(
        &self,
        raw: &Value,
        options: &Options,
    ) -> Result<Bundle, StructuralError> {
        let Value::Object(map) = raw else {
            return Err(StructuralErrorKind::NotAMapping {
                found: json_type_name(raw),
            }
            .into());
        };

        log::trace!("constructing partial {} from {} keys", self.name, map.len());

        let mut aggregator = Aggregator::new();
        let mut path = salvage_path::FieldPath::new();
        let fields = intercept::process_fields(self, map, &mut path, &mut aggregator, options);
        let report = aggregator.finalize();

        if !report.is_empty() {
            log::debug!(
                "partial {} constructed with {} failing field(s)",
                self.name,
                report.len()
            );
        }

        Ok(Bundle::new(fields, report, raw.clone()))
    }
}

/// Builder for [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Add a field declaration.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Add a required string field.
    pub fn string(self, name: impl Into<String>) -> Self {
        self.field(FieldSpec::new(name, FieldKind::Leaf(crate::validate::string())))
    }

    /// Add a required integer field.
    pub fn integer(self, name: impl Into<String>) -> Self {
        self.field(FieldSpec::new(name, FieldKind::Leaf(crate::validate::integer())))
    }

    /// Add a required float field.
    pub fn float(self, name: impl Into<String>) -> Self {
        self.field(FieldSpec::new(name, FieldKind::Leaf(crate::validate::float())))
    }

    /// Add a required boolean field.
    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.field(FieldSpec::new(name, FieldKind::Leaf(crate::validate::boolean())))
    }

    /// Add a required nested composite field.
    pub fn nested(self, name: impl Into<String>, schema: Schema) -> Self {
        self.field(FieldSpec::new(name, FieldKind::Nested(schema)))
    }

    /// Add a required list field whose elements are checked by `inner`.
    pub fn list(self, name: impl Into<String>, inner: FieldKind) -> Self {
        self.field(FieldSpec::new(name, FieldKind::List(Box::new(inner))))
    }

    /// Finish the declaration.
    ///
    /// Fails with [`StructuralErrorKind::DuplicateField`] if the same field
    /// name was declared twice — a misconfigured schema has no well-defined
    /// per-field behavior to fall back to.
    pub fn build(self) -> Result<Schema, StructuralError> {
        let mut seen = std::collections::HashSet::new();
        for spec in &self.fields {
            if !seen.insert(spec.name()) {
                return Err(StructuralErrorKind::DuplicateField {
                    name: spec.name().to_string(),
                }
                .into());
            }
        }
        Ok(Schema {
            name: self.name,
            fields: self.fields,
        })
    }
}
