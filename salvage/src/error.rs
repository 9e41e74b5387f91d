//! Field-level and structural error types.

use core::fmt;

use serde::ser::SerializeStruct;
use serde_json::Value;

/// Specific kinds of field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field had no supplied value and no declared default.
    Missing,
    /// The value had the wrong JSON type for the field.
    Type {
        /// Human-readable name of the expected type (`int`, `bool`, ...).
        expected: &'static str,
    },
    /// The value was a string that could not be parsed as the expected type.
    Parsing {
        /// Human-readable name of the expected type.
        expected: &'static str,
    },
    /// A custom validator rejected the value.
    Invalid,
    /// A nested model field's value was not a mapping.
    NotAnObject,
}

impl ErrorKind {
    /// Short snake_case tag for this kind, suitable for a machine-readable
    /// error column (`missing`, `int_type`, `bool_parsing`, ...).
    pub fn tag(&self) -> String {
        match self {
            ErrorKind::Missing => "missing".to_string(),
            ErrorKind::Type { expected } => format!("{expected}_type"),
            ErrorKind::Parsing { expected } => format!("{expected}_parsing"),
            ErrorKind::Invalid => "invalid".to_string(),
            ErrorKind::NotAnObject => "model_type".to_string(),
        }
    }
}

/// Details of one field-level validation failure.
///
/// Carries the failing raw value in memory for diagnostics, but excludes it
/// from serialization: the raw input already travels whole in the
/// [`Bundle`](crate::Bundle), so repeating failing values in the error
/// column would only bloat it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    kind: ErrorKind,
    message: String,
    input: Option<Value>,
}

impl ErrorDetail {
    /// Create a new detail with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            input: None,
        }
    }

    /// Attach the failing raw value.
    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Detail for a required field with no supplied value.
    pub fn missing() -> Self {
        Self::new(ErrorKind::Missing, "Field required")
    }

    /// Detail for a value of the wrong JSON type.
    pub fn invalid_type(expected: &'static str, input: &Value) -> Self {
        Self::new(
            ErrorKind::Type { expected },
            format!("Input should be a valid {expected}"),
        )
        .with_input(input.clone())
    }

    /// Detail for a string that could not be parsed as the expected type.
    pub fn unparseable(expected: &'static str, input: &Value) -> Self {
        Self::new(
            ErrorKind::Parsing { expected },
            format!("Input should be a valid {expected}, unable to interpret input"),
        )
        .with_input(input.clone())
    }

    /// Detail for a nested model field whose value is not a mapping.
    pub fn not_a_mapping(input: &Value) -> Self {
        Self::new(ErrorKind::NotAnObject, "Input should be a valid mapping").with_input(input.clone())
    }

    /// Detail for a custom validator rejection.
    pub fn invalid(message: impl Into<String>, input: &Value) -> Self {
        Self::new(ErrorKind::Invalid, message).with_input(input.clone())
    }

    /// Get the error kind.
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Get the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the failing raw value, if one was supplied.
    pub fn input(&self) -> Option<&Value> {
        self.input.as_ref()
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.kind.tag())
    }
}

impl serde::Serialize for ErrorDetail {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // `input` is deliberately not serialized.
        let mut state = serializer.serialize_struct("ErrorDetail", 2)?;
        state.serialize_field("type", &self.kind.tag())?;
        state.serialize_field("msg", &self.message)?;
        state.end()
    }
}

/// Error type for failures of the construction call itself.
///
/// Field content never produces one of these; they are reserved for input
/// that has no well-defined per-field behavior to fall back to.
#[derive(Debug, Clone)]
pub struct StructuralError {
    kind: StructuralErrorKind,
}

impl StructuralError {
    /// Create a new error with the given kind.
    pub const fn new(kind: StructuralErrorKind) -> Self {
        Self { kind }
    }

    /// Get the error kind.
    pub const fn kind(&self) -> &StructuralErrorKind {
        &self.kind
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StructuralErrorKind::NotAMapping { found } => {
                write!(f, "input must be a mapping, got {found}")
            }
            StructuralErrorKind::DuplicateField { name } => {
                write!(f, "schema declares field {name:?} more than once")
            }
        }
    }
}

impl std::error::Error for StructuralError {}

/// Specific kinds of structural errors.
#[derive(Debug, Clone)]
pub enum StructuralErrorKind {
    /// The top-level input was not a mapping.
    NotAMapping {
        /// JSON type name of the input that was supplied instead.
        found: &'static str,
    },
    /// The schema declares the same field name twice (misconfiguration).
    DuplicateField {
        /// The duplicated field name.
        name: String,
    },
}

impl From<StructuralErrorKind> for StructuralError {
    fn from(kind: StructuralErrorKind) -> Self {
        Self::new(kind)
    }
}

/// JSON type name of a value, for error messages.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
