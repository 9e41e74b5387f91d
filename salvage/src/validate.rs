//! Built-in leaf validators.
//!
//! These cover the scalar types a JSON ingestion schema typically declares,
//! with the lax coercions third-party payloads make necessary: integers and
//! booleans arrive as strings more often than anyone would like. On success
//! each validator returns the canonical value (`"3"` validates to `3`);
//! arbitrary checks plug in through [`custom`].

use serde_json::{Number, Value};

use crate::error::ErrorDetail;
use crate::schema::Validator;

/// Smallest float that no longer fits in an `i64` (2^63). The cast below
/// would saturate past this bound, so such floats must be rejected, not
/// converted.
const I64_RANGE_END: f64 = 9_223_372_036_854_775_808.0;

/// Validator for integer fields.
///
/// Accepts JSON integers, in-range floats with a zero fractional part, and
/// strings holding a base-10 integer. Booleans do not coerce.
pub fn integer() -> Validator {
    Box::new(|value| match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && (-I64_RANGE_END..I64_RANGE_END).contains(f))
            {
                Ok(Value::from(f as i64))
            } else {
                Err(ErrorDetail::unparseable("int", value))
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(Value::from(i)),
            Err(_) => Err(ErrorDetail::unparseable("int", value)),
        },
        _ => Err(ErrorDetail::invalid_type("int", value)),
    })
}

/// Validator for float fields.
///
/// Accepts any JSON number and strings holding a finite float. Booleans do
/// not coerce.
pub fn float() -> Validator {
    Box::new(|value| match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| ErrorDetail::unparseable("float", value)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| ErrorDetail::unparseable("float", value)),
        _ => Err(ErrorDetail::invalid_type("float", value)),
    })
}

/// Validator for boolean fields.
///
/// Accepts JSON booleans, the usual string spellings (`true`/`false`,
/// `yes`/`no`, `on`/`off`, `1`/`0`, case-insensitive), and the numbers
/// 0 and 1.
pub fn boolean() -> Validator {
    Box::new(|value| match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(ErrorDetail::unparseable("bool", value)),
        },
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(Value::Bool(false)),
            Some(1) => Ok(Value::Bool(true)),
            _ => Err(ErrorDetail::unparseable("bool", value)),
        },
        _ => Err(ErrorDetail::invalid_type("bool", value)),
    })
}

/// Validator for string fields. Accepts JSON strings only; no coercion.
pub fn string() -> Validator {
    Box::new(|value| match value {
        Value::String(_) => Ok(value.clone()),
        _ => Err(ErrorDetail::invalid_type("string", value)),
    })
}

/// Wrap an arbitrary check into a validator.
///
/// The function receives the raw value and returns the validated value, or
/// a message explaining the rejection. Checks must be deterministic and
/// side-effect-free.
///
/// ```
/// use serde_json::Value;
///
/// let non_empty = salvage::validate::custom(|value| match value {
///     Value::String(s) if !s.is_empty() => Ok(value.clone()),
///     Value::String(_) => Err("string must not be empty".to_string()),
///     _ => Err("expected a string".to_string()),
/// });
/// assert!(non_empty(&Value::String("ok".into())).is_ok());
/// ```
pub fn custom<F>(check: F) -> Validator
where
    F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
{
    Box::new(move |value| check(value).map_err(|msg| ErrorDetail::invalid(msg, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_integer_coercions() {
        let v = integer();
        assert_eq!(v(&json!(3)).unwrap(), json!(3));
        assert_eq!(v(&json!("3")).unwrap(), json!(3));
        assert_eq!(v(&json!(" 42 ")).unwrap(), json!(42));
        assert_eq!(v(&json!(3.0)).unwrap(), json!(3));
        assert!(v(&json!(3.5)).is_err());
        assert!(v(&json!("three")).is_err());
        assert!(v(&json!(true)).is_err());
        assert!(v(&json!(null)).is_err());
    }

    #[test]
    fn test_integer_rejects_out_of_range_floats() {
        let v = integer();
        // Out-of-range floats must fail, not saturate to i64::MAX.
        let err = v(&json!(1e19)).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Parsing { expected: "int" });
        assert!(v(&json!(1e300)).is_err());
        assert!(v(&json!(-1e300)).is_err());
        // 2^63 is one past i64::MAX; 2^63 as f64 round-trips through the
        // cast cleanly, so a plain round-trip check would let it through.
        assert!(v(&json!(9_223_372_036_854_775_808.0_f64)).is_err());
        // i64::MIN itself is exactly representable and in range.
        assert_eq!(
            v(&json!(-9_223_372_036_854_775_808.0_f64)).unwrap(),
            json!(i64::MIN)
        );
    }

    #[test]
    fn test_float_coercions() {
        let v = float();
        assert_eq!(v(&json!(1.5)).unwrap(), json!(1.5));
        assert_eq!(v(&json!("1.5")).unwrap(), json!(1.5));
        assert_eq!(v(&json!(3)).unwrap(), json!(3.0));
        assert!(v(&json!("inf")).is_err());
        assert!(v(&json!(true)).is_err());
    }

    #[test]
    fn test_boolean_coercions() {
        let v = boolean();
        assert_eq!(v(&json!(true)).unwrap(), json!(true));
        assert_eq!(v(&json!("No")).unwrap(), json!(false));
        assert_eq!(v(&json!("on")).unwrap(), json!(true));
        assert_eq!(v(&json!(1)).unwrap(), json!(true));
        assert_eq!(v(&json!(0)).unwrap(), json!(false));
        let err = v(&json!("something")).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Parsing { expected: "bool" });
        assert!(v(&json!(2)).is_err());
    }

    #[test]
    fn test_string_rejects_non_strings() {
        let v = string();
        assert_eq!(v(&json!("ok")).unwrap(), json!("ok"));
        let err = v(&json!(null)).unwrap_err();
        assert_eq!(err.kind().tag(), "string_type");
    }
}
