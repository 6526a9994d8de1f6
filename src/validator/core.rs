use crate::spec::{NumericConstraints, ParameterKind, ParameterSpec, StringConstraints};
use serde::Serialize;
use tracing::debug;

/// A coerced parameter value.
///
/// `Absent` is the outcome for an optional parameter that was not supplied
/// and has no default; it serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    List(Vec<String>),
    Absent,
}

impl ParamValue {
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, ParamValue::Absent)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Integer(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Integer(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::List(v)
    }
}

/// Which numeric bound a value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Bound {
    Minimum,
    ExclusiveMinimum,
    Maximum,
    ExclusiveMaximum,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Minimum => write!(f, "minimum"),
            Bound::ExclusiveMinimum => write!(f, "exclusiveMinimum"),
            Bound::Maximum => write!(f, "maximum"),
            Bound::ExclusiveMaximum => write!(f, "exclusiveMaximum"),
        }
    }
}

/// Which string constraint a value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StringFacet {
    MinLength,
    MaxLength,
    Pattern,
}

impl std::fmt::Display for StringFacet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StringFacet::MinLength => write!(f, "minLength"),
            StringFacet::MaxLength => write!(f, "maxLength"),
            StringFacet::Pattern => write!(f, "pattern"),
        }
    }
}

/// A single field's validation failure.
///
/// Validation of one field short-circuits at the first failing step
/// (presence, arity, coercion, constraints); failures across fields are
/// aggregated by the binder, never short-circuited.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("required parameter is missing")]
    MissingRequired,
    #[error("expected a single value but {count} were supplied")]
    MultipleValuesNotAllowed { count: usize },
    #[error("value {value:?} is not a valid {expected}")]
    TypeCoercion {
        expected: &'static str,
        value: String,
    },
    #[error("value {value:?} is not one of {allowed:?}")]
    EnumMismatch {
        value: String,
        allowed: Vec<String>,
    },
    #[error("value {value} violates the {bound} bound of {limit}")]
    RangeViolation {
        bound: Bound,
        limit: f64,
        value: f64,
    },
    #[error("value {value:?} violates the {facet} constraint ({limit})")]
    StringConstraintViolation {
        facet: StringFacet,
        limit: String,
        value: String,
    },
}

impl ParamError {
    /// Stable identifier for the wire-level issue record.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ParamError::MissingRequired => "missing_required",
            ParamError::MultipleValuesNotAllowed { .. } => "multiple_values_not_allowed",
            ParamError::TypeCoercion { .. } => "type_coercion",
            ParamError::EnumMismatch { .. } => "enum_mismatch",
            ParamError::RangeViolation { .. } => "range_violation",
            ParamError::StringConstraintViolation { .. } => "string_constraint_violation",
        }
    }
}

/// Validate one parameter against its spec.
///
/// `raw_values` holds every raw occurrence of the parameter in input order
/// and `present` whether the key appeared in the request at all. Runs the
/// steps in order (presence, arity, coercion, constraints) and stops at the
/// first failure for this field.
pub fn validate(
    spec: &ParameterSpec,
    raw_values: &[&str],
    present: bool,
) -> Result<ParamValue, ParamError> {
    // Presence. A key that appeared with zero occurrences is treated the
    // same as an absent key.
    if !present || raw_values.is_empty() {
        if spec.required && spec.default.is_none() {
            return Err(ParamError::MissingRequired);
        }
        let value = spec.default.clone().unwrap_or(ParamValue::Absent);
        debug!(param = %spec.name, default = spec.default.is_some(), "absent parameter resolved");
        return Ok(value);
    }

    match &spec.kind {
        ParameterKind::StringList(constraints) => {
            let mut collected = Vec::with_capacity(raw_values.len());
            for raw in raw_values {
                check_string(raw, constraints)?;
                collected.push((*raw).to_string());
            }
            Ok(ParamValue::List(collected))
        }
        ParameterKind::Integer(constraints) => {
            let raw = single(raw_values)?;
            let parsed = parse_integer(raw)?;
            check_range(parsed as f64, constraints)?;
            Ok(ParamValue::Integer(parsed))
        }
        ParameterKind::Float(constraints) => {
            let raw = single(raw_values)?;
            let parsed = parse_float(raw)?;
            check_range(parsed, constraints)?;
            Ok(ParamValue::Float(parsed))
        }
        ParameterKind::Boolean => {
            let raw = single(raw_values)?;
            Ok(ParamValue::Bool(parse_boolean(raw)?))
        }
        ParameterKind::Str(constraints) => {
            let raw = single(raw_values)?;
            check_string(raw, constraints)?;
            Ok(ParamValue::Str(raw.to_string()))
        }
        ParameterKind::Enumerated(allowed) => {
            let raw = single(raw_values)?;
            if allowed.iter().any(|a| a == raw) {
                Ok(ParamValue::Str(raw.to_string()))
            } else {
                Err(ParamError::EnumMismatch {
                    value: raw.to_string(),
                    allowed: allowed.clone(),
                })
            }
        }
    }
}

fn single<'a>(raw_values: &[&'a str]) -> Result<&'a str, ParamError> {
    match raw_values {
        [one] => Ok(one),
        // The empty case is handled by the presence check; treat it as
        // missing rather than panicking if a caller bypasses `validate`.
        [] => Err(ParamError::MissingRequired),
        _ => Err(ParamError::MultipleValuesNotAllowed {
            count: raw_values.len(),
        }),
    }
}

/// Optional sign followed by decimal digits; `i64::from_str` enforces exactly
/// that (no whitespace, no fraction). Overflow is a coercion failure too.
fn parse_integer(raw: &str) -> Result<i64, ParamError> {
    raw.parse::<i64>().map_err(|_| ParamError::TypeCoercion {
        expected: "integer",
        value: raw.to_string(),
    })
}

fn parse_float(raw: &str) -> Result<f64, ParamError> {
    let coercion = || ParamError::TypeCoercion {
        expected: "float",
        value: raw.to_string(),
    };
    // `f64::from_str` also accepts "inf"/"NaN"; those are not numeric
    // literals for our purposes.
    let parsed = raw.parse::<f64>().map_err(|_| coercion())?;
    if !parsed.is_finite() {
        return Err(coercion());
    }
    Ok(parsed)
}

fn parse_boolean(raw: &str) -> Result<bool, ParamError> {
    let lowered = raw.to_ascii_lowercase();
    match lowered.as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ParamError::TypeCoercion {
            expected: "boolean",
            value: raw.to_string(),
        }),
    }
}

fn check_range(value: f64, constraints: &NumericConstraints) -> Result<(), ParamError> {
    let violation = |bound: Bound, limit: f64| ParamError::RangeViolation {
        bound,
        limit,
        value,
    };
    if let Some(limit) = constraints.minimum {
        if value < limit {
            return Err(violation(Bound::Minimum, limit));
        }
    }
    if let Some(limit) = constraints.exclusive_minimum {
        if value <= limit {
            return Err(violation(Bound::ExclusiveMinimum, limit));
        }
    }
    if let Some(limit) = constraints.maximum {
        if value > limit {
            return Err(violation(Bound::Maximum, limit));
        }
    }
    if let Some(limit) = constraints.exclusive_maximum {
        if value >= limit {
            return Err(violation(Bound::ExclusiveMaximum, limit));
        }
    }
    Ok(())
}

fn check_string(raw: &str, constraints: &StringConstraints) -> Result<(), ParamError> {
    let length = raw.chars().count();
    if let Some(min) = constraints.min_length {
        if length < min {
            return Err(ParamError::StringConstraintViolation {
                facet: StringFacet::MinLength,
                limit: min.to_string(),
                value: raw.to_string(),
            });
        }
    }
    if let Some(max) = constraints.max_length {
        if length > max {
            return Err(ParamError::StringConstraintViolation {
                facet: StringFacet::MaxLength,
                limit: max.to_string(),
                value: raw.to_string(),
            });
        }
    }
    if let Some(pattern) = &constraints.pattern {
        if !pattern.matches(raw) {
            return Err(ParamError::StringConstraintViolation {
                facet: StringFacet::Pattern,
                limit: pattern.source().to_string(),
                value: raw.to_string(),
            });
        }
    }
    Ok(())
}
