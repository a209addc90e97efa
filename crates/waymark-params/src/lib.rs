//! Waymark Params
//!
//! Parameter types and validation for Waymark route trees.
//!
//! A route tree declares a [`ParamSchema`] per node; the navigator merges
//! the schemas along a path and hands the merged map plus the caller's raw
//! values to [`validate_and_clean_params`]. The outcome is either a cleaned
//! typed mapping or a list of human-readable error strings — the navigator
//! never inspects type rules itself.

pub mod value;

pub use value::{ParamValue, RawValue};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameter schema: parameter name → type descriptor
pub type ParamSchema = HashMap<String, ParamType>;

/// The shape a parameter value must have
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamKind {
    /// Free-form text
    Text,
    /// Numeric value (floats and integers)
    Number,
    /// Boolean flag, accepts `true`/`false`/`1`/`0` as text
    Switch,
    /// One of a fixed set of allowed strings
    Choice(Vec<String>),
}

/// Type descriptor for a single parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamType {
    pub kind: ParamKind,

    /// Whether the parameter must be supplied (an explicit null counts
    /// as supplied; the URL codec drops nulls from the query later)
    #[serde(default)]
    pub required: bool,
}

impl ParamType {
    /// Free-form text parameter
    pub fn text() -> Self {
        Self {
            kind: ParamKind::Text,
            required: false,
        }
    }

    /// Numeric parameter
    pub fn number() -> Self {
        Self {
            kind: ParamKind::Number,
            required: false,
        }
    }

    /// Boolean parameter
    pub fn switch() -> Self {
        Self {
            kind: ParamKind::Switch,
            required: false,
        }
    }

    /// Parameter restricted to a fixed set of allowed strings
    pub fn choice<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: ParamKind::Choice(allowed.into_iter().map(Into::into).collect()),
            required: false,
        }
    }

    /// Mark this parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Result of validating raw parameters against a merged schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Validated {
    Valid { params: HashMap<String, ParamValue> },
    Invalid { errors: Vec<String> },
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid { .. })
    }
}

/// Validate raw parameter values against a schema and coerce them into
/// their declared kinds
///
/// Rules:
/// - a `required` parameter missing from the input is an error; an
///   explicit [`ParamValue::Null`] counts as supplied and passes through
/// - present values are coerced per kind (text passthrough, number
///   parsing, switch text forms, choice membership); lists coerce
///   element-wise so repeated query keys validate like scalars
/// - input keys absent from the schema are errors
///
/// Error order is deterministic: schema keys in name order first, then
/// unknown input keys in name order.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use waymark_params::{validate_and_clean_params, ParamType, ParamValue, Validated};
///
/// let mut schema = HashMap::new();
/// schema.insert("id".to_string(), ParamType::number().required());
///
/// let mut params = HashMap::new();
/// params.insert("id".to_string(), ParamValue::Text("42".to_string()));
///
/// match validate_and_clean_params(&params, &schema) {
///     Validated::Valid { params } => {
///         assert_eq!(params.get("id"), Some(&ParamValue::Number(42.0)));
///     }
///     Validated::Invalid { errors } => panic!("unexpected: {errors:?}"),
/// }
/// ```
pub fn validate_and_clean_params(
    params: &HashMap<String, ParamValue>,
    schema: &ParamSchema,
) -> Validated {
    let mut errors = Vec::new();
    let mut cleaned = HashMap::new();

    let mut declared: Vec<&String> = schema.keys().collect();
    declared.sort();

    for name in declared {
        let param_type = &schema[name];
        match params.get(name) {
            None => {
                if param_type.required {
                    errors.push(format!("Missing required parameter `{name}`"));
                }
            }
            Some(ParamValue::Null) => {
                cleaned.insert(name.clone(), ParamValue::Null);
            }
            Some(value) => match coerce(name, &param_type.kind, value) {
                Ok(coerced) => {
                    cleaned.insert(name.clone(), coerced);
                }
                Err(message) => errors.push(message),
            },
        }
    }

    let mut unknown: Vec<&String> = params
        .keys()
        .filter(|name| !schema.contains_key(*name))
        .collect();
    unknown.sort();

    for name in unknown {
        errors.push(format!("Unknown parameter `{name}`"));
    }

    if errors.is_empty() {
        Validated::Valid { params: cleaned }
    } else {
        Validated::Invalid { errors }
    }
}

/// Coerce a single value into the declared kind
fn coerce(name: &str, kind: &ParamKind, value: &ParamValue) -> Result<ParamValue, String> {
    // Lists coerce element-wise (repeated query keys)
    if let ParamValue::List(items) = value {
        let coerced: Result<Vec<ParamValue>, String> =
            items.iter().map(|item| coerce(name, kind, item)).collect();
        return Ok(ParamValue::List(coerced?));
    }

    match kind {
        ParamKind::Text => match value {
            ParamValue::Text(_) => Ok(value.clone()),
            ParamValue::Number(_) | ParamValue::Bool(_) => {
                Ok(ParamValue::Text(value.to_query_string()))
            }
            other => Err(format!(
                "Parameter `{name}` must be text, got `{}`",
                other.to_query_string()
            )),
        },
        ParamKind::Number => match value {
            ParamValue::Number(_) => Ok(value.clone()),
            ParamValue::Text(raw) => raw
                .parse::<f64>()
                .map(ParamValue::Number)
                .map_err(|_| format!("Parameter `{name}` must be a number, got `{raw}`")),
            other => Err(format!(
                "Parameter `{name}` must be a number, got `{}`",
                other.to_query_string()
            )),
        },
        ParamKind::Switch => match value {
            ParamValue::Bool(_) => Ok(value.clone()),
            ParamValue::Text(raw) => match raw.as_str() {
                "true" | "1" => Ok(ParamValue::Bool(true)),
                "false" | "0" => Ok(ParamValue::Bool(false)),
                _ => Err(format!(
                    "Parameter `{name}` must be true or false, got `{raw}`"
                )),
            },
            other => Err(format!(
                "Parameter `{name}` must be true or false, got `{}`",
                other.to_query_string()
            )),
        },
        ParamKind::Choice(allowed) => match value {
            ParamValue::Text(raw) if allowed.iter().any(|a| a == raw) => Ok(value.clone()),
            other => Err(format!(
                "Parameter `{name}` must be one of [{}], got `{}`",
                allowed.join(", "),
                other.to_query_string()
            )),
        },
    }
}
