// File: src/value.rs
// Purpose: Parameter value types shared by the validator and the URL codec

use serde::{Deserialize, Serialize};

/// Supported parameter value types
///
/// Query strings are flat, so there is no nested object case: a value is
/// a scalar, a list of scalars, or `Null` (which the URL codec drops).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<ParamValue>),
    Null,
}

impl ParamValue {
    /// Render the value the way it appears in a query string
    pub fn to_query_string(&self) -> String {
        match self {
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Number(n) => {
                // Format number nicely (remove .0 for integers)
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            ParamValue::Text(s) => s.clone(),
            ParamValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_query_string()).collect();
                rendered.join(",")
            }
            ParamValue::Null => "".to_string(),
        }
    }

    /// Whether the URL codec should omit this value from a query string
    ///
    /// Null values and empty strings never appear in generated URLs.
    pub fn is_skipped_in_query(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// Raw parameter value as parsed out of a query string
///
/// Mirrors standard query syntax: a key appears once (`Single`) or is
/// repeated (`Many`). Values are already percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawValue {
    Single(String),
    Many(Vec<String>),
}

impl From<RawValue> for ParamValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Single(s) => ParamValue::Text(s),
            RawValue::Many(items) => {
                ParamValue::List(items.into_iter().map(ParamValue::Text).collect())
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(items: Vec<ParamValue>) -> Self {
        ParamValue::List(items)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => ParamValue::Null,
        }
    }
}
