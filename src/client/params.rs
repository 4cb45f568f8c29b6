//! Query parameters.
//!
//! Parameter values are tagged: a scalar is stringified, a list becomes one
//! query entry per element, and a JSON value is sent as a single JSON string.

use serde_json::Value;

/// A single scalar query value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// String value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Str(s) => write!(f, "{}", s),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write_float(f, *x),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Writes a float the way JavaScript's `String(number)` does: named
/// non-finite values, unsigned zero and exponent form outside `[1e-6, 1e21)`.
fn write_float(f: &mut std::fmt::Formatter<'_>, x: f64) -> std::fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if x == 0.0 {
        return f.write_str("0");
    }

    let magnitude = x.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", x);
    }

    let exp = format!("{:e}", x);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{}e+{}", mantissa, power),
        _ => f.write_str(&exp),
    }
}

/// A query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Sent as `key=value`.
    Scalar(Scalar),
    /// Sent as one `key=item` entry per element, in order.
    List(Vec<Scalar>),
    /// Sent as `key=<json text>`.
    Json(Value),
}

macro_rules! param_from {
    ($($t:ty => |$v:ident| $scalar:expr),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from($v: $t) -> Self {
                    $scalar
                }
            }

            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Scalar(value.into())
                }
            }

            impl From<Vec<$t>> for ParamValue {
                fn from(values: Vec<$t>) -> Self {
                    ParamValue::List(values.into_iter().map(Scalar::from).collect())
                }
            }
        )*
    };
}

param_from! {
    &str => |v| Scalar::Str(v.to_string()),
    String => |v| Scalar::Str(v),
    bool => |v| Scalar::Bool(v),
    f64 => |v| Scalar::Float(v),
    i32 => |v| Scalar::Int(i64::from(v)),
    i64 => |v| Scalar::Int(v),
    u32 => |v| Scalar::Int(i64::from(v)),
    u16 => |v| Scalar::Int(i64::from(v)),
}

impl From<Scalar> for ParamValue {
    fn from(value: Scalar) -> Self {
        ParamValue::Scalar(value)
    }
}

impl ParamValue {
    /// Converts a loosely-typed JSON value. A top-level `null` has no query
    /// representation and yields `None`; a `null` array element is sent as
    /// the string `null` so every element keeps its entry.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Array(items) => Some(ParamValue::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Array(_) | Value::Object(_) => Scalar::Str(item.to_string()),
                        other => json_scalar(other),
                    })
                    .collect(),
            )),
            Value::Object(_) => Some(ParamValue::Json(value)),
            other => Some(ParamValue::Scalar(json_scalar(other))),
        }
    }
}

fn json_scalar(value: Value) -> Scalar {
    match value {
        Value::String(s) => Scalar::Str(s),
        Value::Bool(b) => Scalar::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => Scalar::Str(n.to_string()),
        },
        other => Scalar::Str(other.to_string()),
    }
}

/// Ordered query parameter mapping.
///
/// Keys keep their first-insertion position; inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Inserts a parameter if present; absent values are skipped entirely.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<ParamValue>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style [`insert_opt`](Self::insert_opt).
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl Into<ParamValue>>) -> Self {
        self.insert_opt(key, value);
        self
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Flat list of query pairs as they will appear on the wire.
#[derive(Debug, Default)]
pub(crate) struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    /// Replaces every entry for `key` with a single entry at the position of
    /// the first existing one, or appends it.
    pub(crate) fn set(&mut self, key: &str, value: String) {
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Appends an entry without touching existing ones.
    pub(crate) fn append(&mut self, key: &str, value: String) {
        self.pairs.push((key.to_string(), value));
    }

    /// Serializes a parameter mapping onto the pair list.
    pub(crate) fn extend_params(&mut self, params: &QueryParams) {
        for (key, value) in params.iter() {
            match value {
                ParamValue::Scalar(scalar) => self.set(key, scalar.to_string()),
                ParamValue::List(items) => {
                    for item in items {
                        self.append(key, item.to_string());
                    }
                }
                ParamValue::Json(json) => self.set(key, json.to_string()),
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
