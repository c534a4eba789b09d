//! The mutable document value.
//!
//! A [`Value`] is what the linter hands back for editing: scalars, ordered
//! sequences and ordered string-keyed mappings. Scalars remember whether the
//! source wrote them quoted, but equality ignores that flag so two values that
//! load the same compare equal.

use indexmap::IndexMap;
use std::fmt;
use yaml_rust2::Yaml;

/// Ordered mapping with unique string keys.
pub type Mapping = IndexMap<String, Value>;

/// A scalar's semantic value.
#[derive(Debug, Clone)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Infer the type of unquoted scalar text.
    ///
    /// Delegates to yaml-rust2's resolver so the result always agrees with
    /// what `YamlLoader` produces for the same plain scalar.
    pub fn infer(text: &str) -> Self {
        match Yaml::from_str(text) {
            Yaml::Null => Scalar::Null,
            Yaml::Boolean(b) => Scalar::Boolean(b),
            Yaml::Integer(i) => Scalar::Integer(i),
            yaml @ Yaml::Real(_) => match yaml.as_f64() {
                Some(f) => Scalar::Float(f),
                None => Scalar::String(text.to_string()),
            },
            _ => Scalar::String(text.to_string()),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Scalar::String(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// The textual form used for comment paths and plain emission.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Boolean(b) => b.to_string(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Float(f) => float_text(*f),
            Scalar::String(s) => s.clone(),
        }
    }
}

/// Render a float so that yaml-rust2 reads it back as the same float.
fn float_text(f: f64) -> String {
    if f.is_nan() {
        return ".nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }
    let text = f.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a == b,
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Scalar::String(a), Scalar::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// A document value.
#[derive(Debug, Clone)]
pub enum Value {
    Scalar {
        value: Scalar,
        /// The source wrote this scalar in a quoted or block style.
        quoted: bool,
    },
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// A scalar that was not quoted in the source.
    pub fn scalar(value: Scalar) -> Self {
        Value::Scalar {
            value,
            quoted: false,
        }
    }

    pub fn null() -> Self {
        Value::scalar(Scalar::Null)
    }

    /// A string scalar. Strings created in code are marked unquoted; the
    /// emitter decides quoting from the text alone.
    pub fn string(s: impl Into<String>) -> Self {
        Value::scalar(Scalar::String(s.into()))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_mapping_mut().and_then(|map| map.get_mut(key))
    }

    /// True for empty sequences and empty mappings.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::Sequence(items) => items.is_empty(),
            Value::Mapping(map) => map.is_empty(),
            Value::Scalar { .. } => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Scalar { value: a, .. }, Value::Scalar { value: b, .. }) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            // Key order is presentation, not content.
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::scalar(value)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::scalar(Scalar::Integer(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::scalar(Scalar::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::scalar(Scalar::Boolean(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}
