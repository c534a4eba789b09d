//! Round-trip check between a source text and its canonical form.

use crate::error::IntegrityReport;
use crate::value::{Mapping, Scalar, Value};
use crate::{Error, Result};
use yaml_rust2::{ScanError, Yaml, YamlLoader};

/// Check that `generated` loads to the same value as `original`.
///
/// Both texts go through yaml-rust2's own loader rather than this crate's
/// parser, so a formatting bug cannot hide behind a matching parser bug.
/// Mapping keys are compared by their text and key order is ignored.
///
/// # Errors
///
/// Returns [`Error::Integrity`] when the values differ or either side fails
/// to load.
pub fn validate(original: &str, generated: &str) -> Result<()> {
    let before = load_value(original);
    let after = load_value(generated);

    if matches!((&before, &after), (Ok(a), Ok(b)) if a == b) {
        return Ok(());
    }

    let report = IntegrityReport {
        original: original.to_string(),
        generated: generated.to_string(),
        before,
        after,
    };
    tracing::error!("{report}");
    Err(Error::Integrity(Box::new(report)))
}

/// Load the first document of `text` as a [`Value`]. An empty stream loads as
/// null.
pub fn load_value(text: &str) -> std::result::Result<Value, ScanError> {
    let docs = YamlLoader::load_from_str(text)?;
    Ok(docs.first().map_or_else(Value::null, from_yaml))
}

fn from_yaml(yaml: &Yaml) -> Value {
    match yaml {
        Yaml::Array(items) => Value::Sequence(items.iter().map(from_yaml).collect()),
        Yaml::Hash(hash) => {
            let mut map = Mapping::with_capacity(hash.len());
            for (key, value) in hash {
                map.insert(key_text(key), from_yaml(value));
            }
            Value::Mapping(map)
        }
        other => Value::scalar(scalar_from_yaml(other)),
    }
}

fn scalar_from_yaml(yaml: &Yaml) -> Scalar {
    match yaml {
        Yaml::String(s) => Scalar::String(s.clone()),
        Yaml::Integer(i) => Scalar::Integer(*i),
        Yaml::Boolean(b) => Scalar::Boolean(*b),
        Yaml::Real(s) => yaml.as_f64().map_or_else(|| Scalar::String(s.clone()), Scalar::Float),
        _ => Scalar::Null,
    }
}

fn key_text(key: &Yaml) -> String {
    match key {
        Yaml::Array(_) | Yaml::Hash(_) => format!("{key:?}"),
        scalar => scalar_from_yaml(scalar).to_text(),
    }
}
