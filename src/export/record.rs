use crate::error::NormalizeError;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

/// Field stripped from every record before attribute sets are compared.
pub const NAME_FIELD: &str = "name";

/// Attribute mapping of a record, in the order it appeared in the export.
pub type Attributes = Mapping;

/// A single classification record with its name split out.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub attributes: Attributes,
}

impl Record {
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Order-independent form of this record's attributes.
    pub fn canonical_key(&self) -> Result<CanonicalKey, NormalizeError> {
        CanonicalKey::of(&self.attributes)
    }
}

/// Attribute set as (key, value) pairs sorted by key.
///
/// Keys and values are stored in their serialized YAML form with nested
/// mappings sorted, so two mappings compare equal exactly when they hold the
/// same keys with the same values, whatever order they were written in.
/// Scalars keep their YAML type: `1`, `1.0` and `"1"` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey(Vec<(String, String)>);

impl CanonicalKey {
    pub fn of(attributes: &Attributes) -> Result<Self, NormalizeError> {
        let mut pairs = Vec::with_capacity(attributes.len());
        for (k, v) in attributes {
            pairs.push((
                serialize(&canonical_value(k)?)?,
                serialize(&canonical_value(v)?)?,
            ));
        }
        pairs.sort();
        Ok(Self(pairs))
    }
}

/// Rebuild `value` with every nested mapping sorted by serialized key.
fn canonical_value(value: &Value) -> Result<Value, NormalizeError> {
    Ok(match value {
        Value::Mapping(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (k, v) in map {
                let k = canonical_value(k)?;
                entries.push((serialize(&k)?, k, canonical_value(v)?));
            }
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Mapping(entries.into_iter().map(|(_, k, v)| (k, v)).collect())
        }
        Value::Sequence(seq) => Value::Sequence(
            seq.iter()
                .map(canonical_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: canonical_value(&tagged.value)?,
        })),
        other => other.clone(),
    })
}

fn serialize(value: &Value) -> Result<String, NormalizeError> {
    serde_yaml::to_string(value).map_err(|e| NormalizeError::Serialize(e.to_string()))
}
