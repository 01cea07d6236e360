//! Normalization model: group records by attribute set and key the groups.

use crate::error::NormalizeError;
use crate::export::{Attributes, CanonicalKey, Record};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

/// Field injected into every output entry with the group's member names.
pub const NODES_FIELD: &str = "nodes";

/// Prefix of the key given to groups with more than one member.
pub const MIGRATION_GROUP_PREFIX: &str = "Migration Group";

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Refuse an export with no records instead of producing empty output.
    pub strict: bool,
}

/// Records sharing one attribute set, members in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub attributes: Attributes,
    pub members: Vec<String>,
}

impl Group {
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// One output entry: the group's attributes plus its `nodes` list.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntry {
    pub attributes: Attributes,
    pub nodes: Vec<String>,
}

impl NormalizedEntry {
    /// Attributes with `nodes` set. An existing `nodes` attribute keeps its
    /// position and has its value replaced.
    pub fn to_mapping(&self) -> Attributes {
        let mut out = self.attributes.clone();
        let nodes = self.nodes.iter().cloned().map(Value::String).collect();
        out.insert(Value::String(NODES_FIELD.to_string()), Value::Sequence(nodes));
        out
    }
}

impl Serialize for NormalizedEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}

/// Output key -> entry, in group-creation order.
pub type Normalized = IndexMap<String, NormalizedEntry>;

/// Partition records into groups of identical attribute sets.
///
/// Groups are returned in the order their first member was seen.
pub fn group_records(records: &[Record]) -> Result<Vec<Group>, NormalizeError> {
    let mut groups: IndexMap<CanonicalKey, Group> = IndexMap::new();

    for record in records {
        match groups.entry(record.canonical_key()?) {
            Entry::Occupied(mut e) => e.get_mut().members.push(record.name.clone()),
            Entry::Vacant(e) => {
                e.insert(Group {
                    attributes: record.attributes.clone(),
                    members: vec![record.name.clone()],
                });
            }
        }
    }

    Ok(groups.into_values().collect())
}

/// Key each group: a singleton keeps its member's name, larger groups get
/// `Migration Group N` with N counting only the larger groups.
pub fn build_entries(groups: &[Group]) -> Result<Normalized, NormalizeError> {
    let mut out = Normalized::with_capacity(groups.len());
    let mut group_id = 1usize;

    for group in groups {
        let key = if group.is_singleton() {
            group.members[0].clone()
        } else {
            let label = format!("{} {}", MIGRATION_GROUP_PREFIX, group_id);
            group_id += 1;
            label
        };

        let entry = NormalizedEntry {
            attributes: group.attributes.clone(),
            nodes: group.members.clone(),
        };

        if out.insert(key.clone(), entry).is_some() {
            return Err(NormalizeError::DuplicateKey(key));
        }
    }

    Ok(out)
}

/// Full transform: records -> groups -> keyed output entries.
pub fn normalize(
    records: &[Record],
    opts: NormalizeOptions,
) -> Result<(Vec<Group>, Normalized), NormalizeError> {
    if opts.strict && records.is_empty() {
        return Err(NormalizeError::EmptyInput);
    }

    let groups = group_records(records)?;
    let entries = build_entries(&groups)?;
    debug!(
        records = records.len(),
        groups = groups.len(),
        "normalized export"
    );

    Ok((groups, entries))
}
