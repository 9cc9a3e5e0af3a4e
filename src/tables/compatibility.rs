use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::error::{TableError, TableKind};
use crate::tables::normalize::fix_lookalikes;
use crate::tables::numeric::NumericField;
use crate::tables::{decode_entry, parse_object};

/// Pairwise tag compatibility, stored under one side of each pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompatibilityTable {
    scores: BTreeMap<String, BTreeMap<String, f64>>,
}

impl CompatibilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag_id: impl Into<String>, other_id: impl Into<String>, score: f64) {
        self.scores
            .entry(tag_id.into())
            .or_default()
            .insert(other_id.into(), score);
    }

    /// Direction-agnostic: a pair stored as `(a, b)` answers for `(b, a)` too.
    pub fn lookup(&self, a: &str, b: &str) -> Option<f64> {
        self.direct(a, b).or_else(|| self.direct(b, a))
    }

    fn direct(&self, key: &str, sub_key: &str) -> Option<f64> {
        self.scores.get(key).and_then(|row| row.get(sub_key)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.values().all(BTreeMap::is_empty)
    }

    pub fn len(&self) -> usize {
        self.scores.values().map(BTreeMap::len).sum()
    }

    pub fn ids(&self) -> BTreeSet<&str> {
        let mut ids = BTreeSet::new();
        for (tag_id, row) in &self.scores {
            ids.insert(tag_id.as_str());
            ids.extend(row.keys().map(String::as_str));
        }
        ids
    }

    pub fn from_json_str(contents: &str) -> Result<Self, TableError> {
        let table_kind = TableKind::Compatibility;
        let entries = parse_object(table_kind, contents)?;
        let mut table = Self::new();

        for (raw_id, value) in entries {
            let tag_id = fix_lookalikes(&raw_id);
            let Some(row) = decode_entry::<BTreeMap<String, NumericField>>(table_kind, &tag_id, value)
            else {
                continue;
            };

            for (raw_other, field) in &row {
                let other_id = fix_lookalikes(raw_other);
                let score = field.parse(table_kind, &tag_id, &other_id)?;
                if !(1.0..=5.0).contains(&score) {
                    warn!(tag = %tag_id, other = %other_id, score, "compatibility score outside 1.0-5.0");
                }
                table.insert(tag_id.clone(), other_id, score);
            }
        }

        Ok(table)
    }
}
