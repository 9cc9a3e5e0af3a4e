use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::category::{beautify_tag_id, classify, Category};
use crate::error::{TableError, TableKind};
use crate::tables::normalize::fix_lookalikes;
use crate::tables::numeric::NumericField;
use crate::tables::{decode_entry, parse_object};
use crate::{AudienceCode, AudienceProfile};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: String,
    pub display_name: Option<String>,
    pub weights: AudienceProfile,
}

impl Tag {
    pub fn new(id: impl Into<String>, weights: AudienceProfile) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            weights,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Derived from the identifier on every call; never stored.
    pub fn category(&self) -> Category {
        classify(&self.id)
    }
}

#[derive(Debug, Deserialize)]
struct RawTag {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(default)]
    weights: BTreeMap<String, NumericField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagTable {
    tags: BTreeMap<String, Tag>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: Tag) -> Option<Tag> {
        self.tags.insert(tag.id.clone(), tag)
    }

    pub fn get(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.get(tag_id)
    }

    pub fn contains(&self, tag_id: &str) -> bool {
        self.tags.contains_key(tag_id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> + '_ {
        self.tags.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.keys().map(String::as_str)
    }

    pub fn display_name(&self, tag_id: &str) -> String {
        self.get(tag_id)
            .and_then(|tag| tag.display_name.clone())
            .unwrap_or_else(|| beautify_tag_id(tag_id))
    }

    pub fn from_json_str(contents: &str) -> Result<Self, TableError> {
        let entries = parse_object(TableKind::Tags, contents)?;
        let mut table = TagTable::new();

        for (raw_id, value) in entries {
            let id = fix_lookalikes(&raw_id);
            let Some(raw) = decode_entry::<RawTag>(TableKind::Tags, &id, value) else {
                continue;
            };

            let mut weights = AudienceProfile::new();
            for (code, field) in &raw.weights {
                let Some(audience) = AudienceCode::from_str(code) else {
                    debug!(tag = %id, audience = %code, "ignoring unknown audience code");
                    continue;
                };
                weights.set(audience, field.parse(TableKind::Tags, &id, code)?);
            }

            let mut tag = Tag::new(id, weights);
            tag.display_name = raw.display_name.map(|name| fix_lookalikes(&name));
            table.insert(tag);
        }

        Ok(table)
    }
}
