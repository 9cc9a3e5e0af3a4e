use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{TableError, TableKind};
use crate::tables::numeric::{parse_optional, NumericField};
use crate::tables::{decode_entry, parse_object};
use crate::AudienceCode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudienceGroup {
    pub code: AudienceCode,
    pub base_weight: f64,
    pub art_weight: f64,
    pub commercial_weight: f64,
    pub base_default_audience: f64,
    pub art_default_audience: f64,
    pub com_default_audience: f64,
}

impl AudienceGroup {
    pub fn new(code: AudienceCode, base_weight: f64, art_weight: f64, commercial_weight: f64) -> Self {
        Self {
            code,
            base_weight,
            art_weight,
            commercial_weight,
            base_default_audience: 0.1,
            art_default_audience: 0.05,
            com_default_audience: 0.05,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAudienceGroup {
    base_weight: Option<NumericField>,
    art_weight: Option<NumericField>,
    commercial_weight: Option<NumericField>,
    base_default_audience: Option<NumericField>,
    art_default_audience: Option<NumericField>,
    com_default_audience: Option<NumericField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AudienceGroupTable {
    groups: BTreeMap<AudienceCode, AudienceGroup>,
}

impl AudienceGroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(AudienceGroup::new(AudienceCode::TM, 0.15, 0.05, 0.2));
        table.insert(AudienceGroup::new(AudienceCode::TF, 0.15, 0.05, 0.2));
        table.insert(AudienceGroup::new(AudienceCode::YM, 0.3, 0.4, 0.25));
        table.insert(AudienceGroup::new(AudienceCode::YF, 0.3, 0.3, 0.25));
        table.insert(AudienceGroup::new(AudienceCode::AM, 0.05, 0.1, 0.1));
        table.insert(AudienceGroup::new(AudienceCode::AF, 0.05, 0.1, 0.1));
        table
    }

    pub fn insert(&mut self, group: AudienceGroup) -> Option<AudienceGroup> {
        self.groups.insert(group.code, group)
    }

    pub fn get(&self, code: AudienceCode) -> Option<&AudienceGroup> {
        self.groups.get(&code)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AudienceGroup> + '_ {
        self.groups.values()
    }

    /// Missing fields read as 0; keys that are not audience codes are skipped.
    pub fn from_json_str(contents: &str) -> Result<Self, TableError> {
        let table_kind = TableKind::AudienceGroups;
        let entries = parse_object(table_kind, contents)?;
        let mut table = Self::new();

        for (key, value) in entries {
            let Some(code) = AudienceCode::from_str(&key) else {
                warn!(audience = %key, "skipping audience group with unknown code");
                continue;
            };
            let Some(raw) = decode_entry::<RawAudienceGroup>(table_kind, &key, value) else {
                continue;
            };

            table.insert(AudienceGroup {
                code,
                base_weight: parse_optional(raw.base_weight.as_ref(), table_kind, &key, "baseWeight")?,
                art_weight: parse_optional(raw.art_weight.as_ref(), table_kind, &key, "artWeight")?,
                commercial_weight: parse_optional(
                    raw.commercial_weight.as_ref(),
                    table_kind,
                    &key,
                    "commercialWeight",
                )?,
                base_default_audience: parse_optional(
                    raw.base_default_audience.as_ref(),
                    table_kind,
                    &key,
                    "baseDefaultAudience",
                )?,
                art_default_audience: parse_optional(
                    raw.art_default_audience.as_ref(),
                    table_kind,
                    &key,
                    "artDefaultAudience",
                )?,
                com_default_audience: parse_optional(
                    raw.com_default_audience.as_ref(),
                    table_kind,
                    &key,
                    "comDefaultAudience",
                )?,
            });
        }

        Ok(table)
    }
}
