pub mod advertiser;
pub mod audience;
pub mod compatibility;
pub mod holiday;
pub mod normalize;
pub(crate) mod numeric;
pub mod tag;

pub use advertiser::{builtin_roster, Advertiser};
pub use audience::{AudienceGroup, AudienceGroupTable};
pub use compatibility::CompatibilityTable;
pub use holiday::{DateType, Holiday, HolidayTable, WeightType};
pub use tag::{Tag, TagTable};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{info, warn};

use crate::config::DataPaths;
use crate::error::{TableError, TableKind};

/// The four externally loaded tables. Replaced wholesale, never mutated mid-computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceData {
    pub tags: TagTable,
    pub audience_groups: AudienceGroupTable,
    pub holidays: HolidayTable,
    pub compatibility: CompatibilityTable,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            tags: TagTable::new(),
            audience_groups: AudienceGroupTable::builtin(),
            holidays: HolidayTable::builtin(),
            compatibility: CompatibilityTable::new(),
        }
    }
}

#[derive(Debug)]
pub struct LoadedData {
    pub data: ReferenceData,
    pub errors: Vec<TableError>,
}

impl ReferenceData {
    /// Loads each table independently. A table that is absent or fails to load falls back to
    /// its default (empty for tags and compatibility, built-in for audience groups and holidays).
    pub fn load(paths: &DataPaths) -> LoadedData {
        let mut errors = Vec::new();
        let defaults = ReferenceData::default();

        let tags = load_table(
            TableKind::Tags,
            &paths.tags_path(),
            TagTable::from_json_str,
            defaults.tags,
            &mut errors,
        );
        let audience_groups = load_table(
            TableKind::AudienceGroups,
            &paths.audience_groups_path(),
            AudienceGroupTable::from_json_str,
            defaults.audience_groups,
            &mut errors,
        );
        let holidays = load_table(
            TableKind::Holidays,
            &paths.holidays_path(),
            HolidayTable::from_json_str,
            defaults.holidays,
            &mut errors,
        );
        let compatibility = load_table(
            TableKind::Compatibility,
            &paths.compatibility_path(),
            CompatibilityTable::from_json_str,
            defaults.compatibility,
            &mut errors,
        );

        let data = ReferenceData {
            tags,
            audience_groups,
            holidays,
            compatibility,
        };
        info!(fingerprint = %data.fingerprint(), failed = errors.len(), "reference data loaded");

        LoadedData { data, errors }
    }

    /// Stable digest of the table contents, identifying which generation of data a
    /// result was computed against.
    pub fn fingerprint(&self) -> String {
        let payload = match serde_json::to_vec(self) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to serialize reference data, fingerprinting empty payload");
                Vec::new()
            }
        };
        let digest = Sha256::digest(&payload);
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        format!("{:016x}", u64::from_be_bytes(bytes))
    }
}

fn load_table<T>(
    table: TableKind,
    path: &Path,
    parse: fn(&str) -> Result<T, TableError>,
    fallback: T,
    errors: &mut Vec<TableError>,
) -> T {
    if !path.exists() {
        warn!(%table, path = %path.display(), "table source not found, using fallback");
        return fallback;
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|source| TableError::Io {
            table,
            path: path.to_path_buf(),
            source,
        })
        .and_then(|contents| parse(&contents));

    match parsed {
        Ok(value) => {
            info!(%table, path = %path.display(), "table loaded");
            value
        }
        Err(err) => {
            warn!(%table, error = %err, "table failed to load, using fallback");
            errors.push(err);
            fallback
        }
    }
}

pub(crate) fn parse_object(table: TableKind, contents: &str) -> Result<Map<String, Value>, TableError> {
    if contents.trim().is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str(contents).map_err(|source| TableError::Json { table, source })
}

/// Decodes one table entry; a structurally malformed entry is skipped rather than failing the table.
pub(crate) fn decode_entry<T: DeserializeOwned>(table: TableKind, key: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(entry) => Some(entry),
        Err(err) => {
            warn!(%table, key, error = %err, "skipping malformed entry");
            None
        }
    }
}
