use serde::Serialize;
use tracing::info;

use crate::error::AdvisorError;
use crate::tables::TagTable;
use crate::{AudienceCode, AudienceProfile, SelectionSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub profile: AudienceProfile,
    pub resolved: Vec<String>,
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct AudienceAggregator<'a> {
    tags: &'a TagTable,
}

impl<'a> AudienceAggregator<'a> {
    pub fn new(tags: &'a TagTable) -> Self {
        Self { tags }
    }

    pub fn aggregate(&self, selection: &SelectionSet) -> Result<Aggregate, AdvisorError> {
        let mut totals = AudienceProfile::new();
        let mut resolved = Vec::new();
        let mut ignored = Vec::new();

        for tag_id in selection.iter() {
            let Some(tag) = self.tags.get(tag_id) else {
                info!(tag = tag_id, "selected story element not in tag table, ignoring");
                ignored.push(tag_id.to_string());
                continue;
            };
            for code in AudienceCode::ALL {
                totals.set(code, totals.get(code) + tag.weights.get(code));
            }
            resolved.push(tag_id.to_string());
        }

        if resolved.is_empty() {
            return Err(AdvisorError::EmptySelection {
                requested: selection.len(),
            });
        }

        let count = resolved.len() as f64;
        let profile = AudienceProfile::from_pairs(
            AudienceCode::ALL
                .iter()
                .map(|code| (*code, totals.get(*code) / count)),
        );

        Ok(Aggregate {
            profile,
            resolved,
            ignored,
        })
    }
}
