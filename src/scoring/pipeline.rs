use serde::Serialize;
use tracing::debug;

use crate::category::Category;
use crate::error::AdvisorError;
use crate::scoring::{
    AdvertiserMatcher, AdvertiserRanking, AudienceAggregator, CandidateAffinity,
    CompatibilityMatrix, CompatibilityScore, CompatibilityScorer, HolidayMatch, HolidayMatcher,
    PositioningScorer, PositioningScores,
};
use crate::tables::{builtin_roster, Advertiser, ReferenceData};
use crate::validation::missing_categories;
use crate::{AudienceProfile, SelectionSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTag {
    pub id: String,
    pub category: Category,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub data_fingerprint: String,
    pub missing_categories: Vec<Category>,
    pub selected: Vec<ResolvedTag>,
    pub ignored: Vec<String>,
    pub profile: AudienceProfile,
    pub positioning: PositioningScores,
    pub advertisers: AdvertiserRanking,
    pub holidays: Vec<HolidayMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityReport {
    pub average: CompatibilityScore,
    pub candidates: Vec<CandidateAffinity>,
}

/// Stateless over its inputs: every call is a pure function of the selection and the
/// tables held at that moment. Replacing tables requires `&mut self`, so a computation
/// can never observe a half-swapped table set.
#[derive(Debug, Clone)]
pub struct Advisor {
    data: ReferenceData,
    advertisers: AdvertiserMatcher,
}

impl Advisor {
    pub fn new(data: ReferenceData, roster: Vec<Advertiser>) -> Self {
        Self {
            data,
            advertisers: AdvertiserMatcher::new(roster),
        }
    }

    pub fn with_builtin_roster(data: ReferenceData) -> Self {
        Self::new(data, builtin_roster())
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn replace_data(&mut self, data: ReferenceData) {
        self.data = data;
    }

    pub fn recommend(&self, selection: &SelectionSet) -> Result<Recommendation, AdvisorError> {
        let missing = missing_categories(selection);
        if !missing.is_empty() {
            debug!(?missing, "mandatory categories missing from selection");
        }

        let aggregate = AudienceAggregator::new(&self.data.tags).aggregate(selection)?;
        let profile = aggregate.profile;
        debug!(?profile, resolved = aggregate.resolved.len(), "audience profile");

        let positioning = PositioningScorer::new(&self.data.audience_groups).score(&profile);
        let advertisers = self.advertisers.rank(&profile);
        let holidays = HolidayMatcher::new().rank(&profile, &self.data.holidays);

        let selected = aggregate
            .resolved
            .iter()
            .filter_map(|tag_id| self.data.tags.get(tag_id))
            .map(|tag| ResolvedTag {
                id: tag.id.clone(),
                category: tag.category(),
                display_name: self.data.tags.display_name(&tag.id),
            })
            .collect();

        Ok(Recommendation {
            data_fingerprint: self.data.fingerprint(),
            missing_categories: missing,
            selected,
            ignored: aggregate.ignored,
            profile,
            positioning,
            advertisers,
            holidays,
        })
    }

    pub fn compatibility(&self, selection: &SelectionSet) -> CompatibilityReport {
        let scorer = CompatibilityScorer::new(&self.data.compatibility);
        let universe = self
            .data
            .tags
            .ids()
            .chain(self.data.compatibility.ids());

        CompatibilityReport {
            average: scorer.pairwise_average(selection),
            candidates: scorer.rank_candidates(selection, universe),
        }
    }

    pub fn compatibility_matrix(&self, selection: &SelectionSet) -> CompatibilityMatrix {
        CompatibilityScorer::new(&self.data.compatibility).matrix(selection)
    }
}
