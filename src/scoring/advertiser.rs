use serde::Serialize;
use std::cmp::Ordering;

use crate::tables::Advertiser;
use crate::{AudienceCode, AudienceProfile};

pub const INTEREST_THRESHOLD: f64 = 2.5;
pub const FALLBACK_AUDIENCES: usize = 2;
pub const SHORTLIST_THRESHOLD: f64 = 13.0;
pub const SHORTLIST_FALLBACK: usize = 3;
/// Multiplier applied to quality for advertisers targeting none of the interested audiences.
pub const UNTARGETED_QUALITY_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterestedAudiences {
    pub codes: Vec<AudienceCode>,
    /// True when no audience reached the threshold and the top audiences were used instead.
    pub fallback: bool,
}

impl InterestedAudiences {
    pub fn contains(&self, code: AudienceCode) -> bool {
        self.codes.contains(&code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvertiserMatch {
    pub advertiser_id: String,
    pub display_name: String,
    pub quality: u32,
    pub match_score: f64,
    pub targeted: Vec<AudienceCode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvertiserRanking {
    pub interested: InterestedAudiences,
    pub matches: Vec<AdvertiserMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortlist<'a> {
    pub advertisers: &'a [AdvertiserMatch],
    /// True when nobody cleared the threshold and the top advertisers were taken regardless.
    pub fallback: bool,
}

impl AdvertiserRanking {
    /// Advertisers above the shortlist threshold, or the top three when none qualify.
    pub fn shortlist(&self) -> Shortlist<'_> {
        // matches are sorted, so the qualifying ones form a prefix
        let qualifying = self
            .matches
            .iter()
            .take_while(|candidate| candidate.match_score > SHORTLIST_THRESHOLD)
            .count();

        if qualifying > 0 {
            Shortlist {
                advertisers: &self.matches[..qualifying],
                fallback: false,
            }
        } else {
            let end = self.matches.len().min(SHORTLIST_FALLBACK);
            Shortlist {
                advertisers: &self.matches[..end],
                fallback: true,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdvertiserMatcher {
    roster: Vec<Advertiser>,
}

impl AdvertiserMatcher {
    pub fn new(roster: Vec<Advertiser>) -> Self {
        Self { roster }
    }

    pub fn interested_audiences(&self, profile: &AudienceProfile) -> InterestedAudiences {
        let codes: Vec<AudienceCode> = profile
            .iter()
            .filter(|(_, weight)| *weight >= INTEREST_THRESHOLD)
            .map(|(code, _)| code)
            .collect();

        if !codes.is_empty() {
            return InterestedAudiences {
                codes,
                fallback: false,
            };
        }

        let codes = profile
            .ranked()
            .into_iter()
            .take(FALLBACK_AUDIENCES)
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(code, _)| code)
            .collect();

        InterestedAudiences {
            codes,
            fallback: true,
        }
    }

    pub fn rank(&self, profile: &AudienceProfile) -> AdvertiserRanking {
        let interested = self.interested_audiences(profile);

        let mut matches: Vec<AdvertiserMatch> = self
            .roster
            .iter()
            .map(|advertiser| score_advertiser(advertiser, profile, &interested))
            .collect();

        // stable: ties keep roster order
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });

        AdvertiserRanking {
            interested,
            matches,
        }
    }
}

fn score_advertiser(
    advertiser: &Advertiser,
    profile: &AudienceProfile,
    interested: &InterestedAudiences,
) -> AdvertiserMatch {
    let targeted: Vec<AudienceCode> = advertiser
        .target_audience
        .keys()
        .copied()
        .filter(|code| interested.contains(*code))
        .collect();

    let quality = advertiser.quality as f64;
    let match_score = if targeted.is_empty() {
        quality * UNTARGETED_QUALITY_FACTOR
    } else {
        targeted.iter().fold(quality, |score, code| {
            let importance = advertiser.importance(*code).unwrap_or(0) as f64;
            score + importance * profile.get(*code)
        })
    };

    AdvertiserMatch {
        advertiser_id: advertiser.id.clone(),
        display_name: advertiser.display_name.clone(),
        quality: advertiser.quality,
        match_score,
        targeted,
    }
}
