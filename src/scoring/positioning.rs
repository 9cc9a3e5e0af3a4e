use serde::Serialize;

use crate::tables::AudienceGroupTable;
use crate::AudienceProfile;

pub const POSITIONING_SCALE: f64 = 5.0;
pub const POSITIONING_MIN: f64 = 1.0;
pub const POSITIONING_MAX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositioningScores {
    pub artistic: f64,
    pub commercial: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PositioningScorer<'a> {
    groups: &'a AudienceGroupTable,
}

impl<'a> PositioningScorer<'a> {
    pub fn new(groups: &'a AudienceGroupTable) -> Self {
        Self { groups }
    }

    pub fn score(&self, profile: &AudienceProfile) -> PositioningScores {
        let mut artistic = 0.0;
        let mut commercial = 0.0;

        for (code, weight) in profile.iter() {
            if let Some(group) = self.groups.get(code) {
                artistic += weight * group.art_weight * POSITIONING_SCALE;
                commercial += weight * group.commercial_weight * POSITIONING_SCALE;
            }
        }

        PositioningScores {
            artistic: clamp_positioning(artistic),
            commercial: clamp_positioning(commercial),
        }
    }
}

/// Floors at 1.0 rather than 0: no story is reported below "1" on either axis.
fn clamp_positioning(value: f64) -> f64 {
    if value.is_nan() {
        return POSITIONING_MIN;
    }
    value.max(POSITIONING_MIN).min(POSITIONING_MAX)
}
