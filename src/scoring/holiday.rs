use serde::Serialize;
use std::cmp::Ordering;

use crate::scoring::advertiser::INTEREST_THRESHOLD;
use crate::tables::{Holiday, HolidayTable, WeightType};
use crate::{AudienceCode, AudienceProfile};

pub const HOLIDAY_AUDIENCE_THRESHOLD: f64 = 2.0;
pub const SIGNIFICANT_BONUS: f64 = 0.08;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchFactor {
    pub audience: AudienceCode,
    pub label: &'static str,
    pub weight_type: WeightType,
    pub weighted: f64,
}

impl MatchFactor {
    pub fn display(&self) -> String {
        format!("{} (+{:.2})", self.label, self.weighted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolidayMatch {
    pub holiday_id: String,
    pub display_name: String,
    pub display_date: String,
    pub total_score: f64,
    pub factors: Vec<MatchFactor>,
}

impl HolidayMatch {
    /// One to five stars, from the total score scaled by ten.
    pub fn star_rating(&self) -> u8 {
        let scaled = self.total_score * 10.0;
        let stars = (scaled / 2.0).floor() + 1.0;
        if stars.is_nan() {
            return 1;
        }
        stars.max(1.0).min(5.0) as u8
    }

    pub fn relevant_factors(&self, profile: &AudienceProfile, limit: usize) -> Vec<&MatchFactor> {
        self.factors
            .iter()
            .filter(|factor| profile.get(factor.audience) >= INTEREST_THRESHOLD)
            .take(limit)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HolidayMatcher;

impl HolidayMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, profile: &AudienceProfile, holiday: &Holiday) -> HolidayMatch {
        let mut total_score = 0.0;
        let mut factors = Vec::new();

        for (code, weight) in profile.iter() {
            if weight < HOLIDAY_AUDIENCE_THRESHOLD {
                continue;
            }
            for weight_type in WeightType::ALL {
                let Some(bonus) = holiday.bonus(code, weight_type) else {
                    continue;
                };
                let weighted = bonus * weight;
                total_score += weighted;
                if weighted > SIGNIFICANT_BONUS {
                    factors.push(MatchFactor {
                        audience: code,
                        label: code.label(),
                        weight_type,
                        weighted,
                    });
                }
            }
        }

        factors.sort_by(|a, b| b.weighted.partial_cmp(&a.weighted).unwrap_or(Ordering::Equal));

        HolidayMatch {
            holiday_id: holiday.id.clone(),
            display_name: holiday.display_name(),
            display_date: holiday.display_date(),
            total_score,
            factors,
        }
    }

    pub fn rank(&self, profile: &AudienceProfile, holidays: &HolidayTable) -> Vec<HolidayMatch> {
        let mut matches: Vec<HolidayMatch> = holidays
            .iter()
            .map(|holiday| self.score(profile, holiday))
            .collect();

        matches.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(Ordering::Equal)
        });
        matches
    }
}
