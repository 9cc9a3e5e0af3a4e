#![allow(dead_code)]

use story_advisor::tables::{
    AudienceGroupTable, CompatibilityTable, HolidayTable, Tag, TagTable,
};
use story_advisor::{AudienceCode, AudienceProfile, ReferenceData};

pub const EPSILON: f64 = 1e-6;

pub fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < EPSILON
}

pub fn profile(pairs: &[(AudienceCode, f64)]) -> AudienceProfile {
    AudienceProfile::from_pairs(pairs.iter().copied())
}

pub fn tag(id: &str, weights: &[(AudienceCode, f64)]) -> Tag {
    Tag::new(id, profile(weights))
}

/// Cowboy western: three tags skewed towards male audiences.
pub fn western_tags() -> TagTable {
    use AudienceCode::*;

    let mut tags = TagTable::new();
    tags.insert(
        tag(
            "PROTAGONIST_COWBOY",
            &[(TM, 5.0), (TF, 1.0), (YM, 4.0), (YF, 1.0), (AM, 3.0), (AF, 1.0)],
        )
        .with_display_name("Cowboy"),
    );
    tags.insert(tag(
        "GENRE_ACTION",
        &[(TM, 4.0), (TF, 1.0), (YM, 5.0), (YF, 1.0), (AM, 4.0), (AF, 1.0)],
    ));
    tags.insert(tag(
        "SETTING_WILD_WEST",
        &[(TM, 4.0), (TF, 1.0), (YM, 3.0), (YF, 1.0), (AM, 3.0), (AF, 1.0)],
    ));
    tags
}

pub fn western_data() -> ReferenceData {
    ReferenceData {
        tags: western_tags(),
        audience_groups: AudienceGroupTable::builtin(),
        holidays: HolidayTable::builtin(),
        compatibility: CompatibilityTable::new(),
    }
}
