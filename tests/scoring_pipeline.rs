mod common;

use common::{approx, profile, tag, western_data, western_tags};
use story_advisor::scoring::{
    AdvertiserMatcher, AudienceAggregator, HolidayMatcher, PositioningScorer,
};
use story_advisor::tables::{
    builtin_roster, Advertiser, AudienceGroup, AudienceGroupTable, Holiday, HolidayTable, TagTable,
};
use story_advisor::{
    Advisor, AdvisorError, AudienceCode, AudienceProfile, Category, ReferenceData, SelectionSet,
};

use AudienceCode::*;

#[test]
fn aggregator_takes_unweighted_mean() {
    let mut tags = TagTable::new();
    tags.insert(tag("GENRE_DRAMA", &[(TF, 4.0)]));
    tags.insert(tag("SETTING_SPACE", &[(TF, 2.0)]));

    let selection: SelectionSet = ["GENRE_DRAMA", "SETTING_SPACE"].into_iter().collect();
    let aggregate = AudienceAggregator::new(&tags).aggregate(&selection).unwrap();

    assert!(approx(aggregate.profile.get(TF), 3.0));
    assert!(approx(aggregate.profile.get(TM), 0.0));
    assert_eq!(aggregate.resolved.len(), 2);
}

#[test]
fn aggregator_ignores_unknown_tags() {
    let tags = western_tags();
    let selection: SelectionSet = ["PROTAGONIST_COWBOY", "PROTAGONIST_ALIEN"].into_iter().collect();

    let aggregate = AudienceAggregator::new(&tags).aggregate(&selection).unwrap();

    assert_eq!(aggregate.resolved, vec!["PROTAGONIST_COWBOY".to_string()]);
    assert_eq!(aggregate.ignored, vec!["PROTAGONIST_ALIEN".to_string()]);
    assert!(approx(aggregate.profile.get(TM), 5.0));
}

#[test]
fn aggregator_rejects_selection_without_known_tags() {
    let tags = western_tags();
    let selection: SelectionSet = ["FINALE_NOPE"].into_iter().collect();

    let result = AudienceAggregator::new(&tags).aggregate(&selection);

    assert_eq!(result.unwrap_err(), AdvisorError::EmptySelection { requested: 1 });
}

#[test]
fn aggregator_collapses_duplicate_selections() {
    let mut tags = TagTable::new();
    tags.insert(tag("GENRE_DRAMA", &[(AF, 4.0)]));
    tags.insert(tag("GENRE_COMEDY", &[(AF, 1.0)]));

    let selection: SelectionSet = ["GENRE_DRAMA", "GENRE_DRAMA", "GENRE_COMEDY"]
        .into_iter()
        .collect();
    let aggregate = AudienceAggregator::new(&tags).aggregate(&selection).unwrap();

    assert!(approx(aggregate.profile.get(AF), 2.5));
}

#[test]
fn positioning_floors_zero_profile_at_one() {
    let groups = AudienceGroupTable::builtin();
    let scores = PositioningScorer::new(&groups).score(&AudienceProfile::new());

    assert!(approx(scores.artistic, 1.0));
    assert!(approx(scores.commercial, 1.0));
}

#[test]
fn positioning_scales_by_group_weights() {
    let groups = AudienceGroupTable::builtin();
    let scores = PositioningScorer::new(&groups).score(&profile(&[(YM, 2.0)]));

    assert!(approx(scores.artistic, 4.0));
    assert!(approx(scores.commercial, 2.5));
}

#[test]
fn positioning_caps_at_five_and_skips_missing_groups() {
    let mut groups = AudienceGroupTable::new();
    groups.insert(AudienceGroup::new(AM, 0.0, 1.0, 0.1));

    let scores = PositioningScorer::new(&groups).score(&profile(&[(AM, 3.0), (TF, 5.0)]));

    assert!(approx(scores.artistic, 5.0));
    assert!(approx(scores.commercial, 1.5));
}

#[test]
fn interested_audiences_use_threshold() {
    let matcher = AdvertiserMatcher::new(builtin_roster());
    let interested = matcher.interested_audiences(&profile(&[(TM, 2.5), (YF, 2.4), (AM, 4.0)]));

    assert_eq!(interested.codes, vec![TM, AM]);
    assert!(!interested.fallback);
}

#[test]
fn interested_audiences_fall_back_to_top_two_positive() {
    let matcher = AdvertiserMatcher::new(builtin_roster());

    let interested = matcher.interested_audiences(&profile(&[(TF, 2.0), (AM, 1.0), (YM, 0.5)]));
    assert_eq!(interested.codes, vec![TF, AM]);
    assert!(interested.fallback);

    let single = matcher.interested_audiences(&profile(&[(TM, 1.0)]));
    assert_eq!(single.codes, vec![TM]);
}

#[test]
fn zero_profile_scores_every_advertiser_at_half_quality() {
    let matcher = AdvertiserMatcher::new(builtin_roster());
    let ranking = matcher.rank(&AudienceProfile::new());

    assert!(ranking.interested.codes.is_empty());
    assert!(ranking.interested.fallback);
    assert_eq!(ranking.matches.len(), 8);
    for advertiser in &ranking.matches {
        assert!(approx(advertiser.match_score, advertiser.quality as f64 * 0.5));
        assert!(advertiser.targeted.is_empty());
    }

    let order: Vec<&str> = ranking
        .matches
        .iter()
        .map(|advertiser| advertiser.advertiser_id.as_str())
        .collect();
    assert_eq!(
        order,
        vec![
            "NBG",
            "SPARK",
            "NATE_SPARROW_PRESS",
            "VELVET_GLOSS",
            "ROSS_AND_ROSS_BROS",
            "VIEN_PASCAL",
            "PIERRE_ZOLA_COMPANY",
            "SPICE_MICE",
        ]
    );

    let shortlist = ranking.shortlist();
    assert!(shortlist.fallback);
    assert_eq!(shortlist.advertisers.len(), 3);
    assert_eq!(shortlist.advertisers[0].advertiser_id, "NBG");
}

#[test]
fn advertiser_score_adds_importance_times_weight() {
    let roster = vec![
        Advertiser::new("A", "A", 3, &[(YM, 2), (TF, 1)]),
        Advertiser::new("B", "B", 1, &[(AF, 2)]),
    ];
    let matcher = AdvertiserMatcher::new(roster);
    let ranking = matcher.rank(&profile(&[(YM, 3.0), (TF, 1.0)]));

    assert_eq!(ranking.matches[0].advertiser_id, "A");
    assert!(approx(ranking.matches[0].match_score, 3.0 + 2.0 * 3.0));
    assert_eq!(ranking.matches[0].targeted, vec![YM]);
    assert!(approx(ranking.matches[1].match_score, 0.5));
}

#[test]
fn empty_roster_yields_empty_ranking() {
    let matcher = AdvertiserMatcher::new(Vec::new());
    let ranking = matcher.rank(&profile(&[(YM, 3.0)]));

    assert!(ranking.matches.is_empty());
    let shortlist = ranking.shortlist();
    assert!(shortlist.advertisers.is_empty());
}

#[test]
fn holiday_counts_only_audiences_above_two() {
    let holiday = Holiday::fixed("VALENTINE", 2, 14)
        .with_bonus(TF, 0.5)
        .with_bonus(YF, 0.1);
    let matched = HolidayMatcher::new().score(&profile(&[(TF, 1.9), (YF, 3.0)]), &holiday);

    assert!(approx(matched.total_score, 3.0 * 0.1 * 3.0));
    assert_eq!(matched.factors.len(), 3);
    assert!(matched.factors.iter().all(|factor| factor.audience == YF));
    assert_eq!(matched.factors[0].display(), "Young Female (+0.30)");
}

#[test]
fn holiday_factors_require_significant_bonus() {
    let holiday = Holiday::fixed("ARBOR_DAY", 4, 24).with_bonus(AF, 0.04);
    let matched = HolidayMatcher::new().score(&profile(&[(AF, 2.0)]), &holiday);

    assert!(approx(matched.total_score, 0.24));
    assert!(matched.factors.is_empty());
}

#[test]
fn holidays_rank_by_total_score() {
    let mut holidays = HolidayTable::new();
    holidays.insert(Holiday::fixed("A_DAY", 1, 1).with_bonus(TM, 0.1));
    holidays.insert(Holiday::fixed("B_DAY", 1, 2).with_bonus(TM, 0.3));
    holidays.insert(Holiday::fixed("C_DAY", 1, 3));

    let ranked = HolidayMatcher::new().rank(&profile(&[(TM, 3.0)]), &holidays);
    let order: Vec<&str> = ranked.iter().map(|holiday| holiday.holiday_id.as_str()).collect();

    assert_eq!(order, vec!["B_DAY", "A_DAY", "C_DAY"]);
    assert_eq!(ranked[0].display_name, "B Day");
    assert_eq!(ranked[2].star_rating(), 1);
}

#[test]
fn holiday_display_dates() {
    assert_eq!(Holiday::fixed("ST_PATRICK", 3, 17).display_date(), "March 17");
    assert_eq!(
        Holiday::nth_weekday("THANKSGIVING", 11, 4, 3).display_date(),
        "4th Thursday of November"
    );
    assert_eq!(
        Holiday::nth_weekday("MEMORIAL_DAY", 5, 5, 0).display_date(),
        "Last Monday of May"
    );

    let mut odd = Holiday::fixed("ODD", 7, 4);
    odd.date_type = story_advisor::tables::DateType::from_code(7);
    assert_eq!(odd.display_date(), "July 4");
}

#[test]
fn holiday_star_rating_and_relevant_factors() {
    let holiday = Holiday::fixed("HALLOWEEN", 10, 31)
        .with_bonus(TM, 0.05)
        .with_bonus(YM, 0.05);
    let audience = profile(&[(TM, 3.0), (YM, 2.2)]);
    let matched = HolidayMatcher::new().score(&audience, &holiday);

    // 3 * (0.15 + 0.11) = 0.78 -> 7.8 / 2 = 3.9 -> 4 stars
    assert!(approx(matched.total_score, 0.78));
    assert_eq!(matched.star_rating(), 4);

    let relevant = matched.relevant_factors(&audience, 2);
    assert_eq!(relevant.len(), 2);
    assert!(relevant.iter().all(|factor| factor.audience == TM));
}

#[test]
fn western_scenario_end_to_end() {
    let advisor = Advisor::with_builtin_roster(western_data());
    let selection: SelectionSet = ["PROTAGONIST_COWBOY", "GENRE_ACTION", "SETTING_WILD_WEST"]
        .into_iter()
        .collect();

    let recommendation = advisor.recommend(&selection).unwrap();
    let profile = &recommendation.profile;

    assert!((profile.get(TM) - 4.33).abs() < 0.005);
    assert!(approx(profile.get(TF), 1.0));
    assert!(approx(profile.get(YM), 4.0));
    assert!(approx(profile.get(YF), 1.0));
    assert!((profile.get(AM) - 3.33).abs() < 0.005);
    assert!(approx(profile.get(AF), 1.0));

    assert!(recommendation.missing_categories.is_empty());
    assert!(recommendation.ignored.is_empty());
    assert_eq!(recommendation.advertisers.interested.codes, vec![TM, YM, AM]);
    assert!(!recommendation.advertisers.interested.fallback);

    assert!(approx(recommendation.positioning.artistic, 5.0));
    assert!(approx(recommendation.positioning.commercial, 5.0));

    let shortlist = recommendation.advertisers.shortlist();
    let names: Vec<&str> = shortlist
        .advertisers
        .iter()
        .map(|advertiser| advertiser.advertiser_id.as_str())
        .collect();
    assert!(!shortlist.fallback);
    assert_eq!(names, vec!["PIERRE_ZOLA_COMPANY", "SPICE_MICE", "SPARK"]);
    assert!(approx(shortlist.advertisers[0].match_score, 1.0 + 2.0 * (13.0 + 12.0 + 10.0) / 3.0));

    let holidays: Vec<&str> = recommendation
        .holidays
        .iter()
        .map(|holiday| holiday.holiday_id.as_str())
        .collect();
    assert_eq!(holidays, vec!["HALLOWEEN", "VALENTINE"]);
    assert!(approx(recommendation.holidays[0].total_score, 3.0 * (0.15 * 13.0 / 3.0 + 0.12 * 4.0)));
    assert_eq!(recommendation.holidays[0].display_date, "October 31");
    assert_eq!(recommendation.holidays[0].factors[0].audience, TM);

    let cowboy = recommendation
        .selected
        .iter()
        .find(|tag| tag.id == "PROTAGONIST_COWBOY")
        .unwrap();
    assert_eq!(cowboy.category, Category::Protagonist);
    assert_eq!(cowboy.display_name, "Cowboy");
}

#[test]
fn selected_tags_are_categorised_from_their_ids() {
    let mut tags = TagTable::new();
    tags.insert(tag("COMEDY", &[(TF, 1.0)]));
    tags.insert(tag("SUPPORTINGCHARACTER_BUTLER", &[(TF, 2.0)]));
    tags.insert(tag("THEME_REVENGE", &[(TF, 3.0)]));
    tags.insert(tag("MONSTER_TRUCK", &[(TF, 4.0)]));
    let advisor = Advisor::with_builtin_roster(ReferenceData {
        tags,
        ..ReferenceData::default()
    });
    let selection: SelectionSet = ["COMEDY", "SUPPORTINGCHARACTER_BUTLER", "THEME_REVENGE", "MONSTER_TRUCK"]
        .into_iter()
        .collect();

    let recommendation = advisor.recommend(&selection).unwrap();

    let categories: Vec<(&str, Category)> = recommendation
        .selected
        .iter()
        .map(|tag| (tag.id.as_str(), tag.category.clone()))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("COMEDY", Category::Genre),
            ("MONSTER_TRUCK", Category::Custom("MONSTER".to_string())),
            ("SUPPORTINGCHARACTER_BUTLER", Category::SupportingCharacter),
            ("THEME_REVENGE", Category::ThemeAndEvents),
        ]
    );
    assert_eq!(
        advisor.data().tags.get("THEME_REVENGE").unwrap().category(),
        Category::ThemeAndEvents
    );
}

#[test]
fn recommendation_reports_missing_categories_but_still_computes() {
    let advisor = Advisor::with_builtin_roster(western_data());
    let selection: SelectionSet = ["GENRE_ACTION"].into_iter().collect();

    let recommendation = advisor.recommend(&selection).unwrap();

    assert_eq!(
        recommendation.missing_categories,
        vec![Category::Protagonist, Category::Setting]
    );
    assert!(approx(recommendation.profile.get(YM), 5.0));
}

#[test]
fn pipeline_is_idempotent() {
    let advisor = Advisor::with_builtin_roster(western_data());
    let selection: SelectionSet = ["PROTAGONIST_COWBOY", "GENRE_ACTION", "SETTING_WILD_WEST"]
        .into_iter()
        .collect();

    let first = serde_json::to_string(&advisor.recommend(&selection).unwrap()).unwrap();
    let second = serde_json::to_string(&advisor.recommend(&selection).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn replacing_data_changes_fingerprint() {
    let mut advisor = Advisor::with_builtin_roster(western_data());
    let selection: SelectionSet = ["GENRE_ACTION"].into_iter().collect();
    let before = advisor.recommend(&selection).unwrap();

    let mut data = western_data();
    data.tags.insert(tag("GENRE_ACTION", &[(AF, 5.0)]));
    advisor.replace_data(data);
    let after = advisor.recommend(&selection).unwrap();

    assert_ne!(before.data_fingerprint, after.data_fingerprint);
    assert!(approx(after.profile.get(AF), 5.0));
    assert!(approx(after.profile.get(YM), 0.0));
}
