mod common;

use common::approx;
use std::fs;
use std::path::PathBuf;
use story_advisor::config::{AdvisorConfig, DataPaths};
use story_advisor::tables::{
    AudienceGroupTable, CompatibilityTable, DateType, HolidayTable, Tag, TagTable, WeightType,
};
use story_advisor::{
    AudienceCode, AudienceProfile, ConfigError, ReferenceData, TableError, TableKind,
};

#[test]
fn tag_table_parses_string_weights_and_defaults_missing_codes() {
    let json = r#"{
        "PROTAGONIST_COWBOY": {
            "displayName": "Cowboy",
            "weights": {"TM": "5.0", "TF": "1", "YM": 4, "XX": "2.0"}
        },
        "GENRE_ACTION": {"weights": {}}
    }"#;

    let table = TagTable::from_json_str(json).unwrap();
    let cowboy = table.get("PROTAGONIST_COWBOY").unwrap();

    assert_eq!(table.len(), 2);
    assert!(approx(cowboy.weights.get(AudienceCode::TM), 5.0));
    assert!(approx(cowboy.weights.get(AudienceCode::YM), 4.0));
    assert!(approx(cowboy.weights.get(AudienceCode::AF), 0.0));
    assert_eq!(table.display_name("PROTAGONIST_COWBOY"), "Cowboy");
    assert_eq!(table.display_name("GENRE_ACTION"), "Action");
}

#[test]
fn tag_table_rejects_non_numeric_weight() {
    let json = r#"{"GENRE_ACTION": {"weights": {"TM": "lots"}}}"#;

    let err = TagTable::from_json_str(json).unwrap_err();

    match err {
        TableError::InvalidWeightFormat {
            table,
            key,
            field,
            value,
        } => {
            assert_eq!(table, TableKind::Tags);
            assert_eq!(key, "GENRE_ACTION");
            assert_eq!(field, "TM");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn tag_table_ignores_unknown_codes_without_parsing_them() {
    let json = r#"{"GENRE_ACTION": {"weights": {"XX": "n/a", "YM": "4"}}}"#;

    let table = TagTable::from_json_str(json).unwrap();
    let action = table.get("GENRE_ACTION").unwrap();

    assert!(approx(action.weights.get(AudienceCode::YM), 4.0));
}

#[test]
fn tag_table_skips_malformed_entries() {
    let json = r#"{"GENRE_ACTION": 5, "GENRE_DRAMA": {"weights": {"AF": "3"}}}"#;

    let table = TagTable::from_json_str(json).unwrap();

    assert_eq!(table.len(), 1);
    assert!(table.contains("GENRE_DRAMA"));
}

#[test]
fn tag_ids_with_cyrillic_lookalikes_are_normalised() {
    let json = "{\"PROTAGONIST_\u{0421}OWBOY\": {\"displayName\": \"\u{0421}owboy\", \"weights\": {\"TM\": \"5\"}}}";

    let table = TagTable::from_json_str(json).unwrap();

    assert!(table.contains("PROTAGONIST_COWBOY"));
    assert_eq!(table.display_name("PROTAGONIST_COWBOY"), "Cowboy");
}

#[test]
fn audience_groups_parse_and_skip_unknown_codes() {
    let json = r#"{
        "YM": {"baseWeight": "0.3", "artWeight": "0.4", "commercialWeight": "0.25", "id": "YM"},
        "ZZ": {"artWeight": "1.0"}
    }"#;

    let table = AudienceGroupTable::from_json_str(json).unwrap();
    let group = table.get(AudienceCode::YM).unwrap();

    assert_eq!(table.len(), 1);
    assert!(approx(group.art_weight, 0.4));
    assert!(approx(group.commercial_weight, 0.25));
    assert!(approx(group.com_default_audience, 0.0));
}

#[test]
fn holidays_parse_date_types_and_bonuses() {
    let json = r#"{
        "THANKSGIVING": {
            "dateType": 1, "day": 4, "month": 11, "dayOfWeek": 3,
            "audienceBonuses": {"AM|0": "0.220", "AF|2": 0.1},
            "id": "THANKSGIVING"
        }
    }"#;

    let table = HolidayTable::from_json_str(json).unwrap();
    let holiday = table.get("THANKSGIVING").unwrap();

    assert_eq!(holiday.date_type, DateType::NthWeekday);
    assert_eq!(holiday.bonus(AudienceCode::AM, WeightType::Base), Some(0.22));
    assert_eq!(holiday.bonus(AudienceCode::AF, WeightType::Commercial), Some(0.1));
    assert_eq!(holiday.bonus(AudienceCode::AF, WeightType::Base), None);
    assert_eq!(holiday.display_date(), "4th Thursday of November");
}

#[test]
fn holidays_reject_fractional_day() {
    let json = r#"{"ODD": {"dateType": 0, "day": "1.5", "month": 2}}"#;

    let err = HolidayTable::from_json_str(json).unwrap_err();

    assert_eq!(err.table(), TableKind::Holidays);
}

#[test]
fn compatibility_parses_one_direction() {
    let json = "{\"PROTAGONIST_COWBOY\": {\"WILD_WEST\": \"5.0\", \"\u{0410}CTION\": \"4.5\"}}";

    let table = CompatibilityTable::from_json_str(json).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup("WILD_WEST", "PROTAGONIST_COWBOY"), Some(5.0));
    assert_eq!(table.lookup("ACTION", "PROTAGONIST_COWBOY"), Some(4.5));
}

#[test]
fn load_falls_back_per_table_and_reports_errors() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("TagsAudienceWeights.json"),
        r#"{"GENRE_ACTION": {"weights": {"YM": "5"}}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("AudienceGroups.json"),
        r#"{"YM": {"artWeight": "high"}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("TagCompatibilityData.json"), "{ not json").unwrap();

    let paths = DataPaths {
        data_dir: dir.path().to_path_buf(),
        ..DataPaths::default()
    };
    let loaded = ReferenceData::load(&paths);

    assert_eq!(loaded.data.tags.len(), 1);
    assert_eq!(loaded.data.audience_groups, AudienceGroupTable::builtin());
    assert_eq!(loaded.data.holidays, HolidayTable::builtin());
    assert!(loaded.data.compatibility.is_empty());

    let failed: Vec<TableKind> = loaded.errors.iter().map(TableError::table).collect();
    assert_eq!(failed, vec![TableKind::AudienceGroups, TableKind::Compatibility]);
}

#[test]
fn load_from_missing_directory_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths {
        data_dir: dir.path().join("absent"),
        ..DataPaths::default()
    };

    let loaded = ReferenceData::load(&paths);

    assert!(loaded.errors.is_empty());
    assert!(loaded.data.tags.is_empty());
    assert_eq!(loaded.data, ReferenceData::default());
}

#[test]
fn fingerprint_is_stable_for_equal_data() {
    let first = ReferenceData::default();
    let second = ReferenceData::default();

    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.fingerprint().len(), 16);

    let mut changed = ReferenceData::default();
    changed.compatibility.insert("A", "B", 3.0);
    assert_ne!(first.fingerprint(), changed.fingerprint());
}

#[test]
fn config_round_trips_through_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("story-advisor.toml");

    let mut config = AdvisorConfig::default();
    config.data.tags = PathBuf::from("/srv/tags.json");
    config.display.candidate_limit = 7;
    config.write(&path).unwrap();

    let (loaded, loaded_from) = AdvisorConfig::load(Some(path.clone())).unwrap();

    assert_eq!(loaded_from, Some(path));
    assert_eq!(loaded.display.candidate_limit, 7);
    assert_eq!(loaded.data.tags_path(), PathBuf::from("/srv/tags.json"));
    assert_eq!(
        loaded.data.holidays_path(),
        loaded.data.data_dir.join("Holidays.json")
    );
}

#[test]
fn config_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[display]\nholiday_limit = \"three\"\n").unwrap();

    let err = AdvisorConfig::load(Some(path)).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn fingerprint_hashes_table_contents() {
    let empty_payload_digest = "e3b0c44298fc1c14";

    assert_ne!(ReferenceData::default().fingerprint(), empty_payload_digest);

    let mut tags = TagTable::new();
    tags.insert(Tag::new("GENRE_DRAMA", AudienceProfile::new()));
    let data = ReferenceData {
        tags,
        ..ReferenceData::default()
    };
    assert_ne!(data.fingerprint(), empty_payload_digest);
    assert_ne!(data.fingerprint(), ReferenceData::default().fingerprint());
}
