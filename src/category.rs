use serde::{Deserialize, Serialize};
use std::fmt;

pub const GENRE_TAGS: [&str; 11] = [
    "DRAMA",
    "COMEDY",
    "ACTION",
    "ROMANCE",
    "DETECTIVE",
    "ADVENTURE",
    "THRILLER",
    "HISTORICAL",
    "HORROR",
    "SCIENCE_FICTION",
    "SLAPSTICK_COMEDY",
];

pub const SETTING_TAGS: [&str; 29] = [
    "WILD_WEST",
    "MODERN_AMERICAN_CITY",
    "MODERN_AMERICAN_TOWN",
    "FANTASY_KINGDOM",
    "TROPICAL_ISLAND",
    "MODERN_AMERICAN_COUNTRYSIDE",
    "ARTHURIAN_LEGENDS",
    "AMERICAN_CIVIL_WAR",
    "CARIBBEAN",
    "GREAT_WAR",
    "MIDDLE_AGES",
    "SPACE",
    "UTOPIAN_FUTURISTIC_CITY",
    "DYSTOPIAN_FUTURISTIC_CITY",
    "VICTORIAN_ENGLAND",
    "MODERN_EUROPEAN_CITY",
    "MODERN_EUROPEAN_TOWN",
    "WW2_EUROPE",
    "WW2_PACIFIC",
    "WW2_AFRICA",
    "MODERN_EUROPEAN_COUNTRYSIDE",
    "FREE_STATES_IN_SLAVERY-ERA",
    "SLAVE_STATES_IN_SLAVERY-ERA",
    "ANCIENT_GREECE",
    "ANCIENT_ROME",
    "ANCIENT_EGYPT",
    "ANCIENT_CHINA",
    "FEUDAL_JAPAN",
    "RENAISSANCE",
];

const CATEGORY_ALIASES: [(&str, Category); 5] = [
    ("SUPPORTING CHARACTERS", Category::SupportingCharacter),
    ("SUPPORTINGCHARACTER", Category::SupportingCharacter),
    ("SUPPORTING_CHARACTERS", Category::SupportingCharacter),
    ("THEME", Category::ThemeAndEvents),
    ("EVENTS", Category::ThemeAndEvents),
];

const CATEGORY_ACRONYMS: [&str; 11] = [
    "WW2", "WWII", "WWE", "FBI", "CIA", "NASA", "USA", "UK", "AI", "RPG", "FPS",
];

const TAG_ACRONYMS: [&str; 6] = ["WW2", "USA", "UK", "FBI", "CIA", "NASA"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Genre,
    Setting,
    Protagonist,
    Antagonist,
    SupportingCharacter,
    ThemeAndEvents,
    Finale,
    Other,
    /// Free-form category taken verbatim from an unrecognised tag prefix.
    Custom(String),
}

impl Category {
    pub const CANONICAL: [Category; 7] = [
        Category::Genre,
        Category::Setting,
        Category::Protagonist,
        Category::Antagonist,
        Category::SupportingCharacter,
        Category::ThemeAndEvents,
        Category::Finale,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Genre => "GENRE",
            Category::Setting => "SETTING",
            Category::Protagonist => "PROTAGONIST",
            Category::Antagonist => "ANTAGONIST",
            Category::SupportingCharacter => "SUPPORTING_CHARACTER",
            Category::ThemeAndEvents => "THEME_AND_EVENTS",
            Category::Finale => "FINALE",
            Category::Other => "OTHER",
            Category::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Category {
        if name == "OTHER" {
            return Category::Other;
        }
        Category::CANONICAL
            .iter()
            .find(|category| category.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Category::Custom(name.to_string()))
    }

    pub fn label(&self) -> String {
        match self {
            Category::ThemeAndEvents => "Themes & Events".to_string(),
            Category::SupportingCharacter => "Supporting Characters".to_string(),
            Category::Custom(name) => beautify_words(name.split('_'), |part| {
                CATEGORY_ACRONYMS.contains(&part.to_uppercase().as_str())
            })
            .replace("Sci Fi", "Sci-Fi"),
            other => title_case(&other.as_str().replace('_', " ")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a tag identifier to its category. Total: every input yields exactly one category.
pub fn classify(tag_id: &str) -> Category {
    if GENRE_TAGS.contains(&tag_id) {
        return Category::Genre;
    }
    if SETTING_TAGS.contains(&tag_id) {
        return Category::Setting;
    }

    if tag_id.starts_with("THEME_") || tag_id.starts_with("EVENTS_") {
        return Category::ThemeAndEvents;
    }

    for category in Category::CANONICAL.iter() {
        let name = category.as_str();
        if tag_id.starts_with(name) && tag_id != name {
            return category.clone();
        }
    }

    if let Some((prefix, _)) = tag_id.split_once('_') {
        return resolve_alias(prefix).unwrap_or_else(|| Category::from_name(prefix));
    }

    Category::Other
}

/// Applies the alias table only. Idempotent.
pub fn standardize(category: &Category) -> Category {
    match category {
        Category::Custom(name) => resolve_alias(name).unwrap_or_else(|| Category::from_name(name)),
        other => other.clone(),
    }
}

fn resolve_alias(name: &str) -> Option<Category> {
    CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, category)| category.clone())
}

/// Human-readable name for a tag identifier that carries no display name of its own.
pub fn beautify_tag_id(tag_id: &str) -> String {
    match tag_id {
        "WW2_EUROPE" => return "WW2 Europe".to_string(),
        "WW2_PACIFIC" => return "WW2 Pacific".to_string(),
        "WW2_AFRICA" => return "WW2 Africa".to_string(),
        _ => {}
    }
    if TAG_ACRONYMS.contains(&tag_id) {
        return tag_id.to_string();
    }

    let parts: Vec<&str> = tag_id.split('_').collect();
    let enumerated = GENRE_TAGS.contains(&tag_id) || SETTING_TAGS.contains(&tag_id);
    let skip = if enumerated || parts.len() < 2 { 0 } else { 1 };
    beautify_words(parts.into_iter().skip(skip), |part| TAG_ACRONYMS.contains(&part))
}

fn beautify_words<'a>(
    parts: impl Iterator<Item = &'a str>,
    is_acronym: impl Fn(&str) -> bool,
) -> String {
    let words: Vec<String> = parts
        .filter(|part| !part.is_empty())
        .map(|part| {
            if is_acronym(part) {
                part.to_uppercase()
            } else {
                title_case(part)
            }
        })
        .collect();
    words.join(" ")
}

fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}
