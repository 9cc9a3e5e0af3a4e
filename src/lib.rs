pub mod category;
pub mod config;
pub mod error;
pub mod scoring;
pub mod tables;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use crate::category::Category;
pub use crate::error::{AdvisorError, ConfigError, TableError, TableKind};
pub use crate::scoring::{Advisor, CompatibilityReport, Recommendation};
pub use crate::tables::{LoadedData, ReferenceData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AudienceCode {
    TF,
    TM,
    YF,
    YM,
    AF,
    AM,
}

impl AudienceCode {
    pub const ALL: [AudienceCode; 6] = [
        AudienceCode::TF,
        AudienceCode::TM,
        AudienceCode::YF,
        AudienceCode::YM,
        AudienceCode::AF,
        AudienceCode::AM,
    ];

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "TF" => Some(AudienceCode::TF),
            "TM" => Some(AudienceCode::TM),
            "YF" => Some(AudienceCode::YF),
            "YM" => Some(AudienceCode::YM),
            "AF" => Some(AudienceCode::AF),
            "AM" => Some(AudienceCode::AM),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AudienceCode::TF => "TF",
            AudienceCode::TM => "TM",
            AudienceCode::YF => "YF",
            AudienceCode::YM => "YM",
            AudienceCode::AF => "AF",
            AudienceCode::AM => "AM",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AudienceCode::TF => "Teen Female",
            AudienceCode::TM => "Teen Male",
            AudienceCode::YF => "Young Female",
            AudienceCode::YM => "Young Male",
            AudienceCode::AF => "Adult Female",
            AudienceCode::AM => "Adult Male",
        }
    }

    fn index(self) -> usize {
        match self {
            AudienceCode::TF => 0,
            AudienceCode::TM => 1,
            AudienceCode::YF => 2,
            AudienceCode::YM => 3,
            AudienceCode::AF => 4,
            AudienceCode::AM => 5,
        }
    }
}

/// Per-audience weight vector. Every code is always present; unset codes read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AudienceProfile {
    weights: [f64; 6],
}

impl AudienceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (AudienceCode, f64)>,
    {
        let mut profile = Self::default();
        for (code, value) in pairs {
            profile.set(code, value);
        }
        profile
    }

    pub fn get(&self, code: AudienceCode) -> f64 {
        self.weights[code.index()]
    }

    pub fn set(&mut self, code: AudienceCode, value: f64) {
        self.weights[code.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (AudienceCode, f64)> + '_ {
        AudienceCode::ALL.iter().map(move |code| (*code, self.get(*code)))
    }

    /// Codes ordered by weight, highest first. Equal weights keep canonical code order.
    pub fn ranked(&self) -> Vec<(AudienceCode, f64)> {
        let mut ranked: Vec<(AudienceCode, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// The tags chosen for one computation. Order carries no meaning and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    tags: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag_id: impl Into<String>) -> bool {
        self.tags.insert(tag_id.into())
    }

    pub fn contains(&self, tag_id: &str) -> bool {
        self.tags.contains(tag_id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut selection = SelectionSet::new();
        for tag_id in iter {
            selection.insert(tag_id);
        }
        selection
    }
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
