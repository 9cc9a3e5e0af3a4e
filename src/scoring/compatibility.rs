use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use crate::tables::CompatibilityTable;
use crate::SelectionSet;

pub const HIGH_COMPATIBILITY: f64 = 4.0;
pub const HIGHLIGHT_TOP: usize = 5;

/// An average compatibility, or the explicit absence of any data to average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CompatibilityScore {
    Score(f64),
    NoData,
}

impl CompatibilityScore {
    fn mean(scores: &[f64]) -> Self {
        if scores.is_empty() {
            CompatibilityScore::NoData
        } else {
            CompatibilityScore::Score(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            CompatibilityScore::Score(value) => Some(value),
            CompatibilityScore::NoData => None,
        }
    }

    pub fn is_no_data(self) -> bool {
        matches!(self, CompatibilityScore::NoData)
    }
}

impl fmt::Display for CompatibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatibilityScore::Score(value) => write!(f, "{:.2}", value),
            CompatibilityScore::NoData => f.write_str("No Data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateAffinity {
    pub tag_id: String,
    pub score: f64,
    pub highly_compatible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MatrixCell {
    Diagonal,
    Score(f64),
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityMatrix {
    pub tags: Vec<String>,
    /// `cells[row][col]` compares `tags[row]` with `tags[col]`.
    pub cells: Vec<Vec<MatrixCell>>,
}

#[derive(Debug, Clone, Copy)]
pub struct CompatibilityScorer<'a> {
    table: &'a CompatibilityTable,
}

impl<'a> CompatibilityScorer<'a> {
    pub fn new(table: &'a CompatibilityTable) -> Self {
        Self { table }
    }

    pub fn lookup(&self, a: &str, b: &str) -> Option<f64> {
        self.table.lookup(a, b)
    }

    /// Mean over every unordered pair in the selection that has a stored score.
    pub fn pairwise_average(&self, selection: &SelectionSet) -> CompatibilityScore {
        let tags: Vec<&str> = selection.iter().collect();
        let mut scores = Vec::new();

        for (index, a) in tags.iter().enumerate() {
            for b in &tags[index + 1..] {
                if let Some(score) = self.lookup(a, b) {
                    scores.push(score);
                }
            }
        }

        CompatibilityScore::mean(&scores)
    }

    pub fn affinity_of(&self, candidate: &str, selection: &SelectionSet) -> CompatibilityScore {
        let scores: Vec<f64> = selection
            .iter()
            .filter(|selected| *selected != candidate)
            .filter_map(|selected| self.lookup(candidate, selected))
            .collect();

        CompatibilityScore::mean(&scores)
    }

    /// Unselected tags from `universe` with a defined affinity, best first. A tag is flagged
    /// highly compatible when it scores at least 4.0 or ranks among the top five.
    pub fn rank_candidates<'u, I>(&self, selection: &SelectionSet, universe: I) -> Vec<CandidateAffinity>
    where
        I: IntoIterator<Item = &'u str>,
    {
        let candidates: BTreeSet<&str> = universe
            .into_iter()
            .filter(|tag_id| !selection.contains(tag_id))
            .collect();

        let mut ranked: Vec<CandidateAffinity> = candidates
            .into_iter()
            .filter_map(|tag_id| {
                self.affinity_of(tag_id, selection)
                    .value()
                    .map(|score| CandidateAffinity {
                        tag_id: tag_id.to_string(),
                        score,
                        highly_compatible: false,
                    })
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        for (position, candidate) in ranked.iter_mut().enumerate() {
            candidate.highly_compatible =
                position < HIGHLIGHT_TOP || candidate.score >= HIGH_COMPATIBILITY;
        }

        ranked
    }

    pub fn matrix(&self, selection: &SelectionSet) -> CompatibilityMatrix {
        let tags: Vec<String> = selection.iter().map(str::to_string).collect();
        let cells = tags
            .iter()
            .map(|row| {
                tags.iter()
                    .map(|col| {
                        if row == col {
                            MatrixCell::Diagonal
                        } else {
                            match self.lookup(row, col) {
                                Some(score) => MatrixCell::Score(score),
                                None => MatrixCell::NoData,
                            }
                        }
                    })
                    .collect()
            })
            .collect();

        CompatibilityMatrix { tags, cells }
    }
}
