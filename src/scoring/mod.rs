pub mod advertiser;
pub mod aggregate;
pub mod compatibility;
pub mod holiday;
pub mod pipeline;
pub mod positioning;

pub use advertiser::{AdvertiserMatch, AdvertiserMatcher, AdvertiserRanking, InterestedAudiences, Shortlist};
pub use aggregate::{Aggregate, AudienceAggregator};
pub use compatibility::{
    CandidateAffinity, CompatibilityMatrix, CompatibilityScore, CompatibilityScorer, MatrixCell,
};
pub use holiday::{HolidayMatch, HolidayMatcher, MatchFactor};
pub use pipeline::{Advisor, CompatibilityReport, Recommendation, ResolvedTag};
pub use positioning::{PositioningScorer, PositioningScores};
