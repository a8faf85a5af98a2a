// ATS compatibility: JD keyword extraction and before/after keyword coverage scoring.
// Both are pure functions; no I/O.

pub mod keywords;
pub mod scorer;

pub use keywords::extract_jd_keywords;
pub use scorer::{calculate_ats_score, AtsScoreResult};
