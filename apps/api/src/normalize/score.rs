use serde_json::Value;

use crate::normalize::models::ScoreBreakdown;
use crate::normalize::value::{at, number};

/// Builds a `ScoreBreakdown` from a scoring response.
///
/// Reads `SuggestedScore` and `ApplicantScoreBreakdown` from the top level,
/// or from the first entry of `Matches` when the top level has no score.
/// Absent sub-scores are zero; the overall score is taken as-is.
pub fn normalize_score(raw: &Value) -> ScoreBreakdown {
    let scored = if at(raw, "/SuggestedScore").is_some() {
        raw
    } else {
        at(raw, "/Matches/0").unwrap_or(raw)
    };

    let sub = |name: &str| number(at(scored, &format!("/ApplicantScoreBreakdown/{name}")));

    ScoreBreakdown {
        overall: number(at(scored, "/SuggestedScore")),
        skills: sub("Skills"),
        experience: sub("Experience"),
        education: sub("Education"),
        languages: sub("Languages"),
    }
}
