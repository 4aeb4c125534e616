use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::export::ExportError;
use crate::normalize::{
    normalize_candidate, normalize_job, normalize_score, unwrap_envelope, CandidateProfile,
    JobProfile, ScoreBreakdown,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    pub cv_name: String,
    pub job_name: String,
}

/// The unwrapped external responses, kept verbatim for traceability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTrees {
    pub resume: Value,
    pub job: Value,
    pub scoring: Value,
}

/// Everything produced by one scoring request. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportBundle {
    pub candidate: CandidateProfile,
    pub job: JobProfile,
    pub score: ScoreBreakdown,
    pub files: SourceFiles,
    pub raw: RawTrees,
}

impl ExportBundle {
    /// Normalizes the three external responses (envelopes allowed) into a
    /// bundle that also keeps the unwrapped trees.
    pub fn from_responses(resume: &Value, job: &Value, scoring: &Value, files: SourceFiles) -> Self {
        let raw = RawTrees {
            resume: unwrap_envelope(resume).clone(),
            job: unwrap_envelope(job).clone(),
            scoring: unwrap_envelope(scoring).clone(),
        };
        ExportBundle {
            candidate: normalize_candidate(&raw.resume),
            job: normalize_job(&raw.job),
            score: normalize_score(&raw.scoring),
            files,
            raw,
        }
    }

    /// Parses a structured dump back into a bundle.
    pub fn from_dump(dump: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(dump)?)
    }
}
