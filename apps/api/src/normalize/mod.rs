// Normalization of the parser's loosely-typed responses into fixed records.
// Everything in here is pure: no I/O, no errors, defaults for anything missing.

pub mod candidate;
pub mod editing;
pub mod job;
pub mod models;
pub mod score;
pub mod value;

pub use candidate::normalize_candidate;
pub use job::normalize_job;
pub use models::{CandidateProfile, JobProfile, ScoreBreakdown, SubScore};
pub use score::normalize_score;
pub use value::unwrap_envelope;
