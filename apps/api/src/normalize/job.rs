use serde_json::Value;

use crate::normalize::candidate::SKILL_ARRAYS;
use crate::normalize::models::JobProfile;
use crate::normalize::value::{first_array, first_text, section, text_list};

const NO_KEYS: &[&str] = &[];
const MUNICIPALITY: &[&str] = &["Municipality"];

/// Builds a `JobProfile` from a job order parse tree.
///
/// Accepts either `{"JobData": {...}}` or the job data object itself.
pub fn normalize_job(raw: &Value) -> JobProfile {
    let job = section(raw, "JobData");
    let skills = text_list(first_array(job, SKILL_ARRAYS), NO_KEYS);

    JobProfile {
        title: first_text(
            job,
            &[("/JobTitles/0", NO_KEYS), ("/JobTitles/MainJobTitle", NO_KEYS)],
        ),
        company: first_text(
            job,
            &[
                ("/EmployerNames/0", NO_KEYS),
                ("/EmployerNames/MainEmployerName", NO_KEYS),
            ],
        ),
        location: first_text(
            job,
            &[
                ("/JobLocations/0", MUNICIPALITY),
                ("/CurrentLocation", MUNICIPALITY),
            ],
        ),
        required_skill_count: skills.len(),
        skills,
    }
}
