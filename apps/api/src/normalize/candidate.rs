use serde_json::Value;

use crate::normalize::models::{CandidateProfile, EducationEntry, ExperienceEntry};
use crate::normalize::value::{first_array, section, text, text_at, text_list};

const NO_KEYS: &[&str] = &[];
const RAW: &[&str] = &["Raw"];
const DATE: &[&str] = &["Date"];

pub(crate) const SKILL_ARRAYS: &[&str] = &["/Skills", "/Skills/Raw"];

/// Builds a `CandidateProfile` from a resume parse tree.
///
/// Accepts either `{"ResumeData": {...}}` or the resume data object itself.
/// Never fails: anything missing or malformed becomes a default.
pub fn normalize_candidate(raw: &Value) -> CandidateProfile {
    let resume = section(raw, "ResumeData");

    CandidateProfile {
        name: text_at(
            resume,
            "/ContactInformation/CandidateName",
            &["FormattedName"],
        ),
        email: text_at(
            resume,
            "/ContactInformation/EmailAddresses/0",
            &["InternetEmailAddress"],
        ),
        phone: text_at(
            resume,
            "/ContactInformation/Telephones/0",
            &["Raw", "Normalized"],
        ),
        address: text_at(resume, "/ContactInformation/Location", &["CountryCode"]),
        skills: text_list(first_array(resume, SKILL_ARRAYS), NO_KEYS),
        experience: first_array(resume, &["/EmploymentHistory", "/EmploymentHistory/Positions"])
            .iter()
            .map(experience_entry)
            .collect(),
        education: first_array(resume, &["/Education", "/Education/EducationDetails"])
            .iter()
            .map(education_entry)
            .collect(),
        languages: text_list(first_array(resume, &["/Languages"]), &["Language"]),
        certifications: text_list(first_array(resume, &["/Certifications"]), NO_KEYS),
    }
}

fn experience_entry(position: &Value) -> ExperienceEntry {
    ExperienceEntry {
        title: text(position.get("JobTitle"), RAW),
        company: text(position.get("Employer"), RAW),
        start_date: text(position.get("StartDate"), DATE),
        end_date: text(position.get("EndDate"), DATE),
        description: text(position.get("Description"), NO_KEYS),
    }
}

fn education_entry(detail: &Value) -> EducationEntry {
    EducationEntry {
        degree: text(detail.get("Degree"), RAW),
        institution: text(detail.get("SchoolName"), RAW),
        start_date: text(detail.get("StartDate"), DATE),
        end_date: text(detail.get("EndDate"), DATE),
        description: text(detail.get("Text"), NO_KEYS),
    }
}
