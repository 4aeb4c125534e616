use std::fmt::Write;

use chrono::NaiveDate;

use crate::export::label::{percent, Grade, MatchLabel};
use crate::export::{ExportBundle, ExportError};
use crate::normalize::SubScore;

const NOT_AVAILABLE: &str = "N/A";

/// Human-readable summary for sharing with people who will not open the JSON.
pub fn render_report(bundle: &ExportBundle, generated_on: NaiveDate) -> Result<String, ExportError> {
    let candidate = &bundle.candidate;
    let job = &bundle.job;
    let summary = candidate.summary();
    let overall = percent(bundle.score.overall);
    let label = MatchLabel::from_percent(overall);

    let mut out = String::new();
    writeln!(out, "CV SCORING SUMMARY REPORT")?;
    writeln!(out, "=========================")?;
    writeln!(out, "Generated: {}", generated_on.format("%Y-%m-%d"))?;
    writeln!(out)?;
    writeln!(out, "Candidate: {}", or_na(&candidate.name))?;
    writeln!(out, "Job Title: {}", or_na(&job.title))?;
    writeln!(out, "Company: {}", or_na(&job.company))?;
    writeln!(out)?;
    writeln!(out, "Overall Match Score: {overall}% ({})", label.as_str())?;
    writeln!(out, "{}", label.recommendation())?;
    writeln!(out)?;

    heading(&mut out, "Score Breakdown")?;
    for sub in SubScore::ALL {
        let p = percent(bundle.score.get(sub));
        writeln!(out, "{}: {p}% ({})", sub.label(), Grade::from_percent(p).as_str())?;
    }
    writeln!(out)?;

    heading(&mut out, "Candidate Details")?;
    writeln!(out, "Email: {}", or_na(&candidate.email))?;
    writeln!(out, "Phone: {}", or_na(&candidate.phone))?;
    writeln!(out, "Work Experience: {} positions", summary.experience_count)?;
    writeln!(out, "Highest Education: {}", or_na(&summary.highest_education))?;
    writeln!(out, "Skills: {}", or_na(&candidate.skills.join(", ")))?;
    writeln!(out)?;

    heading(&mut out, "Job Details")?;
    writeln!(out, "Location: {}", or_na(&job.location))?;
    writeln!(out, "Required Skills: {} skills identified", job.required_skill_count)?;
    writeln!(out)?;

    heading(&mut out, "Source Files")?;
    writeln!(out, "CV: {}", or_na(&bundle.files.cv_name))?;
    writeln!(out, "Job Description: {}", or_na(&bundle.files.job_name))?;

    Ok(out)
}

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}
