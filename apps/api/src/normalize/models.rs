use serde::{Deserialize, Serialize};

/// A candidate as extracted from a parsed CV. Every field is always present;
/// missing source data shows up as an empty string or an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

/// Headline facts about a candidate, as shown next to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub experience_count: usize,
    pub highest_education: String,
}

impl CandidateProfile {
    /// The parser lists education most recent first, so the first degree is
    /// taken as the highest.
    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            experience_count: self.experience.len(),
            highest_education: self
                .education
                .first()
                .map(|e| e.degree.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobProfile {
    pub title: String,
    pub company: String,
    pub location: String,
    pub required_skill_count: usize,
    pub skills: Vec<String>,
}

/// Scores as reported by the external scorer, each in `0.0..=1.0`.
///
/// `overall` is whatever the scorer suggested. It is not derived from the
/// sub-scores and must never be recomputed from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakdown {
    pub overall: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub languages: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScore {
    Skills,
    Experience,
    Education,
    Languages,
}

impl SubScore {
    pub const ALL: [SubScore; 4] = [
        SubScore::Skills,
        SubScore::Experience,
        SubScore::Education,
        SubScore::Languages,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubScore::Skills => "Skills Match",
            SubScore::Experience => "Experience",
            SubScore::Education => "Education",
            SubScore::Languages => "Languages",
        }
    }
}

impl ScoreBreakdown {
    pub fn get(&self, sub: SubScore) -> f64 {
        match sub {
            SubScore::Skills => self.skills,
            SubScore::Experience => self.experience,
            SubScore::Education => self.education,
            SubScore::Languages => self.languages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_empty_profile() {
        let summary = CandidateProfile::default().summary();
        assert_eq!(summary.experience_count, 0);
        assert_eq!(summary.highest_education, "");
    }

    #[test]
    fn test_summary_takes_first_degree() {
        let profile = CandidateProfile {
            education: vec![
                EducationEntry {
                    degree: "MSc".to_string(),
                    ..Default::default()
                },
                EducationEntry {
                    degree: "BSc".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(profile.summary().highest_education, "MSc");
    }

    #[test]
    fn test_lenient_deserialize_fills_defaults() {
        let profile: CandidateProfile =
            serde_json::from_str(r#"{"name": "Ada", "experience": [{"title": "Engineer"}]}"#)
                .unwrap();
        assert_eq!(profile.name, "Ada");
        assert!(profile.skills.is_empty());
        assert_eq!(profile.experience[0].company, "");
    }
}
