//! Textkernel client. The only module that talks to the external parsing and
//! scoring service.
//!
//! Every call is a single attempt. A failure at any step is final for the
//! request that issued it.
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::TextkernelConfig;

const PARSE_RESUME_PATH: &str = "/parser/resume";
const PARSE_JOB_PATH: &str = "/parser/joborder";
const SCORE_PATH: &str = "/scorer/bimetric/resume";

/// The three external calls of a scoring request, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ParseResume,
    ParseJob,
    Score,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::ParseResume => "Resume parsing",
            Step::ParseJob => "Job parsing",
            Step::Score => "Scoring",
        })
    }
}

#[derive(Debug, Error)]
pub enum TextkernelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{step} failed (status {status}): {message}")]
    Api {
        step: Step,
        status: u16,
        message: String,
    },
}

/// Parsing and scoring backend. `AppState` carries it as
/// `Arc<dyn DocumentService>` so handlers can run against a stub.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Parses a CV. Returns the response as received, envelope included.
    async fn parse_resume(&self, document: &[u8]) -> Result<Value, TextkernelError>;

    /// Parses a job description. Returns the response as received.
    async fn parse_job(&self, document: &[u8]) -> Result<Value, TextkernelError>;

    /// Scores `resume_data` against `job_data` (the inner `ResumeData` and
    /// `JobData` objects of the parse results).
    async fn score(&self, resume_data: &Value, job_data: &Value) -> Result<Value, TextkernelError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ParseRequest {
    document_as_base64_string: String,
    document_last_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<ParseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ParseData {
    use_v2_skills_taxonomy: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutputFormat {
    skills_style: &'static str,
}

impl ParseRequest {
    fn new(document: &[u8]) -> Self {
        Self {
            document_as_base64_string: STANDARD.encode(document),
            document_last_modified: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            data: None,
            output_format: None,
        }
    }

    /// CVs are parsed against the V1 skills taxonomy.
    fn resume(document: &[u8]) -> Self {
        Self {
            data: Some(ParseData {
                use_v2_skills_taxonomy: false,
            }),
            ..Self::new(document)
        }
    }

    /// Job orders come back with normalized skills.
    fn job(document: &[u8]) -> Self {
        Self {
            output_format: Some(OutputFormat {
                skills_style: "NormalizedSkills",
            }),
            ..Self::new(document)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScoreRequest<'a> {
    source_resume: ScoredResume<'a>,
    target_jobs: Vec<ScoredJob<'a>>,
    settings: ScoreSettings,
}

/// Criteria the scorer weighs. All five are enabled with equal weight.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScoreSettings {
    position_title: bool,
    position_title_weight: f64,
    skills: bool,
    skills_weight: f64,
    education: bool,
    education_weight: f64,
    experience: bool,
    experience_weight: f64,
    languages: bool,
    languages_weight: f64,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            position_title: true,
            position_title_weight: 1.0,
            skills: true,
            skills_weight: 1.0,
            education: true,
            education_weight: 1.0,
            experience: true,
            experience_weight: 1.0,
            languages: true,
            languages_weight: 1.0,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScoredResume<'a> {
    id: String,
    resume_data: &'a Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ScoredJob<'a> {
    id: String,
    job_data: &'a Value,
}

impl<'a> ScoreRequest<'a> {
    fn new(resume_data: &'a Value, job_data: &'a Value) -> Self {
        Self {
            source_resume: ScoredResume {
                id: format!("resume_{}", Uuid::new_v4()),
                resume_data,
            },
            target_jobs: vec![ScoredJob {
                id: format!("job_{}", Uuid::new_v4()),
                job_data,
            }],
            settings: ScoreSettings::default(),
        }
    }
}

/// HTTP client for the Textkernel Tx v10 API.
#[derive(Clone)]
pub struct TextkernelClient {
    client: Client,
    base_url: String,
    account_id: String,
    service_key: String,
}

impl TextkernelClient {
    pub fn new(
        base_url: &str,
        account_id: String,
        service_key: String,
        timeout: Duration,
    ) -> Result<Self, TextkernelError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id,
            service_key,
        })
    }

    /// Builds a client from configuration, or `None` when credentials are
    /// missing.
    pub fn from_config(config: &TextkernelConfig) -> Option<Result<Self, TextkernelError>> {
        let account_id = config.account_id.clone()?;
        let service_key = config.api_key.clone()?;
        Some(Self::new(
            &config.base_url,
            account_id,
            service_key,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    async fn post<B: Serialize + Sync>(
        &self,
        step: Step,
        path: &str,
        body: &B,
    ) -> Result<Value, TextkernelError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%step, %url, "calling Textkernel");

        let response = self
            .client
            .post(&url)
            .header("Tx-AccountId", &self.account_id)
            .header("Tx-ServiceKey", &self.service_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%step, status = status.as_u16(), "Textkernel returned an error: {body}");
            return Err(TextkernelError::Api {
                step,
                status: status.as_u16(),
                message: upstream_message(&body, status.as_u16(), status.canonical_reason()),
            });
        }

        let value: Value = response.json().await?;
        debug!(%step, "Textkernel call succeeded");
        Ok(value)
    }
}

#[async_trait]
impl DocumentService for TextkernelClient {
    async fn parse_resume(&self, document: &[u8]) -> Result<Value, TextkernelError> {
        self.post(Step::ParseResume, PARSE_RESUME_PATH, &ParseRequest::resume(document))
            .await
    }

    async fn parse_job(&self, document: &[u8]) -> Result<Value, TextkernelError> {
        self.post(Step::ParseJob, PARSE_JOB_PATH, &ParseRequest::job(document))
            .await
    }

    async fn score(&self, resume_data: &Value, job_data: &Value) -> Result<Value, TextkernelError> {
        self.post(Step::Score, SCORE_PATH, &ScoreRequest::new(resume_data, job_data))
            .await
    }
}

/// The human-readable message of an error response: `Info.Message` when the
/// body carries one, otherwise the status line.
fn upstream_message(body: &str, status: u16, reason: Option<&str>) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/Info/Message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| match reason {
            Some(reason) => format!("{status} {reason}"),
            None => status.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upstream_message_prefers_info_message() {
        let body = r#"{"Info": {"Code": "InvalidParameter", "Message": "Document is empty"}}"#;
        assert_eq!(
            upstream_message(body, 400, Some("Bad Request")),
            "Document is empty"
        );
    }

    #[test]
    fn test_upstream_message_falls_back_to_status_text() {
        assert_eq!(
            upstream_message("<html>oops</html>", 502, Some("Bad Gateway")),
            "502 Bad Gateway"
        );
        assert_eq!(upstream_message(r#"{"Info": {}}"#, 599, None), "599");
    }

    #[test]
    fn test_parse_request_shape() {
        let body = serde_json::to_value(ParseRequest::resume(b"%PDF-1.4")).unwrap();
        assert_eq!(body["DocumentAsBase64String"], "JVBERi0xLjQ=");
        let date = body["DocumentLastModified"].as_str().unwrap();
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
        assert_eq!(body["Data"], json!({"UseV2SkillsTaxonomy": false}));
        assert!(body.get("OutputFormat").is_none());

        let body = serde_json::to_value(ParseRequest::job(b"%PDF-1.4")).unwrap();
        assert_eq!(body["DocumentAsBase64String"], "JVBERi0xLjQ=");
        assert_eq!(body["OutputFormat"], json!({"SkillsStyle": "NormalizedSkills"}));
        assert!(body.get("Data").is_none());
    }

    #[test]
    fn test_score_request_uses_singular_source_resume() {
        let resume = json!({"ContactInformation": {}});
        let job = json!({"JobTitles": []});
        let body = serde_json::to_value(ScoreRequest::new(&resume, &job)).unwrap();
        assert_eq!(body["SourceResume"]["ResumeData"], resume);
        assert!(body["SourceResume"]["Id"].as_str().unwrap().starts_with("resume_"));
        assert_eq!(body["TargetJobs"][0]["JobData"], job);
        assert!(body.get("TargetResumes").is_none());
        assert_eq!(
            body["Settings"],
            json!({
                "PositionTitle": true,
                "PositionTitleWeight": 1.0,
                "Skills": true,
                "SkillsWeight": 1.0,
                "Education": true,
                "EducationWeight": 1.0,
                "Experience": true,
                "ExperienceWeight": 1.0,
                "Languages": true,
                "LanguagesWeight": 1.0
            })
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TextkernelClient::new(
            "https://api.eu.textkernel.com/tx/v10/",
            "acct".to_string(),
            "key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.eu.textkernel.com/tx/v10");
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let mut config = TextkernelConfig::default();
        assert!(TextkernelClient::from_config(&config).is_none());

        config.account_id = Some("acct".to_string());
        config.api_key = Some("key".to_string());
        assert!(matches!(TextkernelClient::from_config(&config), Some(Ok(_))));
    }
}
