//! Wire shapes exchanged with the Job Service and the Evaluation Service.

use serde::Deserialize;

use crate::model::attachment::Attachment;
use crate::model::evaluation::EvaluationResult;
use crate::model::job::JobId;
use crate::model::profile::ApplicantProfile;
use crate::model::question::Answer;
use crate::workflow::error::ServiceError;

pub const FIELD_JOB_ID: &str = "job_id";
pub const FIELD_APPLICANT_NAME: &str = "applicant_name";
pub const FIELD_APPLICANT_EMAIL: &str = "applicant_email";
pub const FIELD_ANSWERS_JSON: &str = "answers_json";
pub const FIELD_RESUME: &str = "resume";

/// Body of `GET /jobs/{job_id}/questions`.
#[derive(Debug, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

/// Body of `POST /applications/apply`.
///
/// The service answers `200` with `{"error": "..."}` when the job does not
/// exist, so a successful status alone does not mean the application went
/// through.
#[derive(Debug, Default, Deserialize)]
pub struct ApplyResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub application_id: Option<u64>,
    #[serde(default)]
    pub ai_evaluation: Option<String>,
    #[serde(default)]
    pub ai_score: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApplyResponse {
    pub fn into_result(self) -> Result<EvaluationResult, ServiceError> {
        if let Some(error) = self.error {
            return Err(ServiceError::Rejected(error));
        }
        if self.success == Some(false) {
            return Err(ServiceError::Rejected("the service reported a failure".to_string()));
        }
        let text = self
            .ai_evaluation
            .ok_or_else(|| ServiceError::Decode("response has no ai_evaluation".to_string()))?;
        Ok(EvaluationResult::new(text, self.ai_score, self.application_id))
    }
}

/// Everything sent for one submission attempt.
///
/// Built by the controller right before the call and dropped as soon as the
/// response arrives; a retry builds a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub profile: ApplicantProfile,
    pub answers: Vec<Answer>,
    pub attachment: Attachment,
}

/// One multipart field, in the order it is appended to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart<'a> {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        file_name: &'a str,
        media_type: &'a str,
        content: &'a [u8],
    },
}

impl ApplicationSubmission {
    pub fn answers_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.answers)
    }

    /// Multipart layout expected by the Evaluation Service. Name and email are
    /// sent as typed; trimming only applies to validation.
    pub fn form_parts(&self) -> Result<Vec<FormPart<'_>>, serde_json::Error> {
        Ok(vec![
            FormPart::Text {
                name: FIELD_JOB_ID,
                value: self.job_id.to_string(),
            },
            FormPart::Text {
                name: FIELD_APPLICANT_NAME,
                value: self.profile.name.clone(),
            },
            FormPart::Text {
                name: FIELD_APPLICANT_EMAIL,
                value: self.profile.email.clone(),
            },
            FormPart::Text {
                name: FIELD_ANSWERS_JSON,
                value: self.answers_json()?,
            },
            FormPart::File {
                name: FIELD_RESUME,
                file_name: &self.attachment.name,
                media_type: &self.attachment.media_type,
                content: &self.attachment.content,
            },
        ])
    }
}
