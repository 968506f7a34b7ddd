use std::rc::Rc;

use common::model::evaluation::EvaluationResult;
use common::requests::{ApplicationSubmission, ApplyResponse, FormPart};
use common::workflow::{EvaluationService, ServiceError};
use gloo_file::Blob;
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use super::{read_json, transport};
use crate::config::AppConfig;

/// `POST {api}/applications/apply` as `multipart/form-data`.
pub struct HttpEvaluationService {
    config: Rc<AppConfig>,
}

impl HttpEvaluationService {
    pub fn new(config: Rc<AppConfig>) -> Self {
        Self { config }
    }
}

impl EvaluationService for HttpEvaluationService {
    async fn evaluate(&self, submission: &ApplicationSubmission) -> Result<EvaluationResult, ServiceError> {
        let form = multipart(submission)?;
        let url = self.config.url("applications/apply");
        let response = Request::post(&url)
            .body(form)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let reply: ApplyResponse = read_json(response).await?;
        if let Some(error) = &reply.error {
            log::warn!("evaluation service rejected job {}: {}", submission.job_id, error);
        }
        reply.into_result()
    }
}

fn multipart(submission: &ApplicationSubmission) -> Result<FormData, ServiceError> {
    let parts = submission
        .form_parts()
        .map_err(|err| ServiceError::Transport(format!("could not encode answers: {err}")))?;
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, &value).map_err(js_error)?,
            FormPart::File {
                name,
                file_name,
                media_type,
                content,
            } => {
                let blob: web_sys::Blob = Blob::new_with_options(content, Some(media_type)).into();
                form.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(js_error)?
            }
        }
    }
    Ok(form)
}

fn js_error(err: JsValue) -> ServiceError {
    ServiceError::Transport(format!("{:?}", err))
}
