use std::rc::Rc;

use common::model::job::JobId;
use common::requests::QuestionsResponse;
use common::workflow::{JobService, ServiceError};
use gloo_net::http::Request;

use super::{read_json, transport};
use crate::config::AppConfig;

/// `GET {api}/jobs/{id}/questions`.
pub struct HttpJobService {
    config: Rc<AppConfig>,
}

impl HttpJobService {
    pub fn new(config: Rc<AppConfig>) -> Self {
        Self { config }
    }
}

impl JobService for HttpJobService {
    async fn fetch_questions(&self, job: JobId) -> Result<Vec<String>, ServiceError> {
        let url = self.config.url(&format!("jobs/{}/questions", job));
        let response = Request::get(&url).send().await.map_err(transport)?;
        let body: QuestionsResponse = read_json(response).await?;
        Ok(body.questions)
    }
}
