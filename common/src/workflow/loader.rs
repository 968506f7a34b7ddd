use std::rc::Rc;

use crate::model::job::JobId;
use crate::model::question::Question;
use crate::workflow::error::{ServiceError, WorkflowError};

/// Source of the per-job screening questions.
#[allow(async_fn_in_trait)]
pub trait JobService {
    /// Questions for `job`, in the order they must be answered.
    async fn fetch_questions(&self, job: JobId) -> Result<Vec<String>, ServiceError>;
}

impl<T: JobService + ?Sized> JobService for &T {
    async fn fetch_questions(&self, job: JobId) -> Result<Vec<String>, ServiceError> {
        (**self).fetch_questions(job).await
    }
}

impl<T: JobService + ?Sized> JobService for Rc<T> {
    async fn fetch_questions(&self, job: JobId) -> Result<Vec<String>, ServiceError> {
        (**self).fetch_questions(job).await
    }
}

/// Loads the question list once per mount. Never retries on its own.
pub struct QuestionLoader<J> {
    service: J,
}

impl<J: JobService> QuestionLoader<J> {
    pub fn new(service: J) -> Self {
        Self { service }
    }

    /// One request for `job`. The caller has already validated the id.
    pub async fn fetch(&self, job: JobId) -> Result<Vec<Question>, WorkflowError> {
        log::info!("loading questions for job {}", job);
        match self.service.fetch_questions(job).await {
            Ok(texts) => {
                log::info!("job {} has {} questions", job, texts.len());
                Ok(Question::from_texts(texts))
            }
            Err(source) => {
                log::error!("question load for job {} failed: {}", job, source);
                Err(WorkflowError::QuestionLoad { job, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::workflow::testing::FakeJobs;

    #[test]
    fn questions_keep_service_order() {
        let jobs = FakeJobs::with_questions(&["Question 1: first", "Question 2: second"]);
        let loader = QuestionLoader::new(&jobs);

        let job = JobId::parse(Some("42")).expect("valid job");
        let questions = block_on(loader.fetch(job)).expect("questions");
        assert_eq!(jobs.calls(), 1);
        assert_eq!(questions[0].position, 0);
        assert_eq!(questions[1].text, "Question 2: second");
    }

    #[test]
    fn service_failure_becomes_question_load_error() {
        let jobs = FakeJobs::failing(ServiceError::Status {
            status: 404,
            body: "Job not found".to_string(),
        });
        let loader = QuestionLoader::new(&jobs);

        let job = JobId::parse(Some("7")).expect("valid job");
        match block_on(loader.fetch(job)) {
            Err(WorkflowError::QuestionLoad { job, source }) => {
                assert_eq!(job.get(), 7);
                assert!(matches!(source, ServiceError::Status { status: 404, .. }));
            }
            other => panic!("expected question load error, got {other:?}"),
        }
        assert_eq!(jobs.calls(), 1);
    }
}
