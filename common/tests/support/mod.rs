#![allow(dead_code)]

use common::model::attachment::Attachment;
use common::model::evaluation::EvaluationResult;
use common::workflow::{DocumentTitles, SubmissionController};

pub use common::workflow::testing::{FakeEvaluator, FakeJobs, RecordingDocument};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn evaluation(text: &str) -> EvaluationResult {
    EvaluationResult::new(text.to_string(), None, Some(1))
}

pub fn resume_pdf() -> Attachment {
    Attachment::new("resume.pdf", b"%PDF-1.7 fake".to_vec(), Some("application/pdf"))
}

pub fn controller(page: &RecordingDocument) -> SubmissionController<RecordingDocument> {
    SubmissionController::new(page.clone(), DocumentTitles::default())
}
