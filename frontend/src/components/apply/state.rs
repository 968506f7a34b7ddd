//! Runtime state of the apply page.
//!
//! The workflow itself lives in [`SubmissionController`]; this struct only
//! adds what the browser needs around it: the two HTTP clients and the
//! hidden file input.

use std::rc::Rc;

use common::workflow::{ProfileLookup, SubmissionController};
use yew::prelude::*;

use crate::browser::BrowserDocument;
use crate::config::AppConfig;
use crate::services::{HttpEvaluationService, HttpJobService, LocalStorageProfile};

pub struct ApplyPage {
    pub controller: SubmissionController<BrowserDocument>,

    pub jobs: Rc<HttpJobService>,

    pub evaluator: Rc<HttpEvaluationService>,

    /// Hidden `<input type="file">` opened by the drop zone's button.
    pub file_input_ref: NodeRef,

    /// Name of a file whose bytes are still being read.
    pub reading: Option<String>,
}

impl ApplyPage {
    pub fn new(config: Rc<AppConfig>) -> Self {
        let controller = SubmissionController::new(BrowserDocument, config.titles.clone())
            .with_profile(LocalStorageProfile.applicant_profile());
        Self {
            controller,
            jobs: Rc::new(HttpJobService::new(Rc::clone(&config))),
            evaluator: Rc::new(HttpEvaluationService::new(config)),
            file_input_ref: NodeRef::default(),
            reading: None,
        }
    }

    /// Whether form fields accept input right now.
    pub fn editable(&self) -> bool {
        self.controller.can_submit()
    }
}
