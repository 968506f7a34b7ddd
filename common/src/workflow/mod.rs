//! State machines behind a single proctored application.
//!
//! `controller::SubmissionController` owns everything else: it drives the
//! `loader`, holds the `answers` and `attachment`, and keeps the `integrity`
//! session active between a successful load and a successful submission.
//! Browser access goes through the traits declared here and in `integrity`.

pub mod answers;
pub mod attachment;
pub mod controller;
pub mod error;
pub mod integrity;
pub mod loader;
pub mod profile;

#[doc(hidden)]
pub mod testing;

pub use answers::AnswerSet;
pub use attachment::{FileAttachment, ReadTicket};
pub use controller::{EvaluationService, SubmissionController, WorkflowState};
pub use error::{ServiceError, ValidationError, WorkflowError};
pub use integrity::{
    AmbientEvent, ClipboardAction, DocumentHost, DocumentTitles, IntegrityPolicy,
    IntegritySession, KeyCombo, Reaction,
};
pub use loader::{JobService, QuestionLoader};
pub use profile::ProfileLookup;
