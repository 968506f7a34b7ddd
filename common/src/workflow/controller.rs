//! The apply page's state machine.
//!
//! ```text
//! Idle ──mount──▶ Loading ──questions──▶ Ready ──submit──▶ Validating ──▶ Submitting ──▶ Submitted
//!   │                │                    ▲                    │              │
//!   ▼                ▼                    └──── invalid ───────┘              │
//! InvalidJob     LoadFailed               └──────────── service error ────────┘
//! ```
//!
//! The UI drives the synchronous steps (`mount`, `questions_loaded`,
//! `begin_submit`, `finish_submit`) from its message loop and runs the
//! network calls in between. [`SubmissionController::load`] and
//! [`SubmissionController::submit`] chain the same steps around injected
//! services.

use std::fmt;
use std::rc::Rc;

use crate::model::attachment::Attachment;
use crate::model::evaluation::EvaluationResult;
use crate::model::job::JobId;
use crate::model::profile::ApplicantProfile;
use crate::model::question::Question;
use crate::requests::ApplicationSubmission;
use crate::workflow::answers::AnswerSet;
use crate::workflow::attachment::{FileAttachment, ReadTicket};
use crate::workflow::error::{ServiceError, ValidationError, WorkflowError};
use crate::workflow::integrity::{DocumentHost, DocumentTitles, IntegritySession};
use crate::workflow::loader::{JobService, QuestionLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Loading,
    /// Terminal: no usable job id.
    InvalidJob,
    /// Terminal for this mount: the Job Service failed.
    LoadFailed,
    Ready,
    Validating,
    Submitting,
    Submitted,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Loading => "loading questions",
            WorkflowState::InvalidJob => "without a valid job",
            WorkflowState::LoadFailed => "questions failed to load",
            WorkflowState::Ready => "ready",
            WorkflowState::Validating => "validating",
            WorkflowState::Submitting => "submitting",
            WorkflowState::Submitted => "submitted",
        };
        f.write_str(label)
    }
}

/// Receives one submission and returns its evaluation.
#[allow(async_fn_in_trait)]
pub trait EvaluationService {
    async fn evaluate(&self, submission: &ApplicationSubmission) -> Result<EvaluationResult, ServiceError>;
}

impl<T: EvaluationService + ?Sized> EvaluationService for &T {
    async fn evaluate(&self, submission: &ApplicationSubmission) -> Result<EvaluationResult, ServiceError> {
        (**self).evaluate(submission).await
    }
}

impl<T: EvaluationService + ?Sized> EvaluationService for Rc<T> {
    async fn evaluate(&self, submission: &ApplicationSubmission) -> Result<EvaluationResult, ServiceError> {
        (**self).evaluate(submission).await
    }
}

pub struct SubmissionController<H: DocumentHost> {
    state: WorkflowState,
    job: Option<JobId>,
    questions: Vec<Question>,
    answers: AnswerSet,
    attachment: FileAttachment,
    profile: ApplicantProfile,
    result: Option<EvaluationResult>,
    last_error: Option<WorkflowError>,
    session: IntegritySession<H>,
}

impl<H: DocumentHost> SubmissionController<H> {
    pub fn new(host: H, titles: DocumentTitles) -> Self {
        Self {
            state: WorkflowState::Idle,
            job: None,
            questions: Vec::new(),
            answers: AnswerSet::default(),
            attachment: FileAttachment::new(),
            profile: ApplicantProfile::default(),
            result: None,
            last_error: None,
            session: IntegritySession::new(host, titles),
        }
    }

    /// Starts from a pre-filled profile instead of blank fields.
    pub fn with_profile(mut self, profile: ApplicantProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn job(&self) -> Option<JobId> {
        self.job
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn attachment(&self) -> &FileAttachment {
        &self.attachment
    }

    pub fn profile(&self) -> &ApplicantProfile {
        &self.profile
    }

    pub fn result(&self) -> Option<&EvaluationResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&WorkflowError> {
        self.last_error.as_ref()
    }

    pub fn is_integrity_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn host(&self) -> &H {
        self.session.host()
    }

    /// Whether the submit control should accept a click.
    pub fn can_submit(&self) -> bool {
        self.state == WorkflowState::Ready
    }

    /// Idle → Loading, or Idle → InvalidJob when `raw_job` is unusable.
    pub fn mount(&mut self, raw_job: Option<&str>) -> Result<JobId, WorkflowError> {
        self.expect_state("load questions", WorkflowState::Idle)?;
        match JobId::parse(raw_job) {
            Ok(job) => {
                self.job = Some(job);
                self.transition(WorkflowState::Loading);
                Ok(job)
            }
            Err(err) => {
                self.transition(WorkflowState::InvalidJob);
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    /// Loading → Ready (integrity session switched on) or Loading → LoadFailed.
    pub fn questions_loaded(&mut self, outcome: Result<Vec<Question>, WorkflowError>) -> Result<(), WorkflowError> {
        self.expect_state("finish loading", WorkflowState::Loading)?;
        match outcome {
            Ok(questions) => {
                self.answers = AnswerSet::seed(&questions);
                self.questions = questions;
                self.transition(WorkflowState::Ready);
                self.session.activate();
                Ok(())
            }
            Err(err) => {
                self.transition(WorkflowState::LoadFailed);
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    pub async fn load<J: JobService>(&mut self, loader: &QuestionLoader<J>, raw_job: Option<&str>) -> Result<(), WorkflowError> {
        let job = self.mount(raw_job)?;
        let outcome = loader.fetch(job).await;
        self.questions_loaded(outcome)
    }

    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) -> Result<(), WorkflowError> {
        self.ensure_editable()?;
        self.answers.set_answer(index, text)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), WorkflowError> {
        self.ensure_editable()?;
        self.profile.name = name.into();
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), WorkflowError> {
        self.ensure_editable()?;
        self.profile.email = email.into();
        Ok(())
    }

    pub fn set_file(&mut self, attachment: Attachment) -> Result<Option<Attachment>, WorkflowError> {
        self.ensure_editable()?;
        Ok(self.attachment.set_file(attachment))
    }

    /// Picker selection whose bytes are still being read.
    pub fn begin_file_read(&mut self) -> Result<ReadTicket, WorkflowError> {
        self.ensure_editable()?;
        Ok(self.attachment.begin_read())
    }

    /// Returns `Ok(false)` when the read was superseded by a newer selection.
    pub fn complete_file_read(&mut self, ticket: ReadTicket, attachment: Attachment) -> Result<bool, WorkflowError> {
        self.ensure_editable()?;
        Ok(self.attachment.complete_read(ticket, attachment))
    }

    /// A read that could not finish. Returns `false` when a newer selection
    /// already superseded it, in which case the failure is not worth showing.
    pub fn file_read_failed(&self, ticket: ReadTicket) -> bool {
        let latest = self.attachment.is_latest(ticket);
        if !latest {
            log::debug!("ignoring failure of a superseded read");
        }
        latest
    }

    pub fn drag_enter(&mut self) {
        self.attachment.drag_enter();
    }

    pub fn drag_over(&mut self) {
        self.attachment.drag_over();
    }

    pub fn drag_leave(&mut self) {
        self.attachment.drag_leave();
    }

    /// Clears the drag indicator; hands out a read ticket when a file was
    /// dropped and the form is still editable.
    pub fn drop_file(&mut self, has_file: bool) -> Result<Option<ReadTicket>, WorkflowError> {
        if let Err(err) = self.ensure_editable() {
            self.attachment.drag_leave();
            return Err(err);
        }
        Ok(self.attachment.drop_pending(has_file))
    }

    /// Ready → Validating → Submitting, returning the payload to send.
    ///
    /// A failed check alerts the user, goes back to Ready and returns
    /// [`WorkflowError::Validation`]; nothing is sent in that case.
    pub fn begin_submit(&mut self) -> Result<ApplicationSubmission, WorkflowError> {
        self.expect_state("submit", WorkflowState::Ready)?;
        self.transition(WorkflowState::Validating);

        let validated = self.validate().cloned();
        let (job_id, attachment) = match (self.job, validated) {
            (Some(job), Ok(attachment)) => (job, attachment),
            (_, Err(invalid)) => {
                let err = WorkflowError::from(invalid);
                self.transition(WorkflowState::Ready);
                self.fail(err.clone());
                return Err(err);
            }
            (None, Ok(_)) => {
                self.transition(WorkflowState::Ready);
                return Err(WorkflowError::InvalidTransition {
                    action: "submit without a job",
                    state: WorkflowState::Ready,
                });
            }
        };

        let submission = ApplicationSubmission {
            job_id,
            profile: self.profile.clone(),
            answers: self.answers.snapshot(),
            attachment,
        };
        self.last_error = None;
        self.transition(WorkflowState::Submitting);
        log::info!(
            "submitting application for job {} with {} answers",
            job_id,
            submission.answers.len()
        );
        Ok(submission)
    }

    /// Submitting → Submitted on success (integrity session off, title set
    /// to the submitted banner), Submitting → Ready on failure.
    pub fn finish_submit(&mut self, outcome: Result<EvaluationResult, ServiceError>) -> Result<&EvaluationResult, WorkflowError> {
        self.expect_state("finish submitting", WorkflowState::Submitting)?;
        match outcome {
            Ok(result) => {
                self.transition(WorkflowState::Submitted);
                self.session.deactivate();
                let submitted = self.session.titles().submitted.clone();
                self.session.host().set_title(&submitted);
                log::info!("application evaluated, band {:?}", result.band());
                Ok(&*self.result.insert(result))
            }
            Err(source) => {
                let err = WorkflowError::Submission(source);
                self.transition(WorkflowState::Ready);
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    /// One attempt against `service`: validate, send once, record outcome.
    pub async fn submit<S: EvaluationService>(&mut self, service: &S) -> Result<&EvaluationResult, WorkflowError> {
        let submission = self.begin_submit()?;
        let outcome = service.evaluate(&submission).await;
        drop(submission);
        self.finish_submit(outcome)
    }

    /// Page is going away. Safe to call any number of times.
    pub fn teardown(&mut self) {
        self.session.deactivate();
    }

    fn validate(&self) -> Result<&Attachment, ValidationError> {
        let attachment = self
            .attachment
            .current()
            .ok_or(ValidationError::MissingAttachment)?;
        if self.profile.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if self.profile.email.trim().is_empty() {
            return Err(ValidationError::BlankEmail);
        }
        Ok(attachment)
    }

    fn ensure_editable(&self) -> Result<(), WorkflowError> {
        if self.state == WorkflowState::Ready {
            Ok(())
        } else {
            Err(WorkflowError::Locked { state: self.state })
        }
    }

    fn expect_state(&self, action: &'static str, expected: WorkflowState) -> Result<(), WorkflowError> {
        if self.state == expected {
            Ok(())
        } else {
            log::warn!("cannot {} while {}", action, self.state);
            Err(WorkflowError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn transition(&mut self, next: WorkflowState) {
        log::debug!("workflow {} -> {}", self.state, next);
        self.state = next;
    }

    /// Records `err` and, except for the static invalid-job message, alerts.
    fn fail(&mut self, err: WorkflowError) {
        log::warn!("{}", err);
        if err.is_user_facing() && !matches!(err, WorkflowError::InvalidJob { .. }) {
            self.session.host().alert(&err.to_string());
        }
        self.last_error = Some(err);
    }
}
