//! Recording stand-ins for the document and the two services.
//!
//! Shared by the unit tests and the integration tests under `tests/`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::model::evaluation::EvaluationResult;
use crate::model::job::JobId;
use crate::requests::ApplicationSubmission;
use crate::workflow::controller::EvaluationService;
use crate::workflow::error::ServiceError;
use crate::workflow::integrity::{AmbientEvent, DocumentHost, IntegrityPolicy};
use crate::workflow::loader::JobService;

#[derive(Default)]
struct DocumentLog {
    title: String,
    alerts: Vec<String>,
    observers: Vec<(u64, Rc<IntegrityPolicy>)>,
    next_id: u64,
    attached: usize,
    detached: usize,
}

/// In-memory document. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingDocument {
    log: Rc<RefCell<DocumentLog>>,
}

pub struct RecordedObservers {
    id: u64,
    log: Rc<RefCell<DocumentLog>>,
}

impl Drop for RecordedObservers {
    fn drop(&mut self) {
        let mut log = self.log.borrow_mut();
        log.observers.retain(|(id, _)| *id != self.id);
        log.detached += 1;
    }
}

impl RecordingDocument {
    pub fn titled(title: &str) -> Self {
        let document = Self::default();
        document.log.borrow_mut().title = title.to_string();
        document
    }

    /// Delivers `event` to every attached observer; returns whether any of
    /// them cancelled it.
    pub fn fire(&self, event: &AmbientEvent) -> bool {
        let policies: Vec<Rc<IntegrityPolicy>> = self
            .log
            .borrow()
            .observers
            .iter()
            .map(|(_, policy)| Rc::clone(policy))
            .collect();
        policies
            .iter()
            .fold(false, |suppressed, policy| policy.dispatch(self, event).suppress || suppressed)
    }

    pub fn current_title(&self) -> String {
        self.log.borrow().title.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.log.borrow().alerts.clone()
    }

    pub fn attached(&self) -> usize {
        self.log.borrow().attached
    }

    pub fn detached(&self) -> usize {
        self.log.borrow().detached
    }

    pub fn live_observers(&self) -> usize {
        self.log.borrow().observers.len()
    }
}

impl DocumentHost for RecordingDocument {
    type Observers = RecordedObservers;

    fn observe(&self, policy: Rc<IntegrityPolicy>) -> Option<Self::Observers> {
        let mut log = self.log.borrow_mut();
        if !log.observers.is_empty() {
            return None;
        }
        log.next_id += 1;
        let id = log.next_id;
        log.observers.push((id, policy));
        log.attached += 1;
        Some(RecordedObservers {
            id,
            log: Rc::clone(&self.log),
        })
    }

    fn title(&self) -> String {
        self.current_title()
    }

    fn set_title(&self, title: &str) {
        self.log.borrow_mut().title = title.to_string();
    }

    fn alert(&self, message: &str) {
        self.log.borrow_mut().alerts.push(message.to_string());
    }
}

pub struct FakeJobs {
    outcome: Result<Vec<String>, ServiceError>,
    calls: Cell<usize>,
}

impl FakeJobs {
    pub fn with_questions(questions: &[&str]) -> Self {
        Self {
            outcome: Ok(questions.iter().map(|q| q.to_string()).collect()),
            calls: Cell::new(0),
        }
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            outcome: Err(error),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl JobService for FakeJobs {
    async fn fetch_questions(&self, _job: JobId) -> Result<Vec<String>, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        self.outcome.clone()
    }
}

/// Answers each call with the next queued outcome.
#[derive(Default)]
pub struct FakeEvaluator {
    outcomes: RefCell<VecDeque<Result<EvaluationResult, ServiceError>>>,
    received: RefCell<Vec<ApplicationSubmission>>,
}

impl FakeEvaluator {
    pub fn answering(outcomes: Vec<Result<EvaluationResult, ServiceError>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            received: RefCell::default(),
        }
    }

    pub fn received(&self) -> Vec<ApplicationSubmission> {
        self.received.borrow().clone()
    }
}

impl EvaluationService for FakeEvaluator {
    async fn evaluate(&self, submission: &ApplicationSubmission) -> Result<EvaluationResult, ServiceError> {
        self.received.borrow_mut().push(submission.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Transport("no response queued".to_string())))
    }
}
