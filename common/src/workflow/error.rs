use crate::model::job::JobId;
use crate::workflow::controller::WorkflowState;

/// Every way the apply workflow can fail.
///
/// The first four variants are the user-facing taxonomy; their `Display`
/// strings are shown verbatim in the blocking alert. The remaining ones flag
/// calls made in the wrong state and are only logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    #[error("No job selected. Open this page from a job listing.")]
    InvalidJob { raw: Option<String> },

    #[error("Could not load the questions for job #{job}: {source}")]
    QuestionLoad {
        job: JobId,
        #[source]
        source: ServiceError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Your application could not be submitted: {0}")]
    Submission(#[source] ServiceError),

    #[error("answer index {index} is out of range for {len} questions")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error("the application cannot be edited while {state}")]
    Locked { state: WorkflowState },

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: WorkflowState,
    },
}

impl WorkflowError {
    /// Whether the error belongs to the user-facing taxonomy.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            WorkflowError::InvalidJob { .. }
                | WorkflowError::QuestionLoad { .. }
                | WorkflowError::Validation(_)
                | WorkflowError::Submission(_)
        )
    }
}

/// Local checks run before any network call, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload your CV before submitting.")]
    MissingAttachment,
    #[error("Please enter your name.")]
    BlankName,
    #[error("Please enter your email.")]
    BlankEmail,
}

/// Failure reported by a Job Service or Evaluation Service client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    Rejected(String),
}
