use common::model::attachment::Attachment;
use common::model::evaluation::EvaluationResult;
use common::model::question::Question;
use common::workflow::{ReadTicket, ServiceError, WorkflowError};

pub enum Msg {
    QuestionsLoaded(Result<Vec<Question>, WorkflowError>),
    SetAnswer(usize, String),
    SetName(String),
    SetEmail(String),
    OpenFilePicker,
    FileSelected(web_sys::File),
    FileRead {
        ticket: ReadTicket,
        attachment: Attachment,
    },
    FileReadFailed {
        ticket: ReadTicket,
        name: String,
        reason: String,
    },
    DragEnter,
    DragOver,
    DragLeave,
    Dropped(Option<web_sys::File>),
    Submit,
    SubmitFinished(Result<EvaluationResult, ServiceError>),
}
