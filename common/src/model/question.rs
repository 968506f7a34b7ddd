use serde::{Deserialize, Serialize};

/// A screening question as returned by the Job Service.
///
/// `position` is the zero-based index in the order the service returned the
/// questions; it never changes after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub position: usize,
    pub text: String,
}

impl Question {
    /// Wraps the raw service list, numbering questions in arrival order.
    pub fn from_texts(texts: Vec<String>) -> Vec<Question> {
        texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| Question { position, text })
            .collect()
    }
}

/// One `{question, answer}` pair, serialized verbatim into `answers_json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
}
