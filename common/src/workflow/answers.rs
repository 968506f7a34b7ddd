use crate::model::question::{Answer, Question};
use crate::workflow::error::WorkflowError;

/// Answers aligned index-for-index with the loaded questions.
///
/// The set is built once from the question list and only ever has its
/// answer text edited afterwards: there is no way to insert, remove or
/// reorder entries, which is what keeps `answers_json` in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<Answer>,
}

impl AnswerSet {
    pub fn seed(questions: &[Question]) -> Self {
        Self {
            entries: questions
                .iter()
                .map(|q| Answer {
                    question: q.text.clone(),
                    answer: String::new(),
                })
                .collect(),
        }
    }

    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) -> Result<(), WorkflowError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(WorkflowError::AnswerOutOfRange { index, len })?;
        entry.answer = text.into();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Answer> {
        self.entries.get(index)
    }

    pub fn as_slice(&self) -> &[Answer] {
        &self.entries
    }

    /// Copy handed to a submission; the set itself stays with the form.
    pub fn snapshot(&self) -> Vec<Answer> {
        self.entries.clone()
    }
}
