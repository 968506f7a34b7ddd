use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::workflow::error::WorkflowError;

/// Identifier of the job an applicant is applying to.
///
/// Always positive: the only ways to build one are [`JobId::new`] and
/// [`JobId::parse`], both of which reject zero. Holding a `JobId` therefore
/// means the Job Service may be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct JobId(NonZeroU64);

impl JobId {
    pub fn new(raw: u64) -> Result<Self, WorkflowError> {
        NonZeroU64::new(raw)
            .map(JobId)
            .ok_or_else(|| WorkflowError::InvalidJob {
                raw: Some(raw.to_string()),
            })
    }

    /// Parses the `job` query parameter of the apply page.
    ///
    /// Absent, blank, non-numeric, negative and zero values are all rejected
    /// with [`WorkflowError::InvalidJob`].
    pub fn parse(raw: Option<&str>) -> Result<Self, WorkflowError> {
        let invalid = || WorkflowError::InvalidJob {
            raw: raw.map(str::to_string),
        };
        let trimmed = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let value = trimmed.parse::<u64>().map_err(|_| invalid())?;
        NonZeroU64::new(value).map(JobId).ok_or_else(invalid)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for JobId {
    type Error = WorkflowError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        JobId::new(value)
    }
}

impl From<JobId> for u64 {
    fn from(value: JobId) -> Self {
        value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        let id = JobId::parse(Some("42")).expect("valid id");
        assert_eq!(id.get(), 42);
        assert_eq!(JobId::parse(Some(" 7 ")).expect("trimmed").get(), 7);
    }

    #[test]
    fn rejects_missing_zero_and_garbage() {
        for raw in [None, Some(""), Some("0"), Some("-3"), Some("abc"), Some("4.5")] {
            match JobId::parse(raw) {
                Err(WorkflowError::InvalidJob { .. }) => {}
                other => panic!("expected invalid job for {raw:?}, got {other:?}"),
            }
        }
        assert!(JobId::new(0).is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        let id = JobId::new(42).expect("valid id");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "42");
        assert!(serde_json::from_str::<JobId>("0").is_err());
    }
}
