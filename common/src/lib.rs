//! Shared core of the proctored application workflow.
//!
//! - `model`: data carried through the workflow (job ids, questions, answers,
//!   résumé attachment, applicant profile, evaluation result).
//! - `requests`: wire shapes exchanged with the Job and Evaluation services.
//! - `workflow`: the state machines driving a single submission. Nothing in
//!   here touches the DOM; the browser is reached through injected traits so
//!   every transition can be exercised from plain unit tests.

pub mod model;
pub mod requests;
pub mod workflow;
