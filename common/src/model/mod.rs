pub mod attachment;
pub mod evaluation;
pub mod job;
pub mod profile;
pub mod question;
