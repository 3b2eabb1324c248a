//! Submission pipeline: feature encoding, risk prediction, record assembly.

pub mod assembler;
pub mod encoder;
pub mod prediction;
pub mod submission;

pub use submission::{list_health_records, submit_health_data, SubmissionError, SubmissionOutcome};
