pub mod coordinator;

pub use coordinator::{SubmissionCoordinator, SubmissionError, SubmissionOutcome, SubmissionReport, SubmittedAnswer};
