pub mod config;
pub mod poll;
pub mod services;
pub mod submission;
pub mod telemetry;

// Re-export specific items for convenient access
pub use config::PollConfig;
pub use poll::session::PollSession;
pub use poll::types::{ParsedPoll, PollRequest, PollSessionState};
pub use submission::SubmissionCoordinator;
