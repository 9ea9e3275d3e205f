pub mod client;

pub use client::{AnswerRecord, AnswerStore, HttpAnswerStore, HttpPollArchive, PersistError, PollArchive, PollRecord};
