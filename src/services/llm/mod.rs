pub mod client;

pub use client::{ChatClient, GenerationError, PollGenerator};
