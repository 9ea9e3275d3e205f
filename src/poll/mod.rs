pub mod event;
pub mod parser;
pub mod prompt;
pub mod session;
pub mod types;

pub use event::{GenerationEpoch, SessionEvent};
pub use parser::parse;
pub use session::{Applied, PollSession, SessionError};
pub use types::*;
