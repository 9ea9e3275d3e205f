use serde::{Deserialize, Serialize};

use crate::services::llm::GenerationError;

/// Monotonic generation counter. Only the newest epoch may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GenerationEpoch(pub u64);

impl GenerationEpoch {
    pub fn next(self) -> Self {
        GenerationEpoch(self.0 + 1)
    }
}

#[derive(Debug)]
pub enum SessionEvent {
    /// Raw reply (or failure) from a spawned generation call.
    GenerationCompleted {
        epoch: GenerationEpoch,
        result: Result<String, GenerationError>,
    },
}
