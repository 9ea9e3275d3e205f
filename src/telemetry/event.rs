use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Allowed: ids, epochs, counts, enums
// Forbidden: headline, question and option text

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    GenerationStarted {
        epoch: u64,
    },

    GenerationCommitted {
        epoch: u64,
        option_count: usize,
        fallback: bool,
    },

    /// A result arrived for an epoch that a newer request had already superseded.
    GenerationDiscarded {
        epoch: u64,
        current: u64,
    },

    GenerationFailed {
        epoch: u64,
    },

    OptionSelected {
        index: usize,
    },

    SelectionMissing,

    SubmissionWrite {
        submission_id: Uuid,
        target: SubmissionTarget,
        ok: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionTarget {
    Primary,
    Secondary,
}
