//! Poll lifecycle telemetry.
//!
//! Read-only side channel: session decisions never consult it.
//! Events carry ids, epochs and counts only, never headline, question or option text.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::{SubmissionTarget, TelemetryEvent};
pub use metrics::TelemetrySnapshot;
pub use recorder::TelemetryRecorder;
