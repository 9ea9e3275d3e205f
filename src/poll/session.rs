use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::event::{GenerationEpoch, SessionEvent};
use super::parser;
use super::prompt;
use super::types::{PollRequest, PollSessionState, ReadyPoll};
use crate::services::llm::{GenerationError, PollGenerator};
use crate::submission::{SubmissionCoordinator, SubmissionError, SubmissionReport, SubmittedAnswer};
use crate::telemetry::{SubmissionTarget, TelemetryEvent, TelemetryRecorder};

/// Shown for any generation failure. Retrying means starting a new generation.
pub const GENERATION_FAILED_REASON: &str = "Something went wrong. Please try again.";

const EVENT_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no poll is ready (state: {0})")]
    NotReady(&'static str),
    #[error("option {index} does not exist ({len} options shown)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("select an option first")]
    NoSelection,
    #[error("this poll has already been answered")]
    AlreadySubmitted,
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// What [`PollSession::apply`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Ready,
    Failed,
    /// Superseded by a newer generation; state untouched.
    Discarded,
}

/// Owns one poll interaction. The only place `PollSessionState` and the
/// `selected` flags are mutated.
pub struct PollSession {
    state: PollSessionState,
    epoch: GenerationEpoch,
    pending: Option<PollRequest>,
    receiver: mpsc::Receiver<SessionEvent>,
    tx: mpsc::Sender<SessionEvent>,
    generator: Arc<dyn PollGenerator>,
    coordinator: SubmissionCoordinator,
    generation_timeout: Duration,
    pub telemetry: TelemetryRecorder,
}

impl PollSession {
    pub fn new(
        generator: Arc<dyn PollGenerator>,
        coordinator: SubmissionCoordinator,
        generation_timeout: Duration,
    ) -> Self {
        let (tx, receiver) = mpsc::channel(EVENT_BUFFER);
        Self {
            state: PollSessionState::Idle,
            epoch: GenerationEpoch::default(),
            pending: None,
            receiver,
            tx,
            generator,
            coordinator,
            generation_timeout,
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn state(&self) -> &PollSessionState {
        &self.state
    }

    pub fn current_epoch(&self) -> GenerationEpoch {
        self.epoch
    }

    /// Discards whatever was on screen and dispatches a generation call.
    /// Any call still in flight keeps running, but its result will be discarded.
    pub fn start_generation(&mut self, request: PollRequest) -> GenerationEpoch {
        self.epoch = self.epoch.next();
        let epoch = self.epoch;

        self.state = PollSessionState::Generating;
        self.telemetry.record(TelemetryEvent::GenerationStarted { epoch: epoch.0 });
        info!("Generation {} started (category: {})", epoch.0, request.category);
        debug!("Generation {} headline: {}", epoch.0, request.headline);

        let message = prompt::compose(&request);
        self.pending = Some(request);

        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        let timeout = self.generation_timeout;

        tokio::spawn(async move {
            let call = tokio::spawn(async move { generator.generate(&message).await });

            let result = match tokio::time::timeout(timeout, call).await {
                Ok(Ok(reply)) => reply,
                Ok(Err(join)) => Err(GenerationError::Aborted(join.to_string())),
                Err(_) => Err(GenerationError::Timeout(timeout)),
            };

            let _ = tx.send(SessionEvent::GenerationCompleted { epoch, result }).await;
        });

        epoch
    }

    /// Commits an event if it belongs to the current generation.
    pub fn apply(&mut self, event: SessionEvent) -> Applied {
        match event {
            SessionEvent::GenerationCompleted { epoch, result } => {
                if epoch != self.epoch || !matches!(self.state, PollSessionState::Generating) {
                    info!("Discarded stale generation {} (current {})", epoch.0, self.epoch.0);
                    self.telemetry.record(TelemetryEvent::GenerationDiscarded {
                        epoch: epoch.0,
                        current: self.epoch.0,
                    });
                    return Applied::Discarded;
                }

                let Some(request) = self.pending.take() else {
                    // Generating is only entered through start_generation, which sets pending.
                    return Applied::Discarded;
                };

                match result {
                    Ok(raw) => {
                        let poll = parser::parse(&raw);
                        let fallback = poll.is_fallback();
                        if fallback {
                            warn!("Generation {} reply had no usable options", epoch.0);
                        }
                        self.telemetry.record(TelemetryEvent::GenerationCommitted {
                            epoch: epoch.0,
                            option_count: poll.options.len(),
                            fallback,
                        });
                        self.state = PollSessionState::Ready(ReadyPoll::new(request, poll));
                        Applied::Ready
                    }
                    Err(e) => {
                        warn!("Generation {} failed: {}", epoch.0, e);
                        self.telemetry.record(TelemetryEvent::GenerationFailed { epoch: epoch.0 });
                        self.state = PollSessionState::Failed {
                            reason: GENERATION_FAILED_REASON.to_string(),
                            poll: None,
                        };
                        Applied::Failed
                    }
                }
            }
        }
    }

    /// Waits for the next generation result and applies it.
    pub async fn next_event(&mut self) -> Option<Applied> {
        let event = self.receiver.recv().await?;
        Some(self.apply(event))
    }

    /// Drains results until the current generation has committed or failed.
    pub async fn settle(&mut self) -> &PollSessionState {
        while matches!(self.state, PollSessionState::Generating) {
            if self.next_event().await.is_none() {
                break;
            }
        }
        &self.state
    }

    /// Single-select, last write wins.
    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        match &mut self.state {
            PollSessionState::Ready(poll) => {
                let len = poll.display.len();
                if index >= len {
                    return Err(SessionError::OptionOutOfRange { index, len });
                }
                for (i, opt) in poll.display.iter_mut().enumerate() {
                    opt.selected = i == index;
                }
                self.telemetry.record(TelemetryEvent::OptionSelected { index });
                Ok(())
            }
            PollSessionState::Submitted { .. } => Err(SessionError::AlreadySubmitted),
            other => Err(SessionError::NotReady(other.name())),
        }
    }

    /// Persists the selected answer. A `Failed` state that still holds its poll
    /// (a failed primary write) may be confirmed again; that retry resends only
    /// the primary record.
    ///
    /// If the returned future is dropped before it completes, the state the
    /// confirmation started from is put back.
    pub async fn confirm_submission(&mut self) -> Result<SubmissionReport, SessionError> {
        let (poll, retry) = match &self.state {
            PollSessionState::Ready(poll) => (poll, false),
            PollSessionState::Failed { poll: Some(poll), .. } => (poll, true),
            PollSessionState::Submitted { .. } => return Err(SessionError::AlreadySubmitted),
            other => return Err(SessionError::NotReady(other.name())),
        };

        let Some(chosen) = poll.selected().map(|opt| opt.value.clone()) else {
            self.telemetry.record(TelemetryEvent::SelectionMissing);
            return Err(SessionError::NoSelection);
        };

        let poll = poll.clone();
        let answer = SubmittedAnswer::new(&poll, chosen.clone());
        let guard = SubmittingGuard::enter(&mut self.state, poll.clone());
        info!("Submission {} started (retry: {})", answer.submission_id, retry);

        let result = if retry {
            let result = self.coordinator.resubmit_primary(&answer).await;
            self.telemetry.record(TelemetryEvent::SubmissionWrite {
                submission_id: answer.submission_id,
                target: SubmissionTarget::Primary,
                ok: result.is_ok(),
            });
            result
        } else {
            let outcome = self.coordinator.attempt(&answer).await;
            self.telemetry.record(TelemetryEvent::SubmissionWrite {
                submission_id: outcome.submission_id,
                target: SubmissionTarget::Primary,
                ok: outcome.primary.is_ok(),
            });
            self.telemetry.record(TelemetryEvent::SubmissionWrite {
                submission_id: outcome.submission_id,
                target: SubmissionTarget::Secondary,
                ok: outcome.secondary.is_ok(),
            });
            outcome.into_result()
        };

        match result {
            Ok(report) => {
                guard.finish(PollSessionState::Submitted { poll, chosen });
                Ok(report)
            }
            Err(e) => {
                guard.finish(PollSessionState::Failed {
                    reason: e.to_string(),
                    poll: Some(poll),
                });
                Err(e.into())
            }
        }
    }
}

/// Holds the session in `Submitting` while writes are in flight and puts the
/// previous state back if it is dropped without [`SubmittingGuard::finish`].
struct SubmittingGuard<'a> {
    state: &'a mut PollSessionState,
    previous: Option<PollSessionState>,
}

impl<'a> SubmittingGuard<'a> {
    fn enter(state: &'a mut PollSessionState, poll: ReadyPoll) -> Self {
        let previous = std::mem::replace(state, PollSessionState::Submitting(poll));
        Self {
            state,
            previous: Some(previous),
        }
    }

    fn finish(mut self, next: PollSessionState) {
        self.previous = None;
        *self.state = next;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            warn!("Submission abandoned before completing; restoring {}", previous.name());
            *self.state = previous;
        }
    }
}
