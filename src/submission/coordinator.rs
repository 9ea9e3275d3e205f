use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::poll::types::{PollRequest, ReadyPoll};
use crate::services::persistence::{AnswerRecord, AnswerStore, PersistError, PollArchive, PollRecord};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("failed to submit your answer, try again: {0}")]
    Primary(#[source] PersistError),
}

/// Everything the two destinations need, captured at confirmation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub submission_id: Uuid,
    pub request: PollRequest,
    pub question: String,
    pub options: Vec<String>,
    pub chosen: String,
}

impl SubmittedAnswer {
    pub fn new(poll: &ReadyPoll, chosen: impl Into<String>) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            request: poll.request.clone(),
            question: poll.poll.question.clone(),
            options: poll.poll.options.clone(),
            chosen: chosen.into(),
        }
    }

    pub fn answer_record(&self) -> AnswerRecord {
        AnswerRecord {
            headline: self.request.headline.clone(),
            question: self.question.clone(),
            selected_option: self.chosen.clone(),
            category: self.request.category.clone(),
        }
    }

    pub fn poll_record(&self) -> PollRecord {
        PollRecord {
            headline: self.request.headline.clone(),
            description: self.request.details.clone(),
            category: self.request.category.clone(),
            poll_question: self.question.clone(),
            options: self.options.clone(),
            user_choice: self.chosen.clone(),
        }
    }
}

/// Per-destination results. Both writes were attempted regardless of the other.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub submission_id: Uuid,
    pub primary: Result<(), PersistError>,
    pub secondary: Result<(), PersistError>,
}

impl SubmissionOutcome {
    /// Only the primary write decides success.
    pub fn into_result(self) -> Result<SubmissionReport, SubmissionError> {
        match self.primary {
            Ok(()) => Ok(SubmissionReport {
                submission_id: self.submission_id,
                secondary_error: self.secondary.err(),
            }),
            Err(e) => Err(SubmissionError::Primary(e)),
        }
    }
}

#[derive(Debug)]
pub struct SubmissionReport {
    pub submission_id: Uuid,
    /// Best-effort write failure. Logged, never shown to the user.
    pub secondary_error: Option<PersistError>,
}

#[derive(Clone)]
pub struct SubmissionCoordinator {
    answers: Arc<dyn AnswerStore>,
    archive: Arc<dyn PollArchive>,
}

impl SubmissionCoordinator {
    pub fn new(answers: Arc<dyn AnswerStore>, archive: Arc<dyn PollArchive>) -> Self {
        Self { answers, archive }
    }

    /// Runs both writes concurrently. Neither is retried or rolled back.
    pub async fn attempt(&self, answer: &SubmittedAnswer) -> SubmissionOutcome {
        let answer_record = answer.answer_record();
        let poll_record = answer.poll_record();

        let (primary, secondary) = tokio::join!(
            self.answers.save_answer(&answer_record),
            self.archive.save_poll(&poll_record),
        );

        match &primary {
            Ok(()) => info!("Submission {} answer saved", answer.submission_id),
            Err(e) => error!("Submission {} answer write failed: {}", answer.submission_id, e),
        }
        match &secondary {
            Ok(()) => info!("Submission {} poll record saved", answer.submission_id),
            Err(e) => warn!("Submission {} poll record write failed (best-effort): {}", answer.submission_id, e),
        }

        SubmissionOutcome {
            submission_id: answer.submission_id,
            primary,
            secondary,
        }
    }

    pub async fn submit(&self, answer: &SubmittedAnswer) -> Result<SubmissionReport, SubmissionError> {
        self.attempt(answer).await.into_result()
    }

    /// Sends the primary record again after it failed. The secondary write
    /// already ran on the first attempt, so it is left alone.
    pub async fn resubmit_primary(&self, answer: &SubmittedAnswer) -> Result<SubmissionReport, SubmissionError> {
        match self.answers.save_answer(&answer.answer_record()).await {
            Ok(()) => {
                info!("Submission {} answer saved on retry", answer.submission_id);
                Ok(SubmissionReport {
                    submission_id: answer.submission_id,
                    secondary_error: None,
                })
            }
            Err(e) => {
                error!("Submission {} answer retry failed: {}", answer.submission_id, e);
                Err(SubmissionError::Primary(e))
            }
        }
    }
}
