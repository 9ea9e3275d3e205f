#![allow(dead_code)]

use async_trait::async_trait;
use faith_poll::services::llm::{GenerationError, PollGenerator};
use faith_poll::services::persistence::{AnswerRecord, AnswerStore, PersistError, PollArchive, PollRecord};
use faith_poll::submission::SubmissionCoordinator;
use faith_poll::PollSession;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

pub const SCENARIO_REPLY: &str =
    "Question here ### extra\n[\"A\",\"B\",\"C\",\"D\"]\n**Options:** ignored";

/// Always answers with the same reply, or fails with a 502.
pub struct ScriptedGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self { reply: Some(reply.to_string()), prompts: Mutex::new(Vec::new()) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { reply: None, prompts: Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl PollGenerator for ScriptedGenerator {
    async fn generate(&self, message: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(message.to_string());
        match &self.reply {
            Some(r) => Ok(r.clone()),
            None => Err(GenerationError::Status(StatusCode::BAD_GATEWAY)),
        }
    }
}

/// Holds each call until the test releases the gate whose key appears in the prompt.
#[derive(Default)]
pub struct GatedGenerator {
    gates: Mutex<HashMap<String, oneshot::Receiver<String>>>,
}

impl GatedGenerator {
    pub fn gate(&self, key: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key.to_string(), rx);
        tx
    }
}

#[async_trait]
impl PollGenerator for GatedGenerator {
    async fn generate(&self, message: &str) -> Result<String, GenerationError> {
        let rx = {
            let mut gates = self.gates.lock().unwrap();
            let key = gates.keys().find(|k| message.contains(k.as_str())).cloned();
            key.and_then(|k| gates.remove(&k))
        };
        match rx {
            Some(rx) => rx.await.map_err(|e| GenerationError::Aborted(e.to_string())),
            None => Err(GenerationError::Aborted("no gate".to_string())),
        }
    }
}

/// Never answers.
pub struct HangingGenerator;

#[async_trait]
impl PollGenerator for HangingGenerator {
    async fn generate(&self, _message: &str) -> Result<String, GenerationError> {
        std::future::pending::<Result<String, GenerationError>>().await
    }
}

/// `fail_first` rejects that many writes before accepting; `hang` never returns.
#[derive(Default)]
pub struct FakeAnswerStore {
    pub fail: bool,
    pub fail_first: usize,
    pub hang: bool,
    pub saved: Mutex<Vec<AnswerRecord>>,
}

#[async_trait]
impl AnswerStore for FakeAnswerStore {
    async fn save_answer(&self, record: &AnswerRecord) -> Result<(), PersistError> {
        let attempts = {
            let mut saved = self.saved.lock().unwrap();
            saved.push(record.clone());
            saved.len()
        };
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail || attempts <= self.fail_first {
            return Err(PersistError::Rejected("answer store down".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePollArchive {
    pub fail: bool,
    pub saved: Mutex<Vec<PollRecord>>,
}

#[async_trait]
impl PollArchive for FakePollArchive {
    async fn save_poll(&self, record: &PollRecord) -> Result<(), PersistError> {
        self.saved.lock().unwrap().push(record.clone());
        if self.fail {
            return Err(PersistError::Rejected("archive down".to_string()));
        }
        Ok(())
    }
}

pub struct Harness {
    pub session: PollSession,
    pub answers: Arc<FakeAnswerStore>,
    pub archive: Arc<FakePollArchive>,
}

pub fn harness(
    generator: Arc<dyn PollGenerator>,
    answers: FakeAnswerStore,
    archive: FakePollArchive,
) -> Harness {
    let answers = Arc::new(answers);
    let archive = Arc::new(archive);
    let coordinator = SubmissionCoordinator::new(answers.clone(), archive.clone());
    let session = PollSession::new(generator, coordinator, Duration::from_secs(5));
    Harness { session, answers, archive }
}
