//! In-memory port implementations for unit tests.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;

use crate::{
    domain::{ChatId, Timestamp},
    errors::Error,
    messaging::{port::MessagingPort, types::MessagingCapabilities},
    ports::HomeworkSource,
    Result,
};

#[derive(Default)]
pub struct FakeMessenger {
    fail: bool,
    limit: Option<usize>,
    attempts: Mutex<usize>,
    sent: Mutex<Vec<(ChatId, String)>>,
}

impl FakeMessenger {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        match self.limit {
            Some(max_message_len) => MessagingCapabilities { max_message_len },
            None => MessagingCapabilities::default(),
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err(Error::Delivery("chat not found".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

/// Replays scripted answers in order and records every `from_date` it was asked for.
#[derive(Default)]
pub struct ScriptedSource {
    answers: Mutex<VecDeque<Result<serde_json::Value>>>,
    requests: Mutex<Vec<Timestamp>>,
}

impl ScriptedSource {
    pub fn new(answers: impl IntoIterator<Item = Result<serde_json::Value>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Timestamp> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HomeworkSource for ScriptedSource {
    async fn fetch(&self, from_date: Timestamp) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push(from_date);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Unexpected("no scripted answer left".to_string())))
    }
}
