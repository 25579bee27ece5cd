//! In-process fakes for dispatcher and update loop tests

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::errors::{BotError, StorageError};
use crate::domain::entities::{InboundEvent, OutboundReply, Post, User};
use crate::domain::traits::{Bot, BotInfo, Store};

/// Store serving fixed rows, or failing every query
#[derive(Default)]
pub struct FakeStore {
    pub users: Vec<User>,
    pub posts: HashMap<String, Vec<Post>>,
    pub fail: bool,
    pub queries: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_posts(mut self, user_id: &str, posts: Vec<Post>) -> Self {
        self.posts.insert(user_id.to_string(), posts);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for FakeStore {
    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        self.queries.lock().unwrap().push("users".to_string());
        if self.fail {
            return Err(StorageError::Unavailable("connection refused".to_string()));
        }
        Ok(self.users.clone())
    }

    async fn list_posts(&self, user_id: &str) -> Result<Vec<Post>, StorageError> {
        self.queries.lock().unwrap().push(format!("posts:{}", user_id));
        if self.fail {
            return Err(StorageError::Unavailable("connection refused".to_string()));
        }
        Ok(self.posts.get(user_id).cloned().unwrap_or_default())
    }
}

/// Transport replaying scripted poll results and recording everything sent
#[derive(Default)]
pub struct RecordingBot {
    pub batches: Mutex<VecDeque<Result<Vec<InboundEvent>, BotError>>>,
    pub sent: Mutex<Vec<OutboundReply>>,
    pub acknowledged: Mutex<Vec<String>>,
    /// Every transport call in order, e.g. `send:1` or `ack:cb`
    pub calls: Mutex<Vec<String>>,
    pub fail_sends: bool,
}

impl RecordingBot {
    pub fn with_batches(batches: Vec<Result<Vec<InboundEvent>, BotError>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundReply> {
        self.sent.lock().unwrap().clone()
    }

    pub fn acknowledged(&self) -> Vec<String> {
        self.acknowledged.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Next scripted batch. Once the script runs out every poll is an idle window.
    async fn next_batch(&self) -> Result<Vec<InboundEvent>, BotError> {
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => batch,
            None => {
                tokio::time::sleep(Duration::from_millis(1)).await;
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&mut self) -> Result<(), BotError> {
        Ok(())
    }

    async fn poll(&mut self) -> Result<Vec<InboundEvent>, BotError> {
        self.next_batch().await
    }

    async fn send(&self, reply: &OutboundReply) -> Result<String, BotError> {
        self.calls.lock().unwrap().push(format!("send:{}", reply.chat_id));
        if self.fail_sends {
            return Err(BotError::Network("connection reset".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(reply.clone());
        Ok(sent.len().to_string())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), BotError> {
        self.calls.lock().unwrap().push(format!("ack:{}", callback_id));
        self.acknowledged.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            username: "test_bot".to_string(),
        }
    }
}

/// Shared handle, so a test can inspect the bot after handing it to a consuming loop
#[async_trait]
impl Bot for Arc<RecordingBot> {
    async fn start(&mut self) -> Result<(), BotError> {
        Ok(())
    }

    async fn poll(&mut self) -> Result<Vec<InboundEvent>, BotError> {
        self.next_batch().await
    }

    async fn send(&self, reply: &OutboundReply) -> Result<String, BotError> {
        (**self).send(reply).await
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), BotError> {
        (**self).acknowledge(callback_id).await
    }

    fn bot_info(&self) -> BotInfo {
        (**self).bot_info()
    }
}
