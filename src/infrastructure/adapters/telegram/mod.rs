//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::entities::{InboundEvent, Keyboard, KeyboardButton, OutboundReply};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Slack on top of the long-poll window before the HTTP client gives up
const CLIENT_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl Update {
    /// Convert to an inbound event. Updates the bot cannot act on yield `None`.
    pub fn into_event(self) -> Option<InboundEvent> {
        if let Some(msg) = self.message {
            let text = msg.text?;
            let sender = msg.from.and_then(|u| u.username.or(u.first_name));
            return Some(InboundEvent::Text {
                chat_id: msg.chat.id.to_string(),
                sender,
                text,
            });
        }

        let cb = self.callback_query?;
        // Private chats share the user's id
        let chat_id = cb.message.map(|m| m.chat.id).unwrap_or(cb.from.id);
        Some(InboundEvent::Callback {
            chat_id: chat_id.to_string(),
            callback_id: cb.id,
            data: cb.data.unwrap_or_default(),
        })
    }
}

/// Bot API envelope
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Serialize)]
struct InlineKeyboardButton {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
}

#[derive(Serialize)]
struct ReplyKeyboardButton {
    text: String,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ReplyMarkup {
    Inline {
        inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
    },
    Reply {
        keyboard: Vec<Vec<ReplyKeyboardButton>>,
        resize_keyboard: bool,
    },
}

impl From<&Keyboard> for ReplyMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        fn map_rows<T>(rows: &[Vec<KeyboardButton>], f: impl Fn(&KeyboardButton) -> T) -> Vec<Vec<T>> {
            rows.iter().map(|row| row.iter().map(&f).collect()).collect()
        }

        match keyboard {
            Keyboard::Inline { rows } => ReplyMarkup::Inline {
                inline_keyboard: map_rows(rows, |btn| InlineKeyboardButton {
                    text: btn.text.clone(),
                    callback_data: btn.callback_data.clone(),
                }),
            },
            Keyboard::Reply { rows, resize } => ReplyMarkup::Reply {
                keyboard: map_rows(rows, |btn| ReplyKeyboardButton { text: btn.text.clone() }),
                resize_keyboard: *resize,
            },
        }
    }
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_url: String,
    client: Client,
    info: BotInfo,
    offset: i64,
    poll_timeout: Duration,
}

impl TelegramAdapter {
    pub fn new(
        token: impl Into<String>,
        api_url: impl Into<String>,
        poll_timeout: Duration,
    ) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(poll_timeout + CLIENT_TIMEOUT_MARGIN)
            .build()
            .map_err(|e| BotError::Config(e.to_string()))?;

        Ok(Self {
            token: token.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            client,
            info: BotInfo {
                username: "post_browser_bot".to_string(),
            },
            offset: 0,
            poll_timeout,
        })
    }

    /// First characters of the token, safe to log
    fn token_preview(&self) -> String {
        self.token.chars().take(8).collect()
    }

    /// Get the API URL for a method
    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Call a Bot API method and unwrap its envelope
    async fn call<Req, Res>(&self, method: &str, request: &Req) -> Result<Res, BotError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let response = self.client
            .post(self.method_url(method))
            .json(request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let status = response.status();
        let data: ApiResponse<Res> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(format!("{} ({}): {}", method, status, e)))?;

        if !data.ok {
            return Err(BotError::Api(format!(
                "{} failed: {}",
                method,
                data.description.unwrap_or_else(|| status.to_string())
            )));
        }

        data.result
            .ok_or_else(|| BotError::Parse(format!("{} returned no result", method)))
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            first_name: String,
            username: Option<String>,
        }

        #[derive(Serialize)]
        struct GetMeRequest {}

        let me: BotInfoResponse = self.call("getMe", &GetMeRequest {}).await?;
        self.info = BotInfo {
            username: me.username.unwrap_or(me.first_name),
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<&'static str>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message", "callback_query"],
        };

        self.call("getUpdates", &request).await
    }

    /// Get the next update offset
    pub fn get_next_offset(current: i64, updates: &[Update]) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .map_or(current, |next| next.max(current))
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&mut self) -> Result<(), BotError> {
        tracing::info!("Starting Telegram bot (token: {}...)", self.token_preview());
        self.fetch_bot_info().await?;
        tracing::info!("Authorized on account {}", self.info.username);
        Ok(())
    }

    async fn poll(&mut self) -> Result<Vec<InboundEvent>, BotError> {
        let updates = self.get_updates(self.offset, self.poll_timeout.as_secs()).await?;
        self.offset = Self::get_next_offset(self.offset, &updates);

        Ok(updates
            .into_iter()
            .filter_map(|update| {
                let id = update.update_id;
                let event = update.into_event();
                if event.is_none() {
                    tracing::debug!("Skipping update {} without text or callback", id);
                }
                event
            })
            .collect())
    }

    async fn send(&self, reply: &OutboundReply) -> Result<String, BotError> {
        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        tracing::debug!("Sending to {}: {}", reply.chat_id, reply.text);
        let request = SendMessageRequest {
            chat_id: &reply.chat_id,
            text: &reply.text,
            reply_markup: reply.keyboard.as_ref().map(ReplyMarkup::from),
        };

        let result: MessageResult = self.call("sendMessage", &request).await?;
        Ok(result.message_id.to_string())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct AnswerRequest<'a> {
            callback_query_id: &'a str,
        }

        let _: bool = self
            .call("answerCallbackQuery", &AnswerRequest { callback_query_id: callback_id })
            .await?;
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
