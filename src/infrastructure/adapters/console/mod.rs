//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::domain::entities::{InboundEvent, Keyboard, OutboundReply};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Chat id used for every console event
pub const CONSOLE_CHAT_ID: &str = "console";

/// Prefix turning a console line into a button press
const CALLBACK_PREFIX: &str = "cb ";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    // Stdin is not Sync
    lines: Mutex<Lines<BufReader<Stdin>>>,
    callbacks: u64,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                username: "console".to_string(),
            },
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            callbacks: 0,
        }
    }

    /// Turn one input line into an event. `cb <payload>` presses an inline button.
    fn parse_line(&mut self, line: &str) -> Option<InboundEvent> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return None;
        }

        if let Some(payload) = line.strip_prefix(CALLBACK_PREFIX) {
            self.callbacks += 1;
            return Some(InboundEvent::callback(
                CONSOLE_CHAT_ID,
                format!("console-{}", self.callbacks),
                payload.trim(),
            ));
        }

        Some(InboundEvent::text(CONSOLE_CHAT_ID, line).with_sender("console"))
    }

    /// Render a reply the way it would look in the chat
    pub fn render(reply: &OutboundReply) -> String {
        let mut out = format!("[BOT] {}", reply.text);
        if let Some(keyboard) = &reply.keyboard {
            let label = match keyboard {
                Keyboard::Inline { .. } => "Buttons",
                Keyboard::Reply { .. } => "Menu",
            };
            for row in keyboard.rows() {
                let row_text: Vec<String> = row
                    .iter()
                    .map(|b| match &b.callback_data {
                        Some(data) => format!("{} (cb {})", b.text, data),
                        None => b.text.clone(),
                    })
                    .collect();
                out.push_str(&format!("\n  [{}] {}", label, row_text.join(" | ")));
            }
        }
        out
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&mut self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        println!("Type /start to begin, `cb <payload>` to press an inline button.");
        Ok(())
    }

    async fn poll(&mut self) -> Result<Vec<InboundEvent>, BotError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(b"> ").await.map_err(|e| BotError::Internal(e.to_string()))?;
        stdout.flush().await.map_err(|e| BotError::Internal(e.to_string()))?;

        let line = self
            .lines
            .get_mut()
            .next_line()
            .await
            .map_err(|e| BotError::Internal(e.to_string()))?
            .ok_or(BotError::Closed)?;

        Ok(self.parse_line(&line).into_iter().collect())
    }

    async fn send(&self, reply: &OutboundReply) -> Result<String, BotError> {
        println!("{}", Self::render(reply));
        Ok("console_msg".to_string())
    }

    async fn acknowledge(&self, _callback_id: &str) -> Result<(), BotError> {
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
