/// Keyboard button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    pub callback_data: Option<String>,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
        }
    }

    pub fn with_callback(mut self, data: impl Into<String>) -> Self {
        self.callback_data = Some(data.into());
        self
    }
}

/// Button layout attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent keyboard replacing the user's input area; pressing a button sends its label as text
    Reply {
        rows: Vec<Vec<KeyboardButton>>,
        resize: bool,
    },
    /// Buttons attached under the message, answered with callback payloads
    Inline { rows: Vec<Vec<KeyboardButton>> },
}

impl Keyboard {
    pub fn rows(&self) -> &[Vec<KeyboardButton>] {
        match self {
            Keyboard::Reply { rows, .. } | Keyboard::Inline { rows } => rows,
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Message to send back to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub chat_id: String,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl OutboundReply {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}
