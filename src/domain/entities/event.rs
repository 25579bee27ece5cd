/// Callback payload prefix for the "show posts of user" action
pub const USER_PAYLOAD_PREFIX: &str = "user_";

/// An inbound update, already stripped of transport framing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Plain text typed by the user (or sent by a reply-keyboard button)
    Text {
        chat_id: String,
        sender: Option<String>,
        text: String,
    },
    /// Inline button press
    Callback {
        chat_id: String,
        callback_id: String,
        data: String,
    },
}

impl InboundEvent {
    pub fn text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        InboundEvent::Text {
            chat_id: chat_id.into(),
            sender: None,
            text: text.into(),
        }
    }

    pub fn callback(
        chat_id: impl Into<String>,
        callback_id: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        InboundEvent::Callback {
            chat_id: chat_id.into(),
            callback_id: callback_id.into(),
            data: data.into(),
        }
    }

    pub fn with_sender(self, name: impl Into<String>) -> Self {
        match self {
            InboundEvent::Text { chat_id, text, .. } => InboundEvent::Text {
                chat_id,
                sender: Some(name.into()),
                text,
            },
            other => other,
        }
    }

    pub fn chat_id(&self) -> &str {
        match self {
            InboundEvent::Text { chat_id, .. } | InboundEvent::Callback { chat_id, .. } => chat_id,
        }
    }
}

/// Drill-down action encoded in an inline button payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    ShowPosts { user_id: String },
}

impl NavigationAction {
    /// Parse a callback payload. Unknown payloads yield `None`.
    pub fn parse(payload: &str) -> Option<Self> {
        payload
            .strip_prefix(USER_PAYLOAD_PREFIX)
            .map(|user_id| NavigationAction::ShowPosts {
                user_id: user_id.to_string(),
            })
    }

    pub fn to_payload(&self) -> String {
        match self {
            NavigationAction::ShowPosts { user_id } => format!("{}{}", USER_PAYLOAD_PREFIX, user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_payload() {
        assert_eq!(
            NavigationAction::parse("user_42"),
            Some(NavigationAction::ShowPosts { user_id: "42".to_string() })
        );
    }

    #[test]
    fn test_parse_keeps_underscores_in_id() {
        let action = NavigationAction::parse("user_a_b").unwrap();
        assert_eq!(action, NavigationAction::ShowPosts { user_id: "a_b".to_string() });
        assert_eq!(action.to_payload(), "user_a_b");
    }

    #[test]
    fn test_parse_unknown_payload() {
        assert_eq!(NavigationAction::parse("foo_123"), None);
        assert_eq!(NavigationAction::parse(""), None);
        assert_eq!(NavigationAction::parse("USER_1"), None);
    }

    #[test]
    fn test_with_sender_ignores_callbacks() {
        let event = InboundEvent::callback("1", "cb", "user_1").with_sender("bob");
        assert_eq!(event, InboundEvent::callback("1", "cb", "user_1"));
        assert_eq!(event.chat_id(), "1");
    }
}
