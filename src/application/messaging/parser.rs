//! Route parser - classifies inbound events into dispatcher routes

use crate::domain::entities::{InboundEvent, NavigationAction};

/// Command that opens the main menu
pub const START_COMMAND: &str = "/start";

/// Every way an inbound event can be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/start`: greet and show the main menu
    Start,
    /// Main-menu button: list users
    ListUsers,
    /// Text matching no route
    IgnoredText,
    /// Inline button for a user: list their posts
    ShowPosts { user_id: String },
    /// Callback payload matching no action
    IgnoredCallback,
}

impl Route {
    /// Classify an event. `menu_label` is the text sent by the main-menu button.
    pub fn classify(event: &InboundEvent, menu_label: &str) -> Self {
        match event {
            InboundEvent::Text { text, .. } if text == START_COMMAND => Route::Start,
            InboundEvent::Text { text, .. } if text == menu_label => Route::ListUsers,
            InboundEvent::Text { .. } => Route::IgnoredText,
            InboundEvent::Callback { data, .. } => match NavigationAction::parse(data) {
                Some(NavigationAction::ShowPosts { user_id }) => Route::ShowPosts { user_id },
                None => Route::IgnoredCallback,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "list users";

    #[test]
    fn test_classify_text() {
        assert_eq!(Route::classify(&InboundEvent::text("1", "/start"), LABEL), Route::Start);
        assert_eq!(Route::classify(&InboundEvent::text("1", "list users"), LABEL), Route::ListUsers);
        assert_eq!(Route::classify(&InboundEvent::text("1", "hello"), LABEL), Route::IgnoredText);
    }

    #[test]
    fn test_classify_is_exact_match() {
        assert_eq!(Route::classify(&InboundEvent::text("1", "/start now"), LABEL), Route::IgnoredText);
        assert_eq!(Route::classify(&InboundEvent::text("1", "List users"), LABEL), Route::IgnoredText);
        assert_eq!(Route::classify(&InboundEvent::text("1", " list users"), LABEL), Route::IgnoredText);
    }

    #[test]
    fn test_classify_callbacks() {
        assert_eq!(
            Route::classify(&InboundEvent::callback("1", "cb", "user_a"), LABEL),
            Route::ShowPosts { user_id: "a".to_string() }
        );
        assert_eq!(
            Route::classify(&InboundEvent::callback("1", "cb", "foo_123"), LABEL),
            Route::IgnoredCallback
        );
    }

    #[test]
    fn test_callback_with_menu_label_is_not_a_text_route() {
        assert_eq!(
            Route::classify(&InboundEvent::callback("1", "cb", LABEL), LABEL),
            Route::IgnoredCallback
        );
    }
}
