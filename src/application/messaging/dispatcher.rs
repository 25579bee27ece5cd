//! Message dispatcher - Routes inbound events to store queries and replies

use crate::application::locale::Locale;
use crate::application::presenter;
use crate::domain::entities::{InboundEvent, OutboundReply};
use crate::domain::traits::{Bot, Store};
use super::parser::Route;

/// What handling one event amounts to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Chat message to send, if any
    pub reply: Option<OutboundReply>,
    /// Callback to answer after the reply
    pub acknowledge: Option<String>,
}

/// Event dispatcher - owns the store and renders replies in one locale
pub struct Dispatcher<S: Store> {
    store: S,
    locale: Locale,
}

impl<S: Store> Dispatcher<S> {
    pub fn new(store: S, locale: Locale) -> Self {
        Self { store, locale }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide the reply and acknowledgment for an event without touching the transport
    pub async fn route(&self, event: &InboundEvent) -> Dispatch {
        let route = Route::classify(event, self.locale.list_users_button());
        let chat_id = event.chat_id();

        let reply = match route {
            Route::Start => Some(
                OutboundReply::new(chat_id, self.locale.greeting())
                    .with_keyboard(presenter::main_menu(self.locale)),
            ),
            Route::ListUsers => Some(self.users_reply(chat_id).await),
            Route::ShowPosts { user_id } => Some(self.posts_reply(chat_id, &user_id).await),
            Route::IgnoredText => None,
            Route::IgnoredCallback => {
                if let InboundEvent::Callback { data, .. } = event {
                    tracing::debug!("[{}] Ignoring callback payload: {}", chat_id, data);
                }
                None
            }
        };

        let acknowledge = match event {
            InboundEvent::Callback { callback_id, .. } => Some(callback_id.clone()),
            InboundEvent::Text { .. } => None,
        };

        Dispatch { reply, acknowledge }
    }

    /// Route an event and deliver the outcome. Transport failures are logged, never returned.
    pub async fn handle<B: Bot + ?Sized>(&self, bot: &B, event: &InboundEvent) {
        if let InboundEvent::Text { sender, text, .. } = event {
            tracing::info!("[{}] {}", sender.as_deref().unwrap_or("unknown"), text);
        }

        let dispatch = self.route(event).await;

        if let Some(reply) = &dispatch.reply {
            if let Err(e) = bot.send(reply).await {
                tracing::error!("Failed to send message to {}: {}", reply.chat_id, e);
            }
        }

        if let Some(callback_id) = &dispatch.acknowledge {
            if let Err(e) = bot.acknowledge(callback_id).await {
                tracing::warn!("Failed to answer callback {}: {}", callback_id, e);
            }
        }
    }

    async fn users_reply(&self, chat_id: &str) -> OutboundReply {
        let users = match self.store.list_users().await {
            Ok(users) => users,
            Err(e) => {
                tracing::error!("Error getting users: {}", e);
                return OutboundReply::new(chat_id, self.locale.users_error());
            }
        };

        if users.is_empty() {
            return OutboundReply::new(chat_id, self.locale.no_users());
        }

        OutboundReply::new(chat_id, self.locale.choose_user())
            .with_keyboard(presenter::build_users_keyboard(&users, self.locale))
    }

    async fn posts_reply(&self, chat_id: &str, user_id: &str) -> OutboundReply {
        match self.store.list_posts(user_id).await {
            Ok(posts) => OutboundReply::new(chat_id, presenter::format_posts(&posts, user_id, self.locale)),
            Err(e) => {
                tracing::error!("Error getting posts for user {}: {}", user_id, e);
                OutboundReply::new(chat_id, self.locale.posts_error())
            }
        }
    }
}
