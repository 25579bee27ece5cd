//! Presenter - turns records into reply text and keyboards.
//!
//! Everything here is pure: no store, no transport, no logging.

use crate::application::locale::Locale;
use crate::domain::entities::{Keyboard, KeyboardButton, NavigationAction, Post, User};

/// Date format of a post block: `DD.MM.YYYY HH:MM`, 24-hour clock
const POST_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Name, else email, else `placeholder`
pub fn resolve_display_name<'a>(user: &'a User, placeholder: &'a str) -> &'a str {
    user.display_name().unwrap_or(placeholder)
}

/// Persistent main menu with the single "list users" button
pub fn main_menu(locale: Locale) -> Keyboard {
    Keyboard::Reply {
        rows: vec![vec![KeyboardButton::new(locale.list_users_button())]],
        resize: true,
    }
}

/// One row per user, each a single button opening that user's posts
pub fn build_users_keyboard(users: &[User], locale: Locale) -> Keyboard {
    let rows = users
        .iter()
        .map(|user| {
            let payload = NavigationAction::ShowPosts { user_id: user.id.clone() }.to_payload();
            vec![KeyboardButton::new(resolve_display_name(user, locale.no_name())).with_callback(payload)]
        })
        .collect();

    Keyboard::Inline { rows }
}

/// Render a user's posts as plain text
pub fn format_posts(posts: &[Post], user_id: &str, locale: Locale) -> String {
    if posts.is_empty() {
        return locale.no_posts(user_id);
    }

    let mut text = locale.posts_header(user_id);
    text.push_str("\n\n");

    let blocks: Vec<String> = posts
        .iter()
        .map(|post| {
            format!(
                "📝 {}\n🆔 ID: {}\n📅 {}: {}",
                post.title,
                post.id,
                locale.date_label(),
                post.created_at.format(POST_DATE_FORMAT)
            )
        })
        .collect();

    text.push_str(&blocks.join("\n\n"));
    text
}
