//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod post;
pub mod event;
pub mod reply;

pub use user::User;
pub use post::Post;
pub use event::{InboundEvent, NavigationAction};
pub use reply::{Keyboard, KeyboardButton, OutboundReply};
