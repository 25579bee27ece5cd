//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: The update loop driving the bot
//! - Messaging: Event classification and dispatching
//! - Presenter: Reply text and keyboard rendering
//! - Locale: User-facing texts
//! - Errors: Domain-specific errors

pub mod errors;
pub mod locale;
pub mod messaging;
pub mod presenter;
pub mod services;

#[cfg(test)]
pub mod testing;
