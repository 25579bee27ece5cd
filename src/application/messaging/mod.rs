//! Message handling - Event classification and dispatching

pub mod dispatcher;
pub mod parser;

pub use dispatcher::Dispatcher;
