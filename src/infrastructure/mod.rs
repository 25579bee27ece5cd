//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite store reader
//! - Adapters: Platform integrations (Telegram, console)

pub mod config;
pub mod database;
pub mod adapters;
