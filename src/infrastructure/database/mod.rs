//! SQLite store reader

use async_trait::async_trait;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::application::errors::StorageError;
use crate::domain::entities::{Post, User};
use crate::domain::traits::Store;

const LIST_USERS_SQL: &str = "SELECT id, name, email FROM users";
const LIST_POSTS_SQL: &str = "SELECT id, name, created_at FROM posts WHERE created_by_id = ?1";

/// Both tables must exist for the store to be usable
const PING_SQL: [&str; 2] = ["SELECT 1 FROM users LIMIT 0", "SELECT 1 FROM posts LIMIT 0"];

/// Read-only view over the `users` and `posts` tables
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open an existing database file read-only and check that its tables answer queries.
    ///
    /// A missing file is an error; it is never created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(path, flags)?;
        let store = Self::from_connection(conn);
        store.ping()?;
        Ok(store)
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    pub fn ping(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        for sql in PING_SQL {
            conn.prepare(sql)?.exists([])?;
        }
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("Lock poisoned".to_string()))
    }

    fn query_users(&self) -> Result<Vec<User>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(LIST_USERS_SQL)?;

        let rows = stmt.query_map([], |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        })?;

        let mut users = Vec::new();
        for user in rows {
            users.push(user?);
        }
        Ok(users)
    }

    fn query_posts(&self, user_id: &str) -> Result<Vec<Post>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(LIST_POSTS_SQL)?;

        let rows = stmt.query_map([user_id], |row| {
            Ok(Post {
                id: row.get(0)?,
                title: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;

        let mut posts = Vec::new();
        for post in rows {
            posts.push(post?);
        }
        Ok(posts)
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        self.query_users()
    }

    async fn list_posts(&self, user_id: &str) -> Result<Vec<Post>, StorageError> {
        self.query_posts(user_id)
    }
}
