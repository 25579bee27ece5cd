use async_trait::async_trait;
use crate::application::errors::StorageError;
use crate::domain::entities::{Post, User};

/// Store trait - read access to users and their posts
#[async_trait]
pub trait Store: Send + Sync {
    /// All users, in whatever order the store yields them
    async fn list_users(&self) -> Result<Vec<User>, StorageError>;

    /// Posts authored by `user_id`
    async fn list_posts(&self, user_id: &str) -> Result<Vec<Post>, StorageError>;
}
