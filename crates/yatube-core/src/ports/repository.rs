use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, NewPost, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by the unique username used in profile URLs.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, Uuid> {
    /// Find a group by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// All groups, ordered by title. Backs the group choice on the post form.
    async fn list_all(&self) -> Result<Vec<Group>, RepoError>;
}

/// Post repository.
///
/// Every listing method returns posts already ordered reverse-chronologically
/// (`pub_date` descending, id descending as tiebreak); callers paginate the
/// result without re-sorting.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Persist a draft, returning the post with its storage-assigned id.
    async fn create(&self, draft: NewPost) -> Result<Post, RepoError>;

    /// All posts, newest first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts belonging to one group, newest first.
    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts written by one author, newest first.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
