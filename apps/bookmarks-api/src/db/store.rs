use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch};
use crate::models::user::{NewUser, User};

/// Persistence gateway over users and bookmarks.
///
/// Backed by PostgreSQL in production and an in-memory map in tests. Every
/// method is one atomic unit: either all of its writes land or none do.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_all_users(&self) -> Result<Vec<User>, ApiError>;

    /// Exact, case-sensitive match on username and password.
    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ApiError>;

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, ApiError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Fails with a conflict when the username is taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, ApiError>;

    /// Removes the user and all of their bookmarks. Returns `false` when no
    /// such user exists.
    async fn delete_user(&self, id: i32) -> Result<bool, ApiError>;

    async fn find_bookmarks_by_owner(&self, owner_id: i32) -> Result<Vec<Bookmark>, ApiError>;

    async fn find_bookmark(&self, id: i32, owner_id: i32) -> Result<Option<Bookmark>, ApiError>;

    /// Insert when `draft.id` is `None`, otherwise overwrite the row with that
    /// id and owner (not found if there is none).
    async fn save_bookmark(&self, draft: BookmarkDraft) -> Result<Bookmark, ApiError>;

    /// Look up by id and owner, merge `patch`, re-validate and save.
    /// `Ok(None)` when the bookmark does not exist for this owner.
    async fn update_bookmark(
        &self,
        id: i32,
        owner_id: i32,
        patch: BookmarkPatch,
    ) -> Result<Option<Bookmark>, ApiError>;

    /// Delete by id and owner, returning the last stored representation.
    async fn delete_bookmark(&self, id: i32, owner_id: i32) -> Result<Option<Bookmark>, ApiError>;
}
