//! In-memory [`Store`] for local development and tests.
//!
//! Each call holds the lock for its whole duration, which gives the same
//! all-or-nothing behavior as a database transaction.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::db::store::Store;
use crate::error::ApiError;
use crate::models::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch};
use crate::models::user::{NewUser, User};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    bookmarks: BTreeMap<i32, Bookmark>,
    user_seq: i32,
    bookmark_seq: i32,
}

impl Tables {
    fn owned(&self, id: i32, owner_id: i32) -> Option<&Bookmark> {
        self.bookmarks.get(&id).filter(|b| b.user_id == owner_id)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_all_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.tables.lock().users.values().cloned().collect())
    }

    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ApiError> {
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|u| u.username == username && u.password == password)
            .cloned())
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        Ok(self.tables.lock().users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, ApiError> {
        new_user.validate()?;

        let mut tables = self.tables.lock();
        if tables.users.values().any(|u| u.username == new_user.username) {
            return Err(ApiError::conflict("Username is already taken"));
        }

        tables.user_seq += 1;
        let user = User {
            id: tables.user_seq,
            username: new_user.username,
            password: new_user.password,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, ApiError> {
        let mut tables = self.tables.lock();
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.bookmarks.retain(|_, b| b.user_id != id);
        Ok(true)
    }

    async fn find_bookmarks_by_owner(&self, owner_id: i32) -> Result<Vec<Bookmark>, ApiError> {
        Ok(self
            .tables
            .lock()
            .bookmarks
            .values()
            .filter(|b| b.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_bookmark(&self, id: i32, owner_id: i32) -> Result<Option<Bookmark>, ApiError> {
        Ok(self.tables.lock().owned(id, owner_id).cloned())
    }

    async fn save_bookmark(&self, draft: BookmarkDraft) -> Result<Bookmark, ApiError> {
        draft.validate()?;

        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&draft.user_id) {
            return Err(ApiError::internal("Bookmark owner does not exist"));
        }

        let id = match draft.id {
            Some(id) => {
                if tables.owned(id, draft.user_id).is_none() {
                    return Err(ApiError::not_found("Bookmark not found"));
                }
                id
            }
            None => {
                tables.bookmark_seq += 1;
                tables.bookmark_seq
            }
        };

        let bookmark = Bookmark {
            id,
            url: draft.url,
            description: draft.description,
            user_id: draft.user_id,
        };
        tables.bookmarks.insert(id, bookmark.clone());
        Ok(bookmark)
    }

    async fn update_bookmark(
        &self,
        id: i32,
        owner_id: i32,
        patch: BookmarkPatch,
    ) -> Result<Option<Bookmark>, ApiError> {
        let mut tables = self.tables.lock();
        let Some(existing) = tables.owned(id, owner_id).cloned() else {
            return Ok(None);
        };

        let draft = existing.merge(patch)?;
        let bookmark = Bookmark {
            id,
            url: draft.url,
            description: draft.description,
            user_id: owner_id,
        };
        tables.bookmarks.insert(id, bookmark.clone());
        Ok(Some(bookmark))
    }

    async fn delete_bookmark(&self, id: i32, owner_id: i32) -> Result<Option<Bookmark>, ApiError> {
        let mut tables = self.tables.lock();
        if tables.owned(id, owner_id).is_none() {
            return Ok(None);
        }
        Ok(tables.bookmarks.remove(&id))
    }
}
