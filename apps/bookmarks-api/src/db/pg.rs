//! PostgreSQL-backed [`Store`], one database transaction per call.

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::AsyncConnection;
use scoped_futures::ScopedFutureExt;

use crate::db::pool::DbPool;
use crate::db::store::Store;
use crate::db::{bookmarks, users};
use crate::error::ApiError;
use crate::models::bookmark::{Bookmark, BookmarkDraft, BookmarkPatch, NewBookmark, UpdateBookmark};
use crate::models::user::{NewUser, User};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn username_conflict(err: DieselError) -> ApiError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ApiError::conflict("Username is already taken")
        }
        other => ApiError::from(other),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_all_users(&self) -> Result<Vec<User>, ApiError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move { Ok(users::find_all(conn).await?) }.scope_boxed()
        })
        .await
    }

    async fn find_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ApiError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move { Ok(users::find_by_username_and_password(conn, username, password).await?) }
                .scope_boxed()
        })
        .await
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move { Ok(users::find_by_id(conn, id).await?) }.scope_boxed()
        })
        .await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move { Ok(users::find_by_username(conn, username).await?) }.scope_boxed()
        })
        .await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, ApiError> {
        new_user.validate()?;

        let mut conn = self.pool.get().await?;
        let user = conn
            .transaction::<_, ApiError, _>(|conn| {
                async move { users::insert(conn, &new_user).await.map_err(username_conflict) }
                    .scope_boxed()
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "user created");
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, ApiError> {
        let mut conn = self.pool.get().await?;
        let deleted = conn
            .transaction::<_, ApiError, _>(|conn| {
                async move { Ok(users::delete(conn, id).await?) }.scope_boxed()
            })
            .await?;

        if deleted > 0 {
            tracing::info!(user_id = id, "user deleted");
        }
        Ok(deleted > 0)
    }

    async fn find_bookmarks_by_owner(&self, owner_id: i32) -> Result<Vec<Bookmark>, ApiError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move { Ok(bookmarks::find_by_owner(conn, owner_id).await?) }.scope_boxed()
        })
        .await
    }

    async fn find_bookmark(&self, id: i32, owner_id: i32) -> Result<Option<Bookmark>, ApiError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move { Ok(bookmarks::find_by_id_and_owner(conn, id, owner_id).await?) }
                .scope_boxed()
        })
        .await
    }

    async fn save_bookmark(&self, draft: BookmarkDraft) -> Result<Bookmark, ApiError> {
        draft.validate()?;

        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move {
                match draft.id {
                    None => Ok(bookmarks::insert(
                        conn,
                        &NewBookmark {
                            url: &draft.url,
                            description: draft.description.as_deref(),
                            user_id: draft.user_id,
                        },
                    )
                    .await?),
                    Some(id) => bookmarks::update(
                        conn,
                        id,
                        draft.user_id,
                        &UpdateBookmark {
                            url: &draft.url,
                            description: draft.description.as_deref(),
                        },
                    )
                    .await?
                    .ok_or_else(|| ApiError::not_found("Bookmark not found")),
                }
            }
            .scope_boxed()
        })
        .await
    }

    async fn update_bookmark(
        &self,
        id: i32,
        owner_id: i32,
        patch: BookmarkPatch,
    ) -> Result<Option<Bookmark>, ApiError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move {
                let Some(existing) = bookmarks::find_by_id_and_owner(conn, id, owner_id).await?
                else {
                    return Ok(None);
                };

                let draft = existing.merge(patch)?;

                Ok(bookmarks::update(
                    conn,
                    id,
                    owner_id,
                    &UpdateBookmark {
                        url: &draft.url,
                        description: draft.description.as_deref(),
                    },
                )
                .await?)
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete_bookmark(&self, id: i32, owner_id: i32) -> Result<Option<Bookmark>, ApiError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, ApiError, _>(|conn| {
            async move {
                let Some(existing) = bookmarks::find_by_id_and_owner(conn, id, owner_id).await?
                else {
                    return Ok(None);
                };

                bookmarks::delete(conn, existing.id).await?;
                Ok(Some(existing))
            }
            .scope_boxed()
        })
        .await
    }
}
