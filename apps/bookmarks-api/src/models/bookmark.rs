use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::schema::bookmarks;
use crate::error::FieldError;

pub const MAX_URL_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 2048;

/// A bookmark row from the database.
///
/// The owner is implied by the authenticated request and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bookmark {
    pub id: i32,
    pub url: String,
    pub description: Option<String>,
    #[serde(skip)]
    pub user_id: i32,
}

/// Insertable struct for creating a new bookmark.
#[derive(Debug, Insertable)]
#[diesel(table_name = bookmarks)]
pub struct NewBookmark<'a> {
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub user_id: i32,
}

/// Full replacement of the mutable columns; `None` clears the description.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = bookmarks)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateBookmark<'a> {
    pub url: &'a str,
    pub description: Option<&'a str>,
}

/// A bookmark about to be saved. Without an id it is inserted, with an id the
/// stored row with that id and owner is overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub id: Option<i32>,
    pub url: String,
    pub description: Option<String>,
    pub user_id: i32,
}

impl BookmarkDraft {
    pub fn new(user_id: i32, url: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            description,
            user_id,
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        validate_fields(Some(&self.url), self.description.as_deref())
    }
}

impl From<Bookmark> for BookmarkDraft {
    fn from(b: Bookmark) -> Self {
        Self {
            id: Some(b.id),
            url: b.url,
            description: b.description,
            user_id: b.user_id,
        }
    }
}

/// Partial update of a bookmark.
///
/// A member that is absent or `null` is `None` and leaves the stored value
/// untouched. Unknown members are ignored, so `id` and owner cannot be changed
/// through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BookmarkPatch {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Bookmark {
    /// Apply the supplied fields of `patch` and re-validate the result.
    pub fn merge(self, patch: BookmarkPatch) -> Result<BookmarkDraft, Vec<FieldError>> {
        let mut draft = BookmarkDraft::from(self);
        if let Some(url) = patch.url {
            draft.url = url;
        }
        if let Some(description) = patch.description {
            draft.description = Some(description);
        }
        draft.validate()?;
        Ok(draft)
    }
}

/// Check the bookmark column constraints. `url` is `None` when the client
/// omitted it or sent `null`.
pub fn validate_fields(
    url: Option<&str>,
    description: Option<&str>,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    match url {
        None => errors.push(FieldError::new("url", "URL is required")),
        Some(u) if u.is_empty() => errors.push(FieldError::new("url", "URL must not be empty")),
        Some(u) if u.chars().count() > MAX_URL_LEN => errors.push(FieldError::new(
            "url",
            format!("URL must be {MAX_URL_LEN} characters or fewer"),
        )),
        Some(_) => {}
    }

    if let Some(d) = description {
        if d.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(FieldError::new(
                "description",
                format!("Description must be {MAX_DESCRIPTION_LEN} characters or fewer"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
