//! Named queries over the `bookmarks` table.
//!
//! Every lookup that starts from a bookmark id also filters on the owner, so a
//! bookmark belonging to someone else is indistinguishable from a missing one.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::bookmarks;
use crate::models::bookmark::{Bookmark, NewBookmark, UpdateBookmark};

pub async fn find_by_owner(
    conn: &mut AsyncPgConnection,
    owner_id: i32,
) -> QueryResult<Vec<Bookmark>> {
    bookmarks::table
        .filter(bookmarks::user_id.eq(owner_id))
        .select(Bookmark::as_select())
        .load(conn)
        .await
}

pub async fn find_by_id_and_owner(
    conn: &mut AsyncPgConnection,
    id: i32,
    owner_id: i32,
) -> QueryResult<Option<Bookmark>> {
    bookmarks::table
        .filter(bookmarks::id.eq(id))
        .filter(bookmarks::user_id.eq(owner_id))
        .select(Bookmark::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn insert(
    conn: &mut AsyncPgConnection,
    new_bookmark: &NewBookmark<'_>,
) -> QueryResult<Bookmark> {
    diesel::insert_into(bookmarks::table)
        .values(new_bookmark)
        .returning(Bookmark::as_returning())
        .get_result(conn)
        .await
}

pub async fn update(
    conn: &mut AsyncPgConnection,
    id: i32,
    owner_id: i32,
    changes: &UpdateBookmark<'_>,
) -> QueryResult<Option<Bookmark>> {
    diesel::update(
        bookmarks::table
            .filter(bookmarks::id.eq(id))
            .filter(bookmarks::user_id.eq(owner_id)),
    )
    .set(changes)
    .returning(Bookmark::as_returning())
    .get_result(conn)
    .await
    .optional()
}

pub async fn delete(conn: &mut AsyncPgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(bookmarks::table.find(id)).execute(conn).await
}
