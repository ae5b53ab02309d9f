//! Named queries over the `users` table.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::users;
use crate::models::user::{NewUser, User};

pub async fn find_all(conn: &mut AsyncPgConnection) -> QueryResult<Vec<User>> {
    users::table.select(User::as_select()).load(conn).await
}

/// Exact, case-sensitive match on both columns.
pub async fn find_by_username_and_password(
    conn: &mut AsyncPgConnection,
    username: &str,
    password: &str,
) -> QueryResult<Option<User>> {
    users::table
        .filter(users::username.eq(username))
        .filter(users::password.eq(password))
        .select(User::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn find_by_id(conn: &mut AsyncPgConnection, id: i32) -> QueryResult<Option<User>> {
    users::table
        .find(id)
        .select(User::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn find_by_username(
    conn: &mut AsyncPgConnection,
    username: &str,
) -> QueryResult<Option<User>> {
    users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn insert(conn: &mut AsyncPgConnection, new_user: &NewUser) -> QueryResult<User> {
    diesel::insert_into(users::table)
        .values(new_user)
        .returning(User::as_returning())
        .get_result(conn)
        .await
}

/// Bookmarks go with the user through `ON DELETE CASCADE`.
pub async fn delete(conn: &mut AsyncPgConnection, id: i32) -> QueryResult<usize> {
    diesel::delete(users::table.find(id)).execute(conn).await
}
