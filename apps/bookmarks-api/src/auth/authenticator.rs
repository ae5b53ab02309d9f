use crate::db::store::Store;
use crate::error::ApiError;
use crate::models::user::User;

/// Resolve a username/password pair to a user.
///
/// Comparison is exact and case-sensitive against the stored plaintext
/// password. A non-matching pair is `Ok(None)`; only a storage failure is an
/// error. The lookup is its own store call and so its own transaction.
pub async fn authenticate(
    store: &dyn Store,
    username: &str,
    password: &str,
) -> Result<Option<User>, ApiError> {
    let user = store.find_user_by_credentials(username, password).await?;

    match &user {
        Some(u) => tracing::debug!(user_id = u.id, "credentials accepted"),
        None => tracing::debug!(%username, "credentials rejected"),
    }

    Ok(user)
}
