//! User administration for bookmarks-api. There is no registration endpoint,
//! so accounts are seeded with this tool.
//!
//! Usage:
//!   cargo run -p bookmarks-api --bin bookmarks-users -- add <username> [--password <password>]
//!   cargo run -p bookmarks-api --bin bookmarks-users -- remove <username>
//!   cargo run -p bookmarks-api --bin bookmarks-users -- list
//!
//! Reads DATABASE_URL from the environment (or .env via dotenvy). Removing a
//! user also removes all of their bookmarks.

use std::path::Path;
use std::process::exit;

use bookmarks_api::config::{Config, Storage};
use bookmarks_api::db::store::Store;
use bookmarks_api::models::user::NewUser;
use bookmarks_api::AppState;

const USAGE: &str = "usage: bookmarks-users <add <username> [--password <password>] | remove <username> | list>";

#[tokio::main]
async fn main() {
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    let config = Config::from_env();
    if config.storage == Storage::Memory {
        eprintln!("bookmarks-users needs BOOKMARKS_STORAGE=postgres; in-memory users vanish on exit");
        exit(2);
    }

    let state = AppState::from_config(config);
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        Some("add") => add(state.store.as_ref(), &args[1..]).await,
        Some("remove") => remove(state.store.as_ref(), &args[1..]).await,
        Some("list") => list(state.store.as_ref()).await,
        _ => Err(USAGE.to_string()),
    };

    if let Err(message) = result {
        eprintln!("{message}");
        exit(1);
    }
}

async fn add(store: &dyn Store, args: &[String]) -> Result<(), String> {
    let username = args.first().ok_or(USAGE)?;

    let password = match args.iter().position(|a| a == "--password") {
        Some(i) => args.get(i + 1).cloned().ok_or(USAGE)?,
        None => rpassword::prompt_password_stdout("Password: ")
            .map_err(|e| format!("failed to read password: {e}"))?,
    };

    let user = store
        .create_user(NewUser::new(username.as_str(), password))
        .await
        .map_err(|e| describe(&e))?;

    println!("Created user {} (id {})", user.username, user.id);
    Ok(())
}

async fn remove(store: &dyn Store, args: &[String]) -> Result<(), String> {
    let username = args.first().ok_or(USAGE)?;

    let user = store
        .find_user_by_username(username)
        .await
        .map_err(|e| describe(&e))?
        .ok_or_else(|| format!("No user named {username}"))?;

    store.delete_user(user.id).await.map_err(|e| describe(&e))?;

    println!("Removed user {} and their bookmarks", user.username);
    Ok(())
}

async fn list(store: &dyn Store) -> Result<(), String> {
    let mut users = store.find_all_users().await.map_err(|e| describe(&e))?;
    users.sort_by_key(|u| u.id);

    for user in &users {
        let count = store
            .find_bookmarks_by_owner(user.id)
            .await
            .map_err(|e| describe(&e))?
            .len();
        println!("{:>6}  {:<32}  {count} bookmark(s)", user.id, user.username);
    }
    println!("{} user(s).", users.len());
    Ok(())
}

fn describe(err: &bookmarks_api::error::ApiError) -> String {
    match &err.details {
        Some(details) => details
            .iter()
            .map(|d| format!("{}: {}", d.field, d.message))
            .collect::<Vec<_>>()
            .join("\n"),
        None => err.message.clone(),
    }
}
