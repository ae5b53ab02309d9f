//! Standalone migration runner for bookmarks-api.
//!
//! Usage:
//!   cargo run -p bookmarks-api --bin bookmarks-migrate
//!   cargo run -p bookmarks-api --bin bookmarks-migrate -- --test
//!   cargo run -p bookmarks-api --bin bookmarks-migrate -- --revert
//!
//! Reads DATABASE_URL from the environment (or .env via dotenvy).

use std::path::Path;

use bookmarks_api::config::with_test_db_suffix;
use bookmarks_api::db::migrations;

fn main() {
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    let mut database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL env var is required");

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--test") {
        database_url = with_test_db_suffix(&database_url);
    }

    if args.iter().any(|arg| arg == "--revert") {
        println!("Reverting all migrations...");
        let reverted = migrations::revert_all(&database_url).expect("failed to revert migrations");
        if reverted.is_empty() {
            println!("Nothing to revert.");
        } else {
            for migration in &reverted {
                println!("  Reverted: {migration}");
            }
            println!("{} migration(s) reverted.", reverted.len());
        }
        return;
    }

    println!("Running pending migrations...");
    let applied = migrations::run_pending(&database_url).expect("failed to run migrations");

    if applied.is_empty() {
        println!("No pending migrations.");
    } else {
        for migration in &applied {
            println!("  Applied: {migration}");
        }
        println!("{} migration(s) applied.", applied.len());
    }
}
