pub mod bookmarks;
pub mod memory;
pub mod migrations;
pub mod pg;
pub mod pool;
pub mod schema;
pub mod store;
pub mod users;
