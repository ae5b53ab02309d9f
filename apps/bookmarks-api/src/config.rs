/// Where bookmarks and users are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// PostgreSQL through a pooled async connection.
    Postgres { database_url: String, pool_size: usize },
    /// Process-local maps; data is lost on restart.
    Memory,
}

/// Bookmarks API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: Storage,
    /// Realm advertised in `WWW-Authenticate` challenges.
    pub auth_realm: String,
    /// Port the HTTP server binds to.
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Panics with a descriptive message if a required variable is missing or
    /// a value cannot be parsed.
    pub fn from_env() -> Self {
        let storage = match std::env::var("BOOKMARKS_STORAGE").as_deref() {
            Ok("memory") => Storage::Memory,
            Ok("postgres") | Err(_) => Storage::Postgres {
                database_url: required_var("DATABASE_URL"),
                pool_size: parsed_var("DATABASE_POOL_SIZE", 10),
            },
            Ok(other) => panic!("BOOKMARKS_STORAGE must be `postgres` or `memory`, got `{other}`"),
        };

        Self {
            storage,
            auth_realm: std::env::var("AUTH_REALM")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_REALM.to_string()),
            port: parsed_var("PORT", 8080),
        }
    }

    /// In-memory configuration used by tests and local experiments.
    pub fn memory() -> Self {
        Self {
            storage: Storage::Memory,
            auth_realm: DEFAULT_REALM.to_string(),
            port: 8080,
        }
    }
}

pub const DEFAULT_REALM: &str = "SECURITY REALM";

fn required_var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} env var is required"))
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{name} has an invalid value: `{value}`")),
        Err(_) => default,
    }
}

/// Point a connection string at the `<name>_test` database.
pub fn with_test_db_suffix(database_url: &str) -> String {
    let mut parts = database_url.splitn(2, '?');
    let base = parts.next().unwrap_or(database_url);
    let query = parts.next();

    let mut base_parts = base.rsplitn(2, '/');
    let db_name = base_parts.next().unwrap_or("");
    let prefix = base_parts.next().unwrap_or("");

    if db_name.is_empty() || db_name.ends_with("_test") {
        return database_url.to_string();
    }

    let mut updated = format!("{prefix}/{db_name}_test");
    if let Some(query) = query {
        updated.push('?');
        updated.push_str(query);
    }
    updated
}
