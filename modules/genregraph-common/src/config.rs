use std::env;

/// Connection settings loaded from environment variables.
///
/// Every field is explicit; nothing is read from process-wide state after
/// construction, and the struct is passed into the runner by the caller.
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_database: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            neo4j_uri: required_env("NEO4J_URI"),
            neo4j_database: env::var("NEO4J_DATABASE")
                .unwrap_or_else(|_| "neo4j".to_string()),
            neo4j_user: required_env("NEO4J_USER"),
            neo4j_password: required_env("NEO4J_PASSWORD"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
