//! Engine configuration read from the environment.
//!
//! `.env.local` and `.env` are loaded by `main` before this runs, so values
//! from those files show up here as ordinary environment variables.

use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CHARACTER_FILE: &str = "character.json";

/// Runtime settings for the HTTP server and exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Where `POST /api/characters/export` writes the homebrew document.
    pub character_file: PathBuf,
    /// Comma-separated origins, or `*`. CORS is disabled when unset.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            character_file: PathBuf::from(DEFAULT_CHARACTER_FILE),
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|port| match port.trim().parse() {
                Ok(port) => Some(port),
                Err(e) => {
                    tracing::warn!(port = %port, error = %e, "Invalid server port, using default");
                    None
                }
            })
            .unwrap_or(defaults.server_port);
        let character_file = lookup("CHARACTER_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.character_file);
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            server_host,
            server_port,
            character_file,
            cors_allowed_origins,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
