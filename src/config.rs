//! Service settings. Database URL precedence: explicit value, then `DATABASE_URL`, then a placeholder.

use crate::error::StartupError;

/// Fallback used when nothing else is configured. Carries no credentials.
pub const PLACEHOLDER_DATABASE_URL: &str = "postgres://localhost/campaigns";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn resolve(explicit_database_url: Option<String>) -> Result<Self, StartupError> {
        Self::resolve_with(explicit_database_url, |key| std::env::var(key).ok())
    }

    /// Resolve settings with a custom variable lookup. Empty values count as unset.
    pub fn resolve_with<F>(explicit_database_url: Option<String>, lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = explicit_database_url
            .filter(|v| !v.trim().is_empty())
            .or_else(|| var("DATABASE_URL"))
            .unwrap_or_else(|| {
                tracing::warn!("DATABASE_URL not set, using placeholder {}", PLACEHOLDER_DATABASE_URL);
                PLACEHOLDER_DATABASE_URL.to_string()
            });
        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| StartupError::Config(format!("invalid DB_MAX_CONNECTIONS: {}", raw)))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}
