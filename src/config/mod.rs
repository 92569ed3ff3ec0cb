use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Some(StoreBackend::Memory),
            "postgres" | "postgresql" | "pg" => Some(StoreBackend::Postgres),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Full connection URL. When absent the URL is assembled from the POSTGRES_* parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub name: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// Restrict GET /api/contacts to contacts tagged with the caller's username
    pub scope_contacts_to_user: bool,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Accounts loaded into the in-memory user directory
    pub users: Vec<SeedUser>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("CONTACTS_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|v| v.parse().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("STATIC_DIR") {
            self.server.static_dir = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_BACKEND") {
            self.database.backend = StoreBackend::parse(&v).unwrap_or(self.database.backend);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("POSTGRES_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("POSTGRES_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("POSTGRES_USER") {
            self.database.user = Some(v);
        }
        if let Ok(v) = env::var("POSTGRES_DB") {
            self.database.name = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging = v.parse().unwrap_or(self.database.enable_query_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET").or_else(|_| env::var("SECRET")) {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_SCOPE_CONTACTS_TO_USER") {
            self.security.scope_contacts_to_user = v.parse().unwrap_or(self.security.scope_contacts_to_user);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Seed overrides
        if let Ok(v) = env::var("CONTACTS_USERS") {
            self.seed.users = parse_seed_users(&v);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                static_dir: "public".to_string(),
            },
            database: DatabaseConfig {
                backend: StoreBackend::Memory,
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                user: None,
                name: None,
                max_connections: 5,
                connection_timeout: 30,
                enable_query_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: "development-secret".to_string(),
                jwt_expiry_hours: 24,
                scope_contacts_to_user: false,
                enable_cors: true,
                cors_origins: vec![],
            },
            seed: SeedConfig {
                users: vec![SeedUser {
                    username: "admin".to_string(),
                    password: "admin".to_string(),
                }],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                static_dir: "public".to_string(),
            },
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                user: None,
                name: None,
                max_connections: 10,
                connection_timeout: 10,
                enable_query_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                scope_contacts_to_user: false,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            seed: SeedConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                static_dir: "public".to_string(),
            },
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                user: None,
                name: None,
                max_connections: 20,
                connection_timeout: 5,
                enable_query_logging: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                scope_contacts_to_user: false,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            seed: SeedConfig::default(),
        }
    }
}

/// Parses `name:password,name:password`. Entries without a colon are skipped.
fn parse_seed_users(raw: &str) -> Vec<SeedUser> {
    raw.split(',')
        .filter_map(|entry| {
            let (username, password) = entry.trim().split_once(':')?;
            if username.is_empty() {
                return None;
            }
            Some(SeedUser {
                username: username.to_string(),
                password: password.to_string(),
            })
        })
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database.backend, StoreBackend::Memory);
        assert_eq!(config.security.jwt_expiry_hours, 24);
        assert!(!config.security.jwt_secret.is_empty());
        assert!(!config.security.scope_contacts_to_user);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.backend, StoreBackend::Postgres);
        assert!(config.security.jwt_secret.is_empty());
        assert!(!config.database.enable_query_logging);
    }

    #[test]
    fn parses_seed_users() {
        let users = parse_seed_users("alice:secret, bob:hunter2,broken,:nope");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].password, "secret");
        assert_eq!(users[1].username, "bob");
    }

    #[test]
    fn parses_store_backend_names() {
        assert_eq!(StoreBackend::parse("Postgres"), Some(StoreBackend::Postgres));
        assert_eq!(StoreBackend::parse("pg"), Some(StoreBackend::Postgres));
        assert_eq!(StoreBackend::parse("memory"), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse("mongo"), None);
    }
}
