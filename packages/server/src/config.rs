use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deployment environment. `production` turns on `Secure; SameSite=None` cookies.
    pub environment: String,
    pub cors: CorsConfig,
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// Storage backend behind the repositories.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    /// In-process collections. Data is lost on restart.
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued session tokens. Default: 72.
    pub token_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("BLOG_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        Self::builder()?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., BLOG__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("BLOG").separator("__"))
            // Hosting platforms hand out the listening port as a bare PORT variable
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.environment", "development")?
            .set_default(
                "server.cors.allow_origins",
                vec!["http://localhost:5173", "http://localhost:5174"],
            )?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.backend", "mongo")?
            .set_default("database.url", "mongodb://127.0.0.1:27017")?
            .set_default("database.name", "furryFriendsDB")?
            .set_default("auth.token_ttl_hours", 72)
    }
}
