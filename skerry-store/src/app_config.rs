use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Bounded retry count for transient serialization conflicts before
    /// the failure surfaces to the caller.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// The known ports. Configuration data, not an enum: adding a port is
    /// a config change.
    #[serde(default = "default_departure_locations")]
    pub departure_locations: Vec<String>,
}

fn default_max_retries() -> u32 {
    3
}

fn default_departure_locations() -> Vec<String> {
    vec!["A".to_string(), "B".to_string()]
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SKERRY__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("SKERRY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
