use std::collections::HashMap;
use std::path::Path;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub secret_key: String,
    pub demo_users: String, // JSON object: username -> password
    pub access_token_expire_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize, // in bytes
}

impl Config {
    // Defaults, then `config/default.*` if present, then the environment
    // (`SECRET_KEY`, `DEMO_USERS`, `SERVER__PORT`, ...), which a `.env` file
    // in the working directory may populate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_env_file(Path::new(".env"))?;

        let builder = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::default().separator("__"));

        Self::from_builder(builder)
    }

    // Variables already set in the process win over the file. A missing file is fine.
    pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
        match dotenvy::from_path(path) {
            Ok(()) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(ConfigError::Foreign(Box::new(e))),
        }
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.max_body_size", 1024 * 1024)?
            .set_default("access_token_expire_minutes", 30)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;

        if config.secret_key.is_empty() {
            return Err(ConfigError::Message("secret_key must not be empty".into()));
        }
        if config.access_token_expire_minutes <= 0 {
            return Err(ConfigError::Message(
                "access_token_expire_minutes must be positive".into(),
            ));
        }

        Ok(config)
    }

    // Parses the static username/password table.
    pub fn credentials(&self) -> Result<HashMap<String, String>, serde_json::Error> {
        serde_json::from_str(&self.demo_users)
    }
}
