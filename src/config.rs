use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use thiserror::Error as ThisError;

/// Environment variables recognised by [`Config::from_env`].
const ENV_KEYS: &[&str] = &[
    "database_url",
    "jwt_secret",
    "bind_host",
    "port",
    "allowed_origin",
    "loglevel",
    "owner_username",
    "owner_password",
    "password_time_cost",
    "token_ttl_secs",
];

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingJwtSecret,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_host: IpAddr,
    pub port: u16,
    /// Single cross-origin caller allowed to reach the API. No CORS layer when unset.
    pub allowed_origin: Option<String>,
    pub loglevel: String,
    /// Built-in account created on first start.
    pub owner_username: String,
    pub owner_password: String,
    /// Argon2 iteration count used when hashing the built-in account secret.
    pub password_time_cost: u32,
    pub token_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:sylva.db".to_string(),
            jwt_secret: String::new(),
            bind_host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            allowed_origin: None,
            loglevel: "info".to_string(),
            owner_username: "owner".to_string(),
            owner_password: "sylva123".to_string(),
            password_time_cost: 2,
            token_ttl_secs: 3600,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(ENV_KEYS))
    }

    /// Load from process environment on top of the built-in defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let cfg: Config = figment.extract().map_err(Box::new)?;
        if cfg.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(cfg)
    }
}
