//! Runtime configuration, layered as: built-in defaults <- `ADVISING_*` env vars.
//!
//! Nested keys use `__` as separator, e.g. `ADVISING_IDENTITY__EMAIL_DOMAIN`.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "ADVISING_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IdentityConfig {
    /// JSON file standing in for the dashboard's local storage.
    pub storage_path: PathBuf,
    pub email_domain: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:advising.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            identity: IdentityConfig::default(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("advising-identity.json"),
            email_domain: "university.edu".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
