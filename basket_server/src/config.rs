use std::env;

use catalog_client::{CatalogConfig, UsersConfig};
use log::*;

const DEFAULT_BG_HOST: &str = "127.0.0.1";
const DEFAULT_BG_PORT: u16 = 8480;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/baskets.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Base url of the catalog collaborator (product and price lookups).
    pub catalog: CatalogConfig,
    /// Base url of the users collaborator (auth token resolution).
    pub users: UsersConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BG_HOST.to_string(),
            port: DEFAULT_BG_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            catalog: CatalogConfig::default(),
            users: UsersConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, database_url: &str) -> Self {
        Self {
            host: host.to_string(),
            port,
            database_url: database_url.to_string(),
            ..Default::default()
        }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("BG_HOST").unwrap_or_else(|_| {
            info!("BG_HOST is not set. Using the default.");
            DEFAULT_BG_HOST.into()
        });
        let port = env::var("BG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("{s} is not a valid port for BG_PORT. {e} Using the default.");
                    DEFAULT_BG_PORT
                })
            })
            .unwrap_or(DEFAULT_BG_PORT);
        let database_url = env::var("BG_DATABASE_URL").unwrap_or_else(|_| {
            warn!("BG_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.into()
        });
        Self {
            host,
            port,
            database_url,
            catalog: CatalogConfig::from_env_or_default(),
            users: UsersConfig::from_env_or_default(),
        }
    }
}
