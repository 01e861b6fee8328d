use std::env;

const DEFAULT_CATALOG_URL: &str = "http://localhost:8380";
const DEFAULT_USERS_URL: &str = "http://localhost:8390";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base url of the catalog service, e.g. "http://catalog.internal:8080"
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_CATALOG_URL.to_string() }
    }
}

impl CatalogConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn from_env_or_default() -> Self {
        env::var("BG_CATALOG_URL").map(Self::new).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct UsersConfig {
    pub base_url: String,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_USERS_URL.to_string() }
    }
}

impl UsersConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn from_env_or_default() -> Self {
        env::var("BG_USERS_URL").map(Self::new).unwrap_or_default()
    }
}
