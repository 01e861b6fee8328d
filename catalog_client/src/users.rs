use std::sync::Arc;

use log::*;
use reqwest::Client;

use crate::{config::UsersConfig, data_objects::UserRecord, CatalogClientError};

/// Client for the users service. The gateway only ever asks it one question: who does this token belong to?
#[derive(Clone)]
pub struct UsersApi {
    config: UsersConfig,
    client: Arc<Client>,
}

impl UsersApi {
    pub fn new(config: UsersConfig) -> Result<Self, CatalogClientError> {
        let client = Client::builder().build().map_err(|e| CatalogClientError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Resolves the `{id, role}` pair for the given bearer token by forwarding it to the users service.
    pub async fn profile(&self, auth_token: &str) -> Result<UserRecord, CatalogClientError> {
        let url = format!("{}/auth/profile", self.config.base_url);
        trace!("Resolving user profile via {url}");
        let response = self
            .client
            .get(url)
            .header("Authorization", auth_token)
            .send()
            .await
            .map_err(|e| CatalogClientError::ResponseError(e.to_string()))?;
        if response.status().is_success() {
            response.json::<UserRecord>().await.map_err(|e| CatalogClientError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| CatalogClientError::ResponseError(e.to_string()))?;
            debug!("User profile resolution failed with status {status}");
            Err(CatalogClientError::QueryError { status, message })
        }
    }
}
