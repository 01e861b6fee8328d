use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::de::DeserializeOwned;

use crate::{config::CatalogConfig, data_objects::Product, CatalogClientError};

#[derive(Clone)]
pub struct CatalogApi {
    config: CatalogConfig,
    client: Arc<Client>,
}

impl CatalogApi {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogClientError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| CatalogClientError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogClientError> {
        let url = self.url(path);
        trace!("Sending catalog query: {url}");
        let response =
            self.client.get(url).send().await.map_err(|e| CatalogClientError::ResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("Catalog query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| CatalogClientError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| CatalogClientError::ResponseError(e.to_string()))?;
            Err(CatalogClientError::QueryError { status, message })
        }
    }

    /// Fetches a product together with its variants and their current prices.
    pub async fn product(&self, product_id: &str) -> Result<Product, CatalogClientError> {
        self.get_json(&format!("/products/{product_id}")).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }
}
