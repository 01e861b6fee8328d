use bg_common::Cents;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInfo {
    pub id: String,
    pub price: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub product_variants: Vec<VariantInfo>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductInfo {
    /// The current catalog price for the given variant, if the product has it.
    pub fn variant_price(&self, variant_id: &str) -> Option<Cents> {
        self.product_variants.iter().find(|v| v.id == variant_id).map(|v| v.price)
    }
}

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Product {0} does not exist in the catalog")]
    NotFound(String),
    #[error("Catalog service unavailable: {0}")]
    Unavailable(String),
}

/// The external catalog collaborator. Implementations are HTTP clients in production and stubs in tests.
#[allow(async_fn_in_trait)]
pub trait ProductCatalog {
    async fn product(&self, product_id: &str) -> Result<ProductInfo, CatalogError>;
}
