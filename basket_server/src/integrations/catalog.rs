use basket_engine::{CatalogError, ProductCatalog, ProductInfo, VariantInfo};
use catalog_client::CatalogApi;
use log::trace;

/// [`ProductCatalog`] implementation backed by the catalog service's REST API.
#[derive(Clone)]
pub struct CatalogProducts {
    api: CatalogApi,
}

impl CatalogProducts {
    pub fn new(api: CatalogApi) -> Self {
        Self { api }
    }
}

impl ProductCatalog for CatalogProducts {
    async fn product(&self, product_id: &str) -> Result<ProductInfo, CatalogError> {
        let product = self.api.product(product_id).await.map_err(|e| match e.status() {
            Some(404) => CatalogError::NotFound(product_id.to_string()),
            _ => CatalogError::Unavailable(e.to_string()),
        })?;
        trace!("🛒️ Catalog returned product {} with {} variants", product.id, product.product_variants.len());
        Ok(ProductInfo {
            id: product.id,
            name: product.name,
            product_variants: product
                .product_variants
                .into_iter()
                .map(|v| VariantInfo { id: v.id, price: v.price })
                .collect(),
            images: product.images,
        })
    }
}
