//! Interface contracts between the basket engine and its collaborators.
//!
//! [`BasketStore`] is the persistence boundary. It is plain CRUD: all diffing intelligence lives in the
//! [`crate::BasketApi`], and backends only need to honour the unique (basket, product, variant) constraint.
//!
//! [`ProductCatalog`] is the outbound catalog collaborator. The engine consults it to snapshot unit prices when a
//! line is created, and to enrich basket views with live product details.
mod basket_store;
mod product_catalog;

pub use basket_store::{BasketStore, InsertLineResult};
pub use product_catalog::{CatalogError, ProductCatalog, ProductInfo, VariantInfo};
