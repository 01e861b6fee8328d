//! The public basket API: reconciliation, aggregation and lifecycle operations over a [`crate::traits::BasketStore`]
//! backend and a [`crate::traits::ProductCatalog`] collaborator.
pub mod api;
pub mod basket_objects;
pub mod errors;
pub mod reconcile;
