//! HTTP clients for the basket gateway's external collaborators.
//!
//! [`CatalogApi`] talks to the product catalog service (product and variant price lookups);
//! [`UsersApi`] resolves an authorization context from a bearer token via the users service.
//! Both are plain REST clients; the engine never depends on this crate. The server adapts these clients to the
//! engine's collaborator traits.
mod api;
mod config;
mod data_objects;
mod error;
mod users;

pub use api::CatalogApi;
pub use config::{CatalogConfig, UsersConfig};
pub use data_objects::{Product, ProductVariant, UserRecord};
pub use error::CatalogClientError;
pub use users::UsersApi;
