//! Adapters wiring the outbound HTTP clients into the engine's collaborator traits.
mod catalog;
mod users;

pub use catalog::CatalogProducts;
pub use users::RemoteAuth;
