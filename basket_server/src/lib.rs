//! # Basket gateway
//! This crate hosts the HTTP surface of the basket service. It is responsible for:
//! Accepting basket lifecycle requests (create, view, update, clear, delete).
//! Translating request bodies into reconciliation calls on the engine.
//! Resolving `Authorization` headers against the users service for the endpoints that need it.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `POST /baskets`: Create a new basket, optionally tied to a user.
//! * `GET /baskets/{id}`: Fetch the priced, catalog enriched view of a basket.
//! * `PUT /baskets/{id}`: Reconcile the basket towards the desired state in the request body.
//! * `GET /baskets/{id}/clear`: Remove every line from the basket.
//! * `DELETE /baskets/{id}`: Delete the basket. Owner or admin only.

pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
