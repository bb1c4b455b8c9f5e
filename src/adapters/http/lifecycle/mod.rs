//! Lifecycle test HTTP adapter.

pub mod dto;
mod handlers;
mod routes;

pub use routes::lifecycle_routes;
