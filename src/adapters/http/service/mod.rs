//! Service HTTP adapter - listing and artifact retrieval.

pub mod dto;
mod handlers;
mod routes;

pub use routes::service_routes;
