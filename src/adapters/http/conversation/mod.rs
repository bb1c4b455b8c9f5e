//! Conversation HTTP adapter - questionnaire and code generation endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::conversation_routes;
