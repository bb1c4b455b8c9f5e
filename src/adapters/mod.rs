//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - text generators (Anthropic, mock)
//! - `http` - axum REST surface
//! - `storage` - record and blob stores (in-memory, file)

pub mod ai;
pub mod http;
pub mod storage;
