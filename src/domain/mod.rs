//! Domain layer - pure, strongly typed values and rules.

pub mod codegen;
pub mod conversation;
pub mod foundation;
pub mod lifecycle;
pub mod questionnaire;
pub mod service;
