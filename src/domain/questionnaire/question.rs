//! A single questionnaire entry.

use serde::Serialize;

use crate::domain::foundation::ValidationError;

/// One question in the service questionnaire.
///
/// # Invariants
///
/// - `step` is 1-based and matches the question's position in its catalog
/// - `field` is non-empty and unique within the catalog
/// - `options` is ordered and non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub step: usize,
    pub prompt: String,
    pub field: String,
    pub options: Vec<String>,
    pub multi_select: bool,
}

impl Question {
    /// Builds a question, validating its field key and options.
    pub fn new(
        step: usize,
        prompt: impl Into<String>,
        field: impl Into<String>,
        options: &[&str],
        multi_select: bool,
    ) -> Result<Self, ValidationError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(ValidationError::empty_field("field"));
        }
        if options.is_empty() {
            return Err(ValidationError::empty_field(format!("{}.options", field)));
        }
        Ok(Self {
            step,
            prompt: prompt.into(),
            field,
            options: options.iter().map(|o| o.to_string()).collect(),
            multi_select,
        })
    }
}
