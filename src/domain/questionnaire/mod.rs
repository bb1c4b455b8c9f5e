//! Questionnaire module.
//!
//! The fixed, ordered set of questions a user answers to describe
//! the cloud service they want generated.

mod catalog;
mod question;

pub use catalog::QuestionCatalog;
pub use question::Question;
