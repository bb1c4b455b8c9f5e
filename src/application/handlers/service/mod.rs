//! Service record query handlers.

mod list_services;

pub use list_services::ListServicesHandler;
