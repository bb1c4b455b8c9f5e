//! Service module - records of requested cloud services.

mod record;

pub use record::{ServiceRecord, ServiceStatus, ServiceSummary};
