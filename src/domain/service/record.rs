//! ServiceRecord - the requested cloud service.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{OwnerId, ServiceId, Timestamp, ValidationError};

/// Lifecycle status of a service record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Requirements captured, no code yet.
    Created,
    /// At least one artifact set has been persisted.
    CodeGenerated,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::CodeGenerated => write!(f, "code_generated"),
        }
    }
}

/// A cloud service described by a completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: ServiceId,
    pub service_type: String,
    pub vendor: String,
    pub deployment_model: String,
    pub features: Vec<String>,
    pub sla: String,
    pub scalability: String,
    pub integration: String,
    pub owner: OwnerId,
    pub status: ServiceStatus,
    pub created_at: Timestamp,
}

impl ServiceRecord {
    /// Builds a record from questionnaire answers keyed by field.
    ///
    /// `service_type` is required. Other missing answers become "N/A".
    /// The `features` answer is split on commas, trimmed, de-duplicated
    /// and stripped of empty entries.
    pub fn from_answers(
        answers: &IndexMap<String, String>,
        owner: OwnerId,
    ) -> Result<Self, ValidationError> {
        let field = |key: &str| {
            answers
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "N/A".to_string())
        };

        let service_type = answers
            .get("service_type")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ValidationError::empty_field("service_type"))?
            .to_string();

        let mut features: Vec<String> = Vec::new();
        if let Some(raw) = answers.get("features") {
            for feature in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
                if !features.iter().any(|f| f == feature) {
                    features.push(feature.to_string());
                }
            }
        }

        Ok(Self {
            id: ServiceId::new(),
            service_type,
            vendor: field("vendor"),
            deployment_model: field("deployment_model"),
            features,
            sla: field("sla"),
            scalability: field("scalability"),
            integration: field("integration"),
            owner,
            status: ServiceStatus::Created,
            created_at: Timestamp::now(),
        })
    }

    pub fn mark_code_generated(&mut self) {
        self.status = ServiceStatus::CodeGenerated;
    }

    /// Lightweight view used by discovery.
    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            id: self.id,
            service_type: self.service_type.clone(),
            vendor: self.vendor.clone(),
            created_at: self.created_at,
        }
    }

    /// "vFirewall-550e8400", used in agent messages.
    pub fn label(&self) -> String {
        format!("{}-{}", self.service_type, self.id.short())
    }
}

/// Identity and headline attributes of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub id: ServiceId,
    pub service_type: String,
    pub vendor: String,
    pub created_at: Timestamp,
}
