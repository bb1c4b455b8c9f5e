//! Response bodies for service endpoints.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::codegen::CodeArtifactSet;
use crate::domain::service::{ServiceRecord, ServiceStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub service_id: String,
    pub service_type: String,
    pub vendor: String,
    pub deployment_model: String,
    pub features: Vec<String>,
    pub sla: String,
    pub scalability: String,
    pub integration: String,
    pub owner: String,
    pub status: ServiceStatus,
    pub created_at: String,
}

impl From<ServiceRecord> for ServiceResponse {
    fn from(record: ServiceRecord) -> Self {
        Self {
            service_id: record.id.to_string(),
            service_type: record.service_type,
            vendor: record.vendor,
            deployment_model: record.deployment_model,
            features: record.features,
            sla: record.sla,
            scalability: record.scalability,
            integration: record.integration,
            owner: record.owner.to_string(),
            status: record.status,
            created_at: record.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceListResponse {
    pub services: Vec<ServiceResponse>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsResponse {
    pub artifact_id: String,
    pub service_id: String,
    pub created_at: String,
    pub file_count: usize,
    pub files: IndexMap<String, String>,
}

impl From<CodeArtifactSet> for ArtifactsResponse {
    fn from(set: CodeArtifactSet) -> Self {
        Self {
            artifact_id: set.id.to_string(),
            service_id: set.service_id.to_string(),
            created_at: set.created_at.to_string(),
            file_count: set.files.len(),
            files: set.files,
        }
    }
}
