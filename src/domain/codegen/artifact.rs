//! Generated code artifacts and their persisted manifest.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

use crate::domain::foundation::{ArtifactId, ConversationId, ServiceId, Timestamp};

/// Blob key for one generated file: `{service_id}/{artifact_id}/{filename}`.
pub fn blob_key(service_id: ServiceId, artifact_id: ArtifactId, filename: &str) -> String {
    format!("{}/{}/{}", service_id, artifact_id, filename)
}

/// True when `path` is a non-empty relative path made only of plain
/// components: no root, no `.` or `..`.
pub fn is_contained_path(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// One generation's files for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArtifactSet {
    pub id: ArtifactId,
    pub service_id: ServiceId,
    pub files: IndexMap<String, String>,
    pub created_at: Timestamp,
}

impl CodeArtifactSet {
    /// First filename that cannot be stored under its blob key, if any.
    pub fn find_unsafe_filename(files: &IndexMap<String, String>) -> Option<&str> {
        files
            .keys()
            .map(String::as_str)
            .find(|name| !is_contained_path(name))
    }

    pub fn new(service_id: ServiceId, files: IndexMap<String, String>) -> Self {
        Self {
            id: ArtifactId::new(),
            service_id,
            files,
            created_at: Timestamp::now(),
        }
    }

    /// Describes where each file lives in the blob store.
    pub fn manifest(&self, conversation_id: Option<ConversationId>) -> ArtifactManifest {
        let blob_keys = self
            .files
            .keys()
            .map(|name| (name.clone(), blob_key(self.service_id, self.id, name)))
            .collect();
        let total_lines = self
            .files
            .values()
            .map(|content| content.lines().count())
            .sum();

        ArtifactManifest {
            artifact_id: self.id,
            service_id: self.service_id,
            conversation_id,
            blob_keys,
            file_count: self.files.len(),
            total_lines,
            created_at: self.created_at,
        }
    }
}

/// Metadata record for an artifact set. File bodies live in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub artifact_id: ArtifactId,
    pub service_id: ServiceId,
    pub conversation_id: Option<ConversationId>,
    /// filename -> blob key, in generation order.
    pub blob_keys: IndexMap<String, String>,
    pub file_count: usize,
    pub total_lines: usize,
    pub created_at: Timestamp,
}
