//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a UUID-backed identifier with the usual constructors,
/// `Display` and `FromStr`.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// First eight characters, used in human-readable messages.
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a questionnaire conversation.
    ConversationId
);

uuid_id!(
    /// Unique identifier for a requested cloud service.
    ServiceId
);

uuid_id!(
    /// Unique identifier for one generated set of code files.
    ArtifactId
);

uuid_id!(
    /// Unique identifier for a persisted lifecycle test run.
    TestRunId
);

/// The acting principal that owns services and conversations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates a new OwnerId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("owner"));
        }
        Ok(Self(id))
    }

    /// The owner used when no principal is configured.
    pub fn anonymous() -> Self {
        Self("anonymous".to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_generates_unique_values() {
        let id1 = ConversationId::new();
        let id2 = ConversationId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn service_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: ServiceId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn service_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ServiceId>().is_err());
    }

    #[test]
    fn short_form_is_eight_hex_chars() {
        let id: ArtifactId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(id.short(), "550e8400");
    }

    #[test]
    fn test_run_id_serializes_to_json() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TestRunId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn owner_id_rejects_blank_string() {
        match OwnerId::new("  ") {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "owner"),
            other => panic!("Expected EmptyField error, got {:?}", other),
        }
    }

    #[test]
    fn owner_id_defaults_to_anonymous() {
        assert_eq!(OwnerId::anonymous().as_str(), "anonymous");
    }
}
