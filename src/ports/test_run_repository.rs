//! TestRunRepository port.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::foundation::TestRunId;
use crate::domain::lifecycle::TestRun;

/// Storage for completed lifecycle test runs. Runs are written once.
#[async_trait]
pub trait TestRunRepository: Send + Sync {
    async fn save(&self, run: &TestRun) -> Result<(), StorageError>;

    async fn find(&self, id: TestRunId) -> Result<Option<TestRun>, StorageError>;
}
