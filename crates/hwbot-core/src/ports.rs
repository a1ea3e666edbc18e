use async_trait::async_trait;

use crate::{domain::Timestamp, Result};

/// Hexagonal port for the upstream homework-status service.
///
/// Implementations return the answer as untyped JSON; shape checks live in
/// [`crate::homework`].
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch homeworks whose status changed since `from_date` (Unix seconds).
    async fn fetch(&self, from_date: Timestamp) -> Result<serde_json::Value>;
}
