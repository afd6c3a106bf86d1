pub mod in_memory;

use crate::core::errors::TaskboardError;
use crate::core::models::audit::AppLog;
use async_trait::async_trait;

/// Audit trail of mutating operations.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        group_id: Option<&str>,
        details: serde_json::Value,
    ) -> Result<(), TaskboardError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, TaskboardError>;
    async fn get_group_logs(&self, group_id: &str) -> Result<Vec<AppLog>, TaskboardError>;
}
