use crate::core::errors::TaskboardError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        InMemoryLogging::default()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: &str,
        group_id: Option<&str>,
        details: serde_json::Value,
    ) -> Result<(), TaskboardError> {
        if !details.is_object() {
            return Err(TaskboardError::LoggingError(format!(
                "Audit details for {} must be a JSON object",
                action
            )));
        }
        let mut logs = self.logs.write().await;
        logs.push(AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            group_id: group_id.map(String::from),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, TaskboardError> {
        let logs = self.logs.read().await;
        Ok(logs.clone())
    }

    async fn get_group_logs(&self, group_id: &str) -> Result<Vec<AppLog>, TaskboardError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|log| log.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect())
    }
}
