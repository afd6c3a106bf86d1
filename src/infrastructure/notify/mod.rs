pub mod in_memory;

use crate::core::errors::TaskboardError;
use crate::core::models::notification::Notification;
use async_trait::async_trait;

/// Delivery of completion notices and deadline reminders.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), TaskboardError>;
    async fn outbox(&self) -> Result<Vec<Notification>, TaskboardError>;
}
