use crate::core::errors::TaskboardError;
use crate::core::models::notification::Notification;
use crate::infrastructure::notify::Notifier;
use async_trait::async_trait;
use log::info;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_OUTBOX_CAPACITY: usize = 1000;

/// Keeps the most recent messages in an outbox and logs each one; nothing
/// leaves the process. Once full, the oldest message is dropped.
#[derive(Clone)]
pub struct InMemoryNotifier {
    outbox: Arc<RwLock<VecDeque<Notification>>>,
    capacity: usize,
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        InMemoryNotifier::with_capacity(DEFAULT_OUTBOX_CAPACITY)
    }
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        InMemoryNotifier::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InMemoryNotifier {
            outbox: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn send(&self, notification: Notification) -> Result<(), TaskboardError> {
        info!(
            "Queued notification to {}: {}",
            notification.recipient, notification.subject
        );
        let mut outbox = self.outbox.write().await;
        if outbox.len() == self.capacity {
            outbox.pop_front();
        }
        outbox.push_back(notification);
        Ok(())
    }

    async fn outbox(&self) -> Result<Vec<Notification>, TaskboardError> {
        Ok(self.outbox.read().await.iter().cloned().collect())
    }
}
