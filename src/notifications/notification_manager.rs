// src/notifications/notification_manager.rs
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::notifications::telegram_notifier::TelegramNotifier;
use crate::notifications::MessageTemplate;
use crate::roles::Role;

/// Fire-and-forget front for the delivery channel. Callers never wait on the
/// outcome; failures are only logged.
#[derive(Debug, Clone)]
pub struct NotificationManager {
    telegram: Arc<TelegramNotifier>,
}

impl NotificationManager {
    pub fn new(telegram: TelegramNotifier) -> Self {
        Self {
            telegram: Arc::new(telegram),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.telegram.is_enabled()
    }

    /// Spawns the send on the current tokio runtime and returns immediately.
    pub fn dispatch(&self, template: MessageTemplate, sender: Role) -> JoinHandle<()> {
        info!("📢 Dispatching '{}' from {}", template.text(), sender.label());
        let telegram = Arc::clone(&self.telegram);

        tokio::spawn(async move {
            if let Err(e) = telegram.send_template(template, sender).await {
                error!("📱 Notification '{}' failed: {}", template.text(), e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_completes_when_disabled() {
        let manager = NotificationManager::new(TelegramNotifier::new(None, None));
        assert!(!manager.is_enabled());
        let handle = manager.dispatch(MessageTemplate::UpdateHotspotReport, Role::CityAdministration);
        assert!(handle.await.is_ok());
    }
}
