// src/notifications/mod.rs - Canned quick messages and their delivery channel
pub mod notification_manager;
pub mod telegram_notifier;

use serde::{Deserialize, Serialize};

pub use notification_manager::NotificationManager;
pub use telegram_notifier::TelegramNotifier;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageTemplate {
    #[default]
    UpdateHotspotReport,
    RequestPatrol,
    StopObstructed,
}

impl MessageTemplate {
    pub const ALL: [MessageTemplate; 3] = [
        MessageTemplate::UpdateHotspotReport,
        MessageTemplate::RequestPatrol,
        MessageTemplate::StopObstructed,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            MessageTemplate::UpdateHotspotReport => "City administration: update hotspot report",
            MessageTemplate::RequestPatrol => "Police: request additional patrol in the area",
            MessageTemplate::StopObstructed => "Transit operator: stop obstructed by scooters",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            MessageTemplate::UpdateHotspotReport => MessageTemplate::RequestPatrol,
            MessageTemplate::RequestPatrol => MessageTemplate::StopObstructed,
            MessageTemplate::StopObstructed => MessageTemplate::UpdateHotspotReport,
        }
    }
}
