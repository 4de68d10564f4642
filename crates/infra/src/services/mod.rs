mod telegram;

pub use telegram::TelegramDelivery;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Unable to reach the messaging provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("The messaging provider rejected the message with status {status}: {description}")]
    Rejected { status: u16, description: String },
}

/// Sends reminder notifications to their owners
#[async_trait::async_trait]
pub trait IReminderDelivery: Send + Sync {
    async fn send(&self, owner_id: i64, text: &str) -> Result<(), DeliveryError>;
}

/// Delivery that only writes the notification to the log. Used when no
/// messaging provider is configured.
pub struct LogDelivery;

#[async_trait::async_trait]
impl IReminderDelivery for LogDelivery {
    async fn send(&self, owner_id: i64, text: &str) -> Result<(), DeliveryError> {
        info!(owner_id, "Reminder notification: {}", text);
        Ok(())
    }
}
