use super::{DeliveryError, IReminderDelivery};
use crate::TelegramConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Delivers reminders as Telegram messages through the Bot API, the owner id
/// being the chat id.
pub struct TelegramDelivery {
    client: Client,
    send_message_url: String,
}

impl TelegramDelivery {
    pub fn new(config: &TelegramConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            send_message_url: format!("{}/bot{}/sendMessage", config.api_url, config.bot_token),
        })
    }
}

#[async_trait::async_trait]
impl IReminderDelivery for TelegramDelivery {
    async fn send(&self, owner_id: i64, text: &str) -> Result<(), DeliveryError> {
        let res = self
            .client
            .post(&self.send_message_url)
            .json(&SendMessageRequest {
                chat_id: owner_id,
                text,
            })
            .send()
            .await
            .map_err(|e| {
                // The url holds the bot token
                let e = e.without_url();
                error!(
                    "[Network Error] Telegram sendMessage error. Error message: {:?}",
                    e
                );
                e
            })?;

        let status = res.status();
        let body = res.json::<SendMessageResponse>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Telegram sendMessage error. Error message: {:?}",
                e
            );
            e.without_url()
        })?;

        if !status.is_success() || !body.ok {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: body.description.unwrap_or_default(),
            });
        }

        Ok(())
    }
}
