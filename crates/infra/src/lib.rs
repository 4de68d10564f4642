mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, TelegramConfig};
pub use repos::Repos;
pub use repos::{DeleteResult, IReminderRepo};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::PgPool;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub delivery: Arc<dyn IReminderDelivery>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl ReminderContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new();

        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!("Did not find DATABASE_URL environment variable. Reminders will only be stored in memory.");
                Repos::create_inmemory()
            }
        };

        let delivery: Arc<dyn IReminderDelivery> = match &config.telegram {
            Some(telegram) => Arc::new(TelegramDelivery::new(telegram)?),
            None => {
                warn!("Did not find TELEGRAM_BOT_TOKEN environment variable. Reminders will only be logged.");
                Arc::new(LogDelivery)
            }
        };

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            delivery,
        })
    }

    /// Context with inmemory repositories and a delivery that only logs, used for testing
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            delivery: Arc::new(LogDelivery),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}

pub async fn run_migration(pool: &PgPool) -> Result<(), MigrateError> {
    info!("Running database migrations");
    sqlx::migrate!().run(pool).await
}
