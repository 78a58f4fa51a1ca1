mod claims;
mod config;
mod repos;
mod services;
mod system;

pub use claims::{InFlightReminders, ReminderClaim};
pub use config::{Config, EmailConfig};
pub use repos::{IEventRepo, IReminderRepo, IUserRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, StaticTimeSys};
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email: Arc<dyn IEmailGateway>,
    /// Shared by every cycle started from this context
    pub in_flight: Arc<InFlightReminders>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl ReminderContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!("DATABASE_URL env var not set, reminders are only kept in memory.");
                Repos::create_inmemory()
            }
        };
        let config = Config::new();
        let email = Arc::new(ResendEmailGateway::new(config.email.clone()));
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            email,
            in_flight: Arc::new(InFlightReminders::new()),
        })
    }

    /// Context with inmemory repositories and default configuration.
    /// The email gateway is the real one, tests usually replace it.
    pub fn create_inmemory() -> Self {
        let config = Config::default();
        let email = Arc::new(ResendEmailGateway::new(config.email.clone()));
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            email,
            in_flight: Arc::new(InFlightReminders::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(ContextParams {
        postgres_connection_string: std::env::var("DATABASE_URL").ok(),
    })
    .await
}
