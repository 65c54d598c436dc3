mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EmailBackend};
pub use repos::*;
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AgendaContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
}

impl AgendaContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(database_url) => Repos::create_postgres(database_url).await?,
            None => {
                warn!("Did not find DATABASE_URL environment variable. Going to use the in-memory storage, nothing will be persisted.");
                Repos::create_inmemory()
            }
        };
        let mailer = create_mailer(&config)?;
        info!(
            "Using {:?} email backend and time zone {}",
            config.email_backend, config.time_zone
        );

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer,
        })
    }

    /// Context with in-memory storage, used by tests
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::from_vars(&Default::default()),
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(InMemoryMailer::new()),
        }
    }

    /// Name and engine of the storage backend in use
    pub fn storage_description(&self) -> (&'static str, &'static str) {
        match self.config.database_url {
            Some(_) => ("postgres", "sqlx::postgres"),
            None => ("memory", "in-memory"),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<AgendaContext> {
    AgendaContext::create(Config::new()).await
}
