use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;

use crate::config::Config;
use crate::models::{Task, User};
use crate::services::{
    Clock, CredentialVerifier, MemoryStore, StaticCredentials, Store, SystemClock, TokenService,
};

// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn Store<User>>,
    pub tasks: Arc<dyn Store<Task>>,
    pub tokens: Arc<TokenService>,
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    // Fresh, empty stores sharing `clock` with the token service
    pub fn new(
        tokens: TokenService,
        credentials: impl CredentialVerifier + 'static,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users: Arc::new(MemoryStore::<User>::with_clock(clock.clone())),
            tasks: Arc::new(MemoryStore::<Task>::with_clock(clock)),
            tokens: Arc::new(tokens),
            credentials: Arc::new(credentials),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let credentials = config
            .credentials()
            .context("DEMO_USERS must be a JSON object of username to password")?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let tokens = TokenService::new(
            &config.secret_key,
            Duration::minutes(config.access_token_expire_minutes),
            clock.clone(),
        );

        tracing::info!("Loaded {} demo credential(s)", credentials.len());
        Ok(Self::new(tokens, StaticCredentials::new(credentials), clock))
    }
}
