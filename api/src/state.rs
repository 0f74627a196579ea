use sea_orm::DatabaseConnection;
use services::oauth::{CmuOAuthClient, OAuthError};
use services::session::SessionSigner;
use util::config::AppConfig;
use util::ws::Hub;

/// Shared handles passed to every handler. Built once at startup from `AppConfig`.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    hub: Hub,
    oauth: CmuOAuthClient,
    signer: SessionSigner,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Result<Self, OAuthError> {
        Ok(Self {
            db,
            hub: Hub::default(),
            oauth: CmuOAuthClient::new(&config.oauth)?,
            signer: SessionSigner::new(&config.jwt_secret, config.jwt_duration_minutes),
        })
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn oauth(&self) -> &CmuOAuthClient {
        &self.oauth
    }

    pub fn signer(&self) -> &SessionSigner {
        &self.signer
    }
}
