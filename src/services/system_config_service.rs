use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::{
        domain::{
            system_config::{DEFAULT_REVENUE_SHARE, REVENUE_SHARE_PERCENTAGE},
            SystemConfig,
        },
        dto::request::UpsertSystemConfigRequest,
    },
    repositories::SystemConfigRepository,
};

pub struct SystemConfigService {
    repository: Arc<dyn SystemConfigRepository>,
}

impl SystemConfigService {
    pub fn new(repository: Arc<dyn SystemConfigRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<SystemConfig>> {
        self.repository.list_all().await
    }

    pub async fn upsert(&self, request: UpsertSystemConfigRequest) -> AppResult<SystemConfig> {
        request.validate()?;

        let config = self
            .repository
            .upsert(request.key.trim(), request.value)
            .await?;
        log::info!("System config {} updated", config.key);
        Ok(config)
    }

    /// Percentage of usage revenue paid to coaches; falls back to the default
    /// when unset or not numeric.
    pub async fn revenue_share(&self) -> AppResult<f64> {
        let share = self
            .repository
            .find_by_key(REVENUE_SHARE_PERCENTAGE)
            .await?
            .and_then(|c| c.as_f64())
            .unwrap_or(DEFAULT_REVENUE_SHARE);
        Ok(share)
    }
}
