use sesmine_domain::settings::Settings;

use crate::domain::repository::SettingsRepository;
use crate::error::PortalError;

pub struct GetSettingsUseCase<S: SettingsRepository> {
    pub settings: S,
}

impl<S: SettingsRepository> GetSettingsUseCase<S> {
    pub async fn execute(&self) -> Result<Settings, PortalError> {
        self.settings.get().await
    }
}

pub struct SaveSettingsUseCase<S: SettingsRepository> {
    pub settings: S,
}

impl<S: SettingsRepository> SaveSettingsUseCase<S> {
    pub async fn execute(&self, settings: &Settings) -> Result<(), PortalError> {
        self.settings.save(settings).await?;
        tracing::info!(theme = %settings.theme, language = %settings.language, "settings saved");
        Ok(())
    }
}
