// src/controllers/settings.rs
use crate::api::{ApiClient, ApiResponse};
use crate::models::SiteSettings;

use super::note_outcome;

#[derive(Debug)]
pub struct SettingsController {
    client: ApiClient,
    settings: SiteSettings,
    loaded: bool,
    last_error: Option<String>,
}

impl SettingsController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            settings: SiteSettings::default(),
            loaded: false,
            last_error: None,
        }
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// False until a load has succeeded; `settings()` holds defaults until then
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn load(&mut self) -> bool {
        let envelope = self.client.get_settings().await;
        if !note_outcome(&mut self.last_error, "load settings", &envelope) {
            return false;
        }
        if let ApiResponse::Success { data } = envelope {
            self.settings = data;
            self.loaded = true;
        }
        true
    }

    pub async fn save(&mut self, settings: SiteSettings) -> bool {
        let envelope = self.client.update_settings(&settings).await;
        if !note_outcome(&mut self.last_error, "save settings", &envelope) {
            return false;
        }

        tracing::info!(site = %settings.site_name, "settings saved");
        self.settings = settings;
        true
    }
}
