// src/controllers/social.rs
use crate::api::{ApiClient, ApiResponse};
use crate::models::{SocialMedia, SocialPlatform};

use super::note_outcome;

#[derive(Debug)]
pub struct SocialMediaController {
    client: ApiClient,
    links: SocialMedia,
    last_error: Option<String>,
}

impl SocialMediaController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            links: SocialMedia::default(),
            last_error: None,
        }
    }

    pub fn links(&self) -> &SocialMedia {
        &self.links
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn configured_platforms(&self) -> Vec<(SocialPlatform, &str)> {
        self.links.configured()
    }

    pub async fn load(&mut self) -> bool {
        let envelope = self.client.get_social_media().await;
        if !note_outcome(&mut self.last_error, "load social media", &envelope) {
            return false;
        }
        if let ApiResponse::Success { data } = envelope {
            self.links = data;
        }
        true
    }

    /// Blank links are dropped before sending
    pub async fn save(&mut self, links: &SocialMedia) -> bool {
        let cleaned = links.without_blank();
        let envelope = self.client.update_social_media(&cleaned).await;
        if !note_outcome(&mut self.last_error, "save social media", &envelope) {
            return false;
        }
        self.links = cleaned;
        true
    }
}
