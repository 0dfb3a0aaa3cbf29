// src/models/settings.rs
use serde::{Deserialize, Serialize};

/// Site-wide settings singleton (`/settings`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    pub logo: String,
    pub favicon: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub footer_text: String,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            site_description: String::new(),
            logo: String::new(),
            favicon: String::new(),
            primary_color: "#3B82F6".to_string(),
            secondary_color: "#1F2937".to_string(),
            footer_text: String::new(),
            seo_title: String::new(),
            seo_description: String::new(),
            seo_keywords: String::new(),
        }
    }
}

impl SiteSettings {
    /// Comma-separated SEO keywords, trimmed, blanks dropped
    pub fn keywords(&self) -> Vec<&str> {
        self.seo_keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_keeps_default_colors() {
        let settings: SiteSettings =
            serde_json::from_str(r#"{"siteName": "Qencorroe", "seoKeywords": "mode, audio,, bio "}"#).unwrap();
        assert_eq!(settings.site_name, "Qencorroe");
        assert_eq!(settings.primary_color, "#3B82F6");
        assert_eq!(settings.keywords(), vec!["mode", "audio", "bio"]);
    }
}
