// src/models/social.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
    Tiktok,
    Snapchat,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 7] = [
        Self::Facebook,
        Self::Instagram,
        Self::Twitter,
        Self::Linkedin,
        Self::Youtube,
        Self::Tiktok,
        Self::Snapchat,
    ];

    /// Wire key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
            Self::Snapchat => "snapchat",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::Linkedin => "LinkedIn",
            Self::Youtube => "YouTube",
            Self::Tiktok => "TikTok",
            Self::Snapchat => "Snapchat",
        }
    }
}

/// Social-media links singleton (`/social-media`), one optional URL per platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapchat: Option<String>,
}

impl SocialMedia {
    pub fn get(&self, platform: SocialPlatform) -> Option<&str> {
        self.slot(platform).as_deref()
    }

    pub fn set(&mut self, platform: SocialPlatform, url: Option<String>) {
        *self.slot_mut(platform) = url;
    }

    fn slot(&self, platform: SocialPlatform) -> &Option<String> {
        match platform {
            SocialPlatform::Facebook => &self.facebook,
            SocialPlatform::Instagram => &self.instagram,
            SocialPlatform::Twitter => &self.twitter,
            SocialPlatform::Linkedin => &self.linkedin,
            SocialPlatform::Youtube => &self.youtube,
            SocialPlatform::Tiktok => &self.tiktok,
            SocialPlatform::Snapchat => &self.snapchat,
        }
    }

    fn slot_mut(&mut self, platform: SocialPlatform) -> &mut Option<String> {
        match platform {
            SocialPlatform::Facebook => &mut self.facebook,
            SocialPlatform::Instagram => &mut self.instagram,
            SocialPlatform::Twitter => &mut self.twitter,
            SocialPlatform::Linkedin => &mut self.linkedin,
            SocialPlatform::Youtube => &mut self.youtube,
            SocialPlatform::Tiktok => &mut self.tiktok,
            SocialPlatform::Snapchat => &mut self.snapchat,
        }
    }

    /// Copy with blank or whitespace-only links removed and the rest trimmed
    pub fn without_blank(&self) -> Self {
        let mut cleaned = Self::default();
        for platform in SocialPlatform::ALL {
            let url = self
                .get(platform)
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string);
            cleaned.set(platform, url);
        }
        cleaned
    }

    /// Platforms with a link, in display order
    pub fn configured(&self) -> Vec<(SocialPlatform, &str)> {
        SocialPlatform::ALL
            .into_iter()
            .filter_map(|platform| self.get(platform).map(|url| (platform, url)))
            .collect()
    }
}
