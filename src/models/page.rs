// src/models/page.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{string_or_number, Resource};

/// Editable page content. Pages share one loose schema keyed by id
/// ("home", "about", "contact"); which fields are meaningful depends on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default)]
    pub sections: Vec<Value>,
}

impl Page {
    /// Current value of every populated text field, keyed by its wire name.
    pub fn fields(&self) -> PageFields {
        let mut fields = PageFields::new();
        fields.insert("title".to_string(), self.title.clone());

        let optional = [
            ("heroTitle", &self.hero_title),
            ("heroSubtitle", &self.hero_subtitle),
            ("heroDescription", &self.hero_description),
            ("heroImage", &self.hero_image),
            ("content", &self.content),
            ("image", &self.image),
            ("address", &self.address),
            ("phone", &self.phone),
            ("email", &self.email),
            ("hours", &self.hours),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_string(), value.clone());
            }
        }

        fields
    }

    pub fn is_contact_page(&self) -> bool {
        self.id == "contact"
    }
}

impl Resource for Page {
    const PATH: &'static str = "/pages";
    const NAME: &'static str = "page";
    type Input = PageFields;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Flat form submission: wire field name to text value
pub type PageFields = BTreeMap<String, String>;
