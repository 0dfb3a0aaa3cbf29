// src/models/product.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{string_or_number, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    /// Free-form key/value specifications ("material": "100% cotton")
    #[serde(default)]
    pub specifications: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<u64>,
}

impl Product {
    pub fn stock_level(&self, low_threshold: u32, medium_threshold: u32) -> StockLevel {
        StockLevel::classify(self.stock, low_threshold, medium_threshold)
    }
}

impl Resource for Product {
    const PATH: &'static str = "/products";
    const NAME: &'static str = "product";
    type Input = ProductInput;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Create/update payload for a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub long_description: String,
    pub category: String,
    pub stock: i64,
    pub images: Vec<String>,
    pub video: String,
    pub features: Vec<String>,
    pub specifications: Map<String, Value>,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            long_description: product.long_description.clone().unwrap_or_default(),
            category: product.category.clone(),
            stock: product.stock,
            images: product.images.clone(),
            video: product.video.clone().unwrap_or_default(),
            features: product.features.clone(),
            specifications: product.specifications.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Low,
    Medium,
    High,
}

impl StockLevel {
    pub fn classify(stock: i64, low_threshold: u32, medium_threshold: u32) -> Self {
        if stock < i64::from(low_threshold) {
            Self::Low
        } else if stock < i64::from(medium_threshold) {
            Self::Medium
        } else {
            Self::High
        }
    }
}
