// src/models/mod.rs

//! Records exchanged verbatim with the storefront backend.
//!
//! Field names follow the backend's camelCase JSON. Nothing here normalizes
//! or validates; the backend owns consistency.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub mod analytics;
pub mod customer;
pub mod media;
pub mod order;
pub mod page;
pub mod product;
pub mod query;
pub mod settings;
pub mod social;

pub use analytics::{
    AnalyticsData, AnalyticsPeriod, DashboardStats, LowStockProduct, MonthlyCustomers,
    MonthlySales, RecentOrder, TopProduct,
};
pub use customer::{Customer, CustomerInput, CustomerStatus};
pub use media::{format_file_size, FileKind, MediaItem, UploadedFile};
pub use order::{Order, OrderItem, OrderStatus, OrderUpdate, StatusChange};
pub use page::{Page, PageFields};
pub use product::{Product, ProductInput, StockLevel};
pub use query::{ExportFormat, ExportType, SearchType};
pub use settings::SiteSettings;
pub use social::{SocialMedia, SocialPlatform};

/// A collection resource served under `PATH` and `PATH/{id}`.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection path relative to the API base URL
    const PATH: &'static str;
    /// Singular name used in log lines
    const NAME: &'static str;

    /// Payload accepted by create and update
    type Input: Serialize + Send + Sync;

    fn id(&self) -> &str;
}

/// Accepts ids sent either as JSON strings or numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Int(number) => number.to_string(),
        RawId::Float(number) => number.to_string(),
    })
}
