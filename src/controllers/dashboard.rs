// src/controllers/dashboard.rs
use crate::api::{ApiClient, ApiResponse};
use crate::models::{DashboardStats, LowStockProduct, RecentOrder};

use super::note_outcome;

/// Landing screen: headline figures and a backend health check
#[derive(Debug)]
pub struct DashboardController {
    client: ApiClient,
    stats: Option<DashboardStats>,
    backend_online: Option<bool>,
    last_error: Option<String>,
}

impl DashboardController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            stats: None,
            backend_online: None,
            last_error: None,
        }
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// `None` before the first refresh
    pub fn backend_online(&self) -> Option<bool> {
        self.backend_online
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn recent_orders(&self) -> &[RecentOrder] {
        self.stats.as_ref().map(|s| s.recent_orders.as_slice()).unwrap_or_default()
    }

    pub fn low_stock_products(&self) -> &[LowStockProduct] {
        self.stats
            .as_ref()
            .map(|s| s.low_stock_products.as_slice())
            .unwrap_or_default()
    }

    /// Fetches stats and checks `/health` concurrently
    pub async fn refresh(&mut self) -> bool {
        let (stats, health) =
            futures::future::join(self.client.get_stats(), self.client.health_check()).await;

        self.backend_online = Some(health.is_success());
        if !note_outcome(&mut self.last_error, "load stats", &stats) {
            return false;
        }
        if let ApiResponse::Success { data } = stats {
            self.stats = Some(data);
        }
        true
    }
}
