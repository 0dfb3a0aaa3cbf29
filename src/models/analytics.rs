// src/models/analytics.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::OrderStatus;
use super::string_or_number;
use crate::error::Error;

/// Summary served by `/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_sales: f64,
    pub total_orders: u64,
    pub total_customers: u64,
    pub total_products: u64,
    pub recent_orders: Vec<RecentOrder>,
    pub low_stock_products: Vec<LowStockProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub customer_name: String,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockProduct {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub stock: i64,
}

/// Detailed figures served by `/analytics?period=...`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsData {
    pub total_sales: f64,
    pub total_orders: u64,
    pub total_customers: u64,
    /// Percentage, e.g. `3.2` for 3.2%
    pub conversion_rate: f64,
    pub average_order_value: f64,
    pub top_products: Vec<TopProduct>,
    pub sales_by_month: Vec<MonthlySales>,
    pub customer_growth: Vec<MonthlyCustomers>,
}

impl AnalyticsData {
    /// Best-selling product by revenue
    pub fn top_by_revenue(&self) -> Option<&TopProduct> {
        self.top_products
            .iter()
            .max_by(|a, b| a.revenue.total_cmp(&b.revenue))
    }

    /// Percent change between the last two months of sales
    pub fn monthly_sales_trend(&self) -> Option<f64> {
        let [.., previous, current] = self.sales_by_month.as_slice() else {
            return None;
        };
        if previous.sales == 0.0 {
            return None;
        }
        Some((current.sales - previous.sales) / previous.sales * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub sales: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCustomers {
    pub month: String,
    pub customers: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnalyticsPeriod {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl AnalyticsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "1y",
        }
    }
}

impl fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsPeriod {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            "90d" => Ok(Self::Quarter),
            "1y" => Ok(Self::Year),
            other => Err(Error::validation(
                "period",
                format!("unknown period '{}' (expected 7d, 30d, 90d or 1y)", other),
            )),
        }
    }
}
