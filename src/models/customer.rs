// src/models/customer.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{string_or_number, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for CustomerStatus {
    type Err = crate::error::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(crate::error::Error::validation(
                "status",
                format!("unknown customer status '{}'", other),
            )),
        }
    }
}

/// A shop customer. Order aggregates are computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_order: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: CustomerStatus,
}

impl Resource for Customer {
    const PATH: &'static str = "/customers";
    const NAME: &'static str = "customer";
    type Input = CustomerInput;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
}

impl From<&Customer> for CustomerInput {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone().unwrap_or_default(),
            address: customer.address.clone().unwrap_or_default(),
            city: customer.city.clone().unwrap_or_default(),
            country: customer.country.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_active() {
        let customer: Customer = serde_json::from_str(
            r#"{"id": 3, "name": "Pierre Durand", "email": "pierre.durand@email.com"}"#,
        )
        .unwrap();
        assert_eq!(customer.status, CustomerStatus::Active);
        assert_eq!(customer.total_orders, 0);
        assert!(customer.last_order.is_none());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Inactive".parse::<CustomerStatus>().unwrap(), CustomerStatus::Inactive);
        assert!("archived".parse::<CustomerStatus>().is_err());
    }

    #[test]
    fn test_input_fills_blanks() {
        let customer: Customer = serde_json::from_str(
            r#"{"id": "1", "name": "Jean Dupont", "email": "jean@email.com", "city": "Paris"}"#,
        )
        .unwrap();
        let input = CustomerInput::from(&customer);
        assert_eq!(input.city, "Paris");
        assert_eq!(input.phone, "");
    }
}
