// src/controllers/order.rs
use crate::api::ApiClient;
use crate::models::{Order, OrderStatus};

use super::{contains_ignore_case, Filter, ResourceList};

#[derive(Debug)]
pub struct OrderController {
    client: ApiClient,
    orders: ResourceList<Order>,
    pub search: String,
    pub status: Filter<OrderStatus>,
    selected: Option<String>,
}

impl OrderController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            orders: ResourceList::new(),
            search: String::new(),
            status: Filter::All,
            selected: None,
        }
    }

    pub async fn load(&mut self) -> bool {
        self.orders.begin_load();
        let envelope = self.client.get_orders().await;
        self.orders.apply("orders", envelope)
    }

    pub fn list(&self) -> &ResourceList<Order> {
        &self.orders
    }

    /// Search covers the customer name and the order id
    pub fn visible(&self) -> Vec<&Order> {
        self.orders
            .items()
            .iter()
            .filter(|order| {
                contains_ignore_case(&order.customer_name, &self.search)
                    || contains_ignore_case(&order.id, &self.search)
            })
            .filter(|order| self.status.matches(&order.status))
            .collect()
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    /// Detail view; `None` once the order disappears from the list
    pub fn selected(&self) -> Option<&Order> {
        let id = self.selected.as_deref()?;
        self.orders.find(id)
    }

    pub async fn update_status(&mut self, id: &str, status: OrderStatus) -> bool {
        let envelope = self.client.update_order_status(id, status).await;
        if !self.orders.note("update order status", &envelope) {
            return false;
        }

        tracing::info!(id, status = %status, "order status updated");
        self.load().await;
        true
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        let envelope = self.client.delete_order(id).await;
        if !self.orders.note("delete order", &envelope) {
            return false;
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.load().await;
        true
    }
}
