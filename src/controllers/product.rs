// src/controllers/product.rs
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::api::ApiClient;
use crate::config::DashboardConfig;
use crate::models::{Product, ProductInput, StockLevel};

use super::{contains_ignore_case, Filter, ResourceList, SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortKey {
    #[default]
    Name,
    Price,
    Stock,
    Category,
}

impl std::str::FromStr for ProductSortKey {
    type Err = crate::error::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "stock" => Ok(Self::Stock),
            "category" => Ok(Self::Category),
            other => Err(crate::error::Error::validation(
                "sort",
                format!("unknown sort key '{}' (expected name, price, stock or category)", other),
            )),
        }
    }
}

/// Catalogue screen: filtering, sorting and the create/edit form
#[derive(Debug)]
pub struct ProductController {
    client: ApiClient,
    low_stock_threshold: u32,
    medium_stock_threshold: u32,
    currency: String,
    products: ResourceList<Product>,
    pub search: String,
    pub category: Filter<String>,
    pub sort_key: ProductSortKey,
    pub sort_order: SortOrder,
    pub form: ProductInput,
    editing: Option<String>,
}

impl ProductController {
    pub fn new(client: ApiClient, dashboard: &DashboardConfig) -> Self {
        Self {
            client,
            low_stock_threshold: dashboard.low_stock_threshold,
            medium_stock_threshold: dashboard.medium_stock_threshold,
            currency: dashboard.currency.clone(),
            products: ResourceList::new(),
            search: String::new(),
            category: Filter::All,
            sort_key: ProductSortKey::default(),
            sort_order: SortOrder::default(),
            form: ProductInput::default(),
            editing: None,
        }
    }

    pub async fn load(&mut self) -> bool {
        self.products.begin_load();
        let envelope = self.client.get_products().await;
        self.products.apply("products", envelope)
    }

    pub fn list(&self) -> &ResourceList<Product> {
        &self.products
    }

    /// Products matching the search term and category, in the chosen order
    pub fn visible(&self) -> Vec<&Product> {
        let mut visible: Vec<&Product> = self
            .products
            .items()
            .iter()
            .filter(|product| {
                contains_ignore_case(&product.name, &self.search)
                    || contains_ignore_case(&product.description, &self.search)
            })
            .filter(|product| self.category.matches(&product.category))
            .collect();

        visible.sort_by(|a, b| self.sort_order.apply(self.compare(a, b)));
        visible
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self.sort_key {
            ProductSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProductSortKey::Price => a.price.total_cmp(&b.price),
            ProductSortKey::Stock => a.stock.cmp(&b.stock),
            ProductSortKey::Category => a.category.cmp(&b.category),
        }
    }

    /// Distinct non-empty categories, sorted
    pub fn categories(&self) -> Vec<String> {
        self.products
            .items()
            .iter()
            .map(|product| product.category.as_str())
            .filter(|category| !category.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn stock_level(&self, product: &Product) -> StockLevel {
        product.stock_level(self.low_stock_threshold, self.medium_stock_threshold)
    }

    /// Price with two decimals and the configured currency code
    pub fn price_label(&self, product: &Product) -> String {
        format!("{:.2} {}", product.price, self.currency)
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn begin_edit(&mut self, product: &Product) {
        self.form = ProductInput::from(product);
        self.editing = Some(product.id.clone());
    }

    pub fn reset_form(&mut self) {
        self.form = ProductInput::default();
        self.editing = None;
    }

    /// Creates or updates from the form; the form is cleared only on success
    pub async fn submit(&mut self) -> bool {
        let envelope = match &self.editing {
            Some(id) => self.client.update_product(id, &self.form).await,
            None => self.client.create_product(&self.form).await,
        };
        if !self.products.note("save product", &envelope) {
            return false;
        }

        tracing::info!(name = %self.form.name, "product saved");
        self.reset_form();
        self.load().await;
        true
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        let envelope = self.client.delete_product(id).await;
        if !self.products.note("delete product", &envelope) {
            return false;
        }
        if self.editing.as_deref() == Some(id) {
            self.reset_form();
        }
        self.load().await;
        true
    }
}
