// src/controllers/customer.rs
use crate::api::ApiClient;
use crate::models::{Customer, CustomerInput, CustomerStatus};

use super::{contains_ignore_case, Filter, ResourceList};

#[derive(Debug)]
pub struct CustomerController {
    client: ApiClient,
    customers: ResourceList<Customer>,
    pub search: String,
    pub status: Filter<CustomerStatus>,
    pub form: CustomerInput,
    editing: Option<String>,
}

impl CustomerController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            customers: ResourceList::new(),
            search: String::new(),
            status: Filter::All,
            form: CustomerInput::default(),
            editing: None,
        }
    }

    pub async fn load(&mut self) -> bool {
        self.customers.begin_load();
        let envelope = self.client.get_customers().await;
        self.customers.apply("customers", envelope)
    }

    pub fn list(&self) -> &ResourceList<Customer> {
        &self.customers
    }

    pub fn visible(&self) -> Vec<&Customer> {
        self.customers
            .items()
            .iter()
            .filter(|customer| {
                contains_ignore_case(&customer.name, &self.search)
                    || contains_ignore_case(&customer.email, &self.search)
            })
            .filter(|customer| self.status.matches(&customer.status))
            .collect()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn begin_edit(&mut self, customer: &Customer) {
        self.form = CustomerInput::from(customer);
        self.editing = Some(customer.id.clone());
    }

    pub fn reset_form(&mut self) {
        self.form = CustomerInput::default();
        self.editing = None;
    }

    pub async fn submit(&mut self) -> bool {
        let envelope = match &self.editing {
            Some(id) => self.client.update_customer(id, &self.form).await,
            None => self.client.create_customer(&self.form).await,
        };
        if !self.customers.note("save customer", &envelope) {
            return false;
        }

        self.reset_form();
        self.load().await;
        true
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        let envelope = self.client.delete_customer(id).await;
        if !self.customers.note("delete customer", &envelope) {
            return false;
        }
        self.load().await;
        true
    }
}
