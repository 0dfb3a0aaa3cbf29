// src/controllers/page.rs
use crate::api::ApiClient;
use crate::models::{Page, PageFields};

use super::ResourceList;

/// Content pages (home, about, contact). Editing works on a flat field map.
#[derive(Debug)]
pub struct PageController {
    client: ApiClient,
    pages: ResourceList<Page>,
    editing: Option<String>,
}

impl PageController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            pages: ResourceList::new(),
            editing: None,
        }
    }

    pub async fn load(&mut self) -> bool {
        self.pages.begin_load();
        let envelope = self.client.get_pages().await;
        self.pages.apply("pages", envelope)
    }

    pub fn list(&self) -> &ResourceList<Page> {
        &self.pages
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Starts editing a loaded page and returns its current fields
    pub fn begin_edit(&mut self, id: &str) -> Option<PageFields> {
        let page = self.pages.find(id)?;
        let fields = page.fields();
        self.editing = Some(page.id.clone());
        Some(fields)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Saves `fields` to the edited page, or creates a page when none is edited
    pub async fn submit(&mut self, fields: &PageFields) -> bool {
        let envelope = match &self.editing {
            Some(id) => self.client.update_page(id, fields).await,
            None => self.client.create_page(fields).await,
        };
        if !self.pages.note("save page", &envelope) {
            return false;
        }

        self.editing = None;
        self.load().await;
        true
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        let envelope = self.client.delete_page(id).await;
        if !self.pages.note("delete page", &envelope) {
            return false;
        }
        self.load().await;
        true
    }
}
