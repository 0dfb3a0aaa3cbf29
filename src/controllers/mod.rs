// src/controllers/mod.rs

//! View controllers for the dashboard screens.
//!
//! A controller owns an [`ApiClient`](crate::api::ApiClient) clone plus the
//! local state of one screen: the last loaded records, filter and sort
//! choices, and an edit form. Loads keep the previous records when the
//! backend fails; mutations reload only after a success envelope.

use std::cmp::Ordering;

use crate::api::ApiResponse;
use crate::models::Resource;

pub mod analytics;
pub mod customer;
pub mod dashboard;
pub mod media;
pub mod order;
pub mod page;
pub mod product;
pub mod settings;
pub mod social;

pub use analytics::AnalyticsController;
pub use customer::CustomerController;
pub use dashboard::DashboardController;
pub use media::MediaController;
pub use order::OrderController;
pub use page::PageController;
pub use product::{ProductController, ProductSortKey};
pub use settings::SettingsController;
pub use social::SocialMediaController;

/// Last loaded collection of a screen
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList<T> {
    items: Vec<T>,
    loading: bool,
    last_error: Option<String>,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            last_error: None,
        }
    }
}

impl<T> ResourceList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replaces the items on success; on failure keeps them and records the error
    pub fn apply(&mut self, what: &str, envelope: ApiResponse<Vec<T>>) -> bool {
        self.loading = false;
        match envelope {
            ApiResponse::Success { data } => {
                tracing::debug!(what, count = data.len(), "loaded");
                self.items = data;
                self.last_error = None;
                true
            }
            ApiResponse::Failure { error } => {
                tracing::error!(what, %error, "failed to load");
                self.last_error = Some(error);
                false
            }
        }
    }

    /// Records the outcome of a mutation without touching the items
    pub fn note<U>(&mut self, action: &str, envelope: &ApiResponse<U>) -> bool {
        note_outcome(&mut self.last_error, action, envelope)
    }
}

impl<T: Resource> ResourceList<T> {
    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }
}

pub(crate) fn note_outcome<U>(
    last_error: &mut Option<String>,
    action: &str,
    envelope: &ApiResponse<U>,
) -> bool {
    match envelope.error() {
        None => {
            *last_error = None;
            true
        }
        Some(error) => {
            tracing::error!(action, error, "request failed");
            *last_error = Some(error.to_string());
            false
        }
    }
}

/// Case-insensitive substring match; an empty needle matches everything
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        };
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<S> {
    #[default]
    All,
    Only(S),
}

impl<S: PartialEq> Filter<S> {
    pub fn matches(&self, value: &S) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}
