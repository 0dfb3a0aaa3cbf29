// src/lib.rs

//! Panel Admin - back-office client for an e-commerce storefront
//!
//! A typed REST gateway whose every call resolves to an [`ApiResponse`]
//! envelope, plus per-screen controllers that keep local state in sync with
//! the backend.

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod logging;
pub mod models;
pub mod platform;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use api::{ApiClient, ApiFailure, ApiResponse, FileUpload};
pub use config::{AppConfig, ConfigLoader};
pub use error::{Error, ErrorKind, Result, ResultExt};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
