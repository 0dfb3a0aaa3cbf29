// src/api/mod.rs

//! REST gateway: the client, its response envelope and upload payloads.

pub mod client;
pub mod envelope;
pub mod upload;

pub use client::{resolve_base_url, ApiClient};
pub use envelope::{ApiFailure, ApiResponse, UNKNOWN_ERROR};
pub use upload::FileUpload;
