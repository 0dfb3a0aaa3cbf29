// src/api/client.rs

//! Gateway to the storefront REST API.
//!
//! Every operation resolves to an [`ApiResponse`]: HTTP errors, transport
//! failures, undecodable bodies and unserializable payloads all become a
//! failure envelope carrying a message. Nothing is retried.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::envelope::{ApiResponse, UNKNOWN_ERROR};
use crate::api::upload::FileUpload;
use crate::config::{ApiConfig, API_URL_ENV, DEFAULT_API_URL};
use crate::error::{Error, ErrorKind, Result};
use crate::models::{
    AnalyticsData, AnalyticsPeriod, Customer, CustomerInput, DashboardStats, ExportFormat,
    ExportType, MediaItem, Order, OrderStatus, OrderUpdate, Page, PageFields, Product,
    ProductInput, Resource, SearchType, SiteSettings, SocialMedia, StatusChange, UploadedFile,
};
use crate::platform::{HttpMethod, NetworkArc, NetworkRequest, NetworkResponse, RequestBody};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Picks the base URL: environment override, then the configured value, then
/// the built-in default. Trailing slashes are dropped.
pub fn resolve_base_url(configured: Option<&str>, env: Option<&str>) -> String {
    let chosen = [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL);

    chosen.trim_end_matches('/').to_string()
}

/// Cheap to clone; hand one to each controller.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    network: NetworkArc,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Base URL from `PANEL_ADMIN_API_URL`, else the default endpoint
    pub fn new(network: NetworkArc) -> Self {
        let env = std::env::var(API_URL_ENV).ok();
        Self {
            base_url: resolve_base_url(None, env.as_deref()),
            network,
        }
    }

    /// Uses `base_url` as given; the environment is not consulted
    pub fn with_base_url(network: NetworkArc, base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: resolve_base_url(Some(base_url.as_ref()), None),
            network,
        }
    }

    pub fn from_config(network: NetworkArc, config: &ApiConfig) -> Self {
        let env = std::env::var(API_URL_ENV).ok();
        Self {
            base_url: resolve_base_url(Some(&config.base_url), env.as_deref()),
            network,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn build_request(&self, method: HttpMethod, endpoint: &str, body: RequestBody) -> NetworkRequest {
        let mut request = NetworkRequest::new(method, self.url(endpoint)).header("Accept", JSON_CONTENT_TYPE);
        // multipart bodies get their boundary-bearing content type from the transport
        if !body.is_multipart() {
            request = request.header("Content-Type", JSON_CONTENT_TYPE);
        }
        request.body(body)
    }

    async fn execute_raw(&self, method: HttpMethod, endpoint: &str, body: RequestBody) -> Result<NetworkResponse> {
        let request = self.build_request(method, endpoint, body);
        tracing::debug!(%method, endpoint, "api request");

        let response = self.network.request(request).await?;
        if !response.is_success() {
            return Err(Error::http_status(
                response.status_code,
                endpoint,
                http_error_message(&response),
            ));
        }

        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, method: HttpMethod, endpoint: &str, body: RequestBody) -> ApiResponse<T> {
        let outcome = match self.execute_raw(method, endpoint, body).await {
            Ok(response) => decode_body(&response.body),
            Err(error) => Err(error),
        };
        self.finish(method, endpoint, outcome)
    }

    async fn send_json<P, T>(&self, method: HttpMethod, endpoint: &str, payload: &P) -> ApiResponse<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match serde_json::to_vec(payload) {
            Ok(bytes) => self.send(method, endpoint, RequestBody::Json(bytes)).await,
            Err(e) => self.finish(
                method,
                endpoint,
                Err(Error::serialization(format!("Failed to serialize request body: {}", e))),
            ),
        }
    }

    fn finish<T>(&self, method: HttpMethod, endpoint: &str, outcome: Result<T>) -> ApiResponse<T> {
        if let Err(error) = &outcome {
            tracing::warn!(
                %method,
                endpoint,
                status = ?error.status_code(),
                error = %error.message,
                "api request failed"
            );
        }
        outcome.into()
    }

    // Generic resource operations

    pub async fn list<R: Resource>(&self) -> ApiResponse<Vec<R>> {
        self.send(HttpMethod::Get, R::PATH, RequestBody::Empty).await
    }

    pub async fn fetch<R: Resource>(&self, id: &str) -> ApiResponse<R> {
        self.send(HttpMethod::Get, &item_path(R::PATH, id), RequestBody::Empty).await
    }

    /// Data is whatever the backend echoes back, usually the created record
    pub async fn create<R: Resource>(&self, input: &R::Input) -> ApiResponse<Value> {
        self.send_json(HttpMethod::Post, R::PATH, input).await
    }

    pub async fn update<R: Resource>(&self, id: &str, input: &R::Input) -> ApiResponse<Value> {
        self.send_json(HttpMethod::Put, &item_path(R::PATH, id), input).await
    }

    pub async fn remove<R: Resource>(&self, id: &str) -> ApiResponse<Value> {
        tracing::info!(resource = R::NAME, id, "deleting");
        self.send(HttpMethod::Delete, &item_path(R::PATH, id), RequestBody::Empty).await
    }

    // Products

    pub async fn get_products(&self) -> ApiResponse<Vec<Product>> {
        self.list::<Product>().await
    }

    pub async fn get_product(&self, id: &str) -> ApiResponse<Product> {
        self.fetch::<Product>(id).await
    }

    pub async fn create_product(&self, input: &ProductInput) -> ApiResponse<Value> {
        self.create::<Product>(input).await
    }

    pub async fn update_product(&self, id: &str, input: &ProductInput) -> ApiResponse<Value> {
        self.update::<Product>(id, input).await
    }

    pub async fn delete_product(&self, id: &str) -> ApiResponse<Value> {
        self.remove::<Product>(id).await
    }

    // Orders

    pub async fn get_orders(&self) -> ApiResponse<Vec<Order>> {
        self.list::<Order>().await
    }

    pub async fn get_order(&self, id: &str) -> ApiResponse<Order> {
        self.fetch::<Order>(id).await
    }

    pub async fn update_order(&self, id: &str, update: &OrderUpdate) -> ApiResponse<Value> {
        self.update::<Order>(id, update).await
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> ApiResponse<Value> {
        let endpoint = format!("{}/status", item_path(Order::PATH, id));
        self.send_json(HttpMethod::Put, &endpoint, &StatusChange { status }).await
    }

    pub async fn delete_order(&self, id: &str) -> ApiResponse<Value> {
        self.remove::<Order>(id).await
    }

    // Customers

    pub async fn get_customers(&self) -> ApiResponse<Vec<Customer>> {
        self.list::<Customer>().await
    }

    pub async fn get_customer(&self, id: &str) -> ApiResponse<Customer> {
        self.fetch::<Customer>(id).await
    }

    pub async fn create_customer(&self, input: &CustomerInput) -> ApiResponse<Value> {
        self.create::<Customer>(input).await
    }

    pub async fn update_customer(&self, id: &str, input: &CustomerInput) -> ApiResponse<Value> {
        self.update::<Customer>(id, input).await
    }

    pub async fn delete_customer(&self, id: &str) -> ApiResponse<Value> {
        self.remove::<Customer>(id).await
    }

    // Pages

    pub async fn get_pages(&self) -> ApiResponse<Vec<Page>> {
        self.list::<Page>().await
    }

    pub async fn get_page(&self, id: &str) -> ApiResponse<Page> {
        self.fetch::<Page>(id).await
    }

    pub async fn create_page(&self, fields: &PageFields) -> ApiResponse<Value> {
        self.create::<Page>(fields).await
    }

    pub async fn update_page(&self, id: &str, fields: &PageFields) -> ApiResponse<Value> {
        self.update::<Page>(id, fields).await
    }

    pub async fn delete_page(&self, id: &str) -> ApiResponse<Value> {
        self.remove::<Page>(id).await
    }

    // Media

    pub async fn get_media(&self) -> ApiResponse<Vec<MediaItem>> {
        self.send(HttpMethod::Get, "/media", RequestBody::Empty).await
    }

    pub async fn upload_media(&self, file: FileUpload) -> ApiResponse<UploadedFile> {
        let body = RequestBody::Multipart(file.into_form("file"));
        self.send(HttpMethod::Post, "/media/upload", body).await
    }

    pub async fn delete_media(&self, id: &str) -> ApiResponse<Value> {
        self.send(HttpMethod::Delete, &item_path("/media", id), RequestBody::Empty).await
    }

    /// Generic upload; `upload_type` travels as the `type` form field
    pub async fn upload_file(&self, file: FileUpload, upload_type: Option<&str>) -> ApiResponse<UploadedFile> {
        let mut form = file.into_form("file");
        if let Some(kind) = upload_type {
            form = form.text("type", kind);
        }
        self.send(HttpMethod::Post, "/upload", RequestBody::Multipart(form)).await
    }

    // Singletons

    pub async fn get_social_media(&self) -> ApiResponse<SocialMedia> {
        self.send(HttpMethod::Get, "/social-media", RequestBody::Empty).await
    }

    pub async fn update_social_media(&self, links: &SocialMedia) -> ApiResponse<Value> {
        self.send_json(HttpMethod::Put, "/social-media", links).await
    }

    pub async fn get_settings(&self) -> ApiResponse<SiteSettings> {
        self.send(HttpMethod::Get, "/settings", RequestBody::Empty).await
    }

    pub async fn update_settings(&self, settings: &SiteSettings) -> ApiResponse<Value> {
        self.send_json(HttpMethod::Put, "/settings", settings).await
    }

    // Reporting

    pub async fn get_stats(&self) -> ApiResponse<DashboardStats> {
        self.send(HttpMethod::Get, "/stats", RequestBody::Empty).await
    }

    pub async fn get_analytics(&self, period: AnalyticsPeriod) -> ApiResponse<AnalyticsData> {
        let endpoint = format!("/analytics?period={}", period.as_str());
        self.send(HttpMethod::Get, &endpoint, RequestBody::Empty).await
    }

    pub async fn search(&self, query: &str, search_type: SearchType) -> ApiResponse<Value> {
        let endpoint = format!(
            "/search?q={}&type={}",
            urlencoding::encode(query),
            search_type.as_str()
        );
        self.send(HttpMethod::Get, &endpoint, RequestBody::Empty).await
    }

    /// Data is the raw export body (CSV or JSON text)
    pub async fn export_data(&self, export_type: ExportType, format: ExportFormat) -> ApiResponse<String> {
        let endpoint = format!("/export/{}?format={}", export_type.as_str(), format.as_str());
        let method = HttpMethod::Get;
        let outcome = self
            .execute_raw(method, &endpoint, RequestBody::Empty)
            .await
            .map(|response| String::from_utf8_lossy(&response.body).into_owned());
        self.finish(method, &endpoint, outcome)
    }

    pub async fn health_check(&self) -> ApiResponse<Value> {
        self.send(HttpMethod::Get, "/health", RequestBody::Empty).await
    }
}

fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}

/// `error` or `message` from a JSON error body, else a generic status line
fn http_error_message(response: &NetworkResponse) -> String {
    serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            ["error", "message"].into_iter().find_map(|key| {
                body.get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("HTTP error! status: {}", response.status_code))
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body)
            .map_err(|e| Error::serialization(format!("Invalid response body: {}", e)))?
    };

    serde_json::from_value(unwrap_envelope(value)?)
        .map_err(|e| Error::serialization(format!("Invalid response body: {}", e)))
}

/// Bodies shaped like an envelope are unwrapped; anything else is the data itself.
fn unwrap_envelope(value: Value) -> Result<Value> {
    let Value::Object(mut body) = value else {
        return Ok(value);
    };

    match body.get("success") {
        Some(Value::Bool(true)) => Ok(body.remove("data").unwrap_or(Value::Null)),
        Some(Value::Bool(false)) => {
            let message = body
                .remove("error")
                .and_then(|e| e.as_str().map(str::to_string))
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            Err(Error::new(ErrorKind::Application, message).source("backend"))
        }
        _ => Ok(Value::Object(body)),
    }
}
