// src/testing/mod.rs

//! In-memory storefront backend for tests.
//!
//! `MockBackend` implements [`NetworkProvider`] over seeded JSON collections.
//! It records every request, applies mutations so reloads observe them, and
//! can be told to fail a route or the whole transport.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::platform::{FormPart, HttpMethod, NetworkProvider, NetworkRequest, NetworkResponse, RequestBody};

pub const MOCK_BASE_URL: &str = "http://mock.local/api";

const COLLECTIONS: [&str; 5] = ["products", "orders", "customers", "pages", "media"];

#[derive(Debug, Default)]
struct MockState {
    collections: HashMap<&'static str, Vec<Value>>,
    singletons: HashMap<&'static str, Value>,
    requests: Vec<NetworkRequest>,
    canned: HashMap<(HttpMethod, String), (u16, Vec<u8>)>,
    transport_error: Option<String>,
    next_id: u64,
}

#[derive(Debug, Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

/// Seeded backend plus a client pointed at it
pub fn mock_client() -> (Arc<MockBackend>, ApiClient) {
    let backend = Arc::new(MockBackend::seeded());
    let client = ApiClient::with_base_url(backend.clone(), MOCK_BASE_URL);
    (backend, client)
}

impl MockBackend {
    pub fn empty() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.lock();
            for name in COLLECTIONS {
                state.collections.insert(name, Vec::new());
            }
            state.next_id = 100;
        }
        backend
    }

    pub fn seeded() -> Self {
        let backend = Self::empty();
        {
            let mut state = backend.state.lock();
            state.collections.insert("products", as_array(fixtures::products()));
            state.collections.insert("orders", as_array(fixtures::orders()));
            state.collections.insert("customers", as_array(fixtures::customers()));
            state.collections.insert("pages", as_array(fixtures::pages()));
            state.collections.insert("media", as_array(fixtures::media()));
            state.singletons.insert("settings", fixtures::settings());
            state.singletons.insert("social-media", fixtures::social_media());
            state.singletons.insert("stats", fixtures::stats());
            state.singletons.insert("analytics", fixtures::analytics());
        }
        backend
    }

    pub fn requests(&self) -> Vec<NetworkRequest> {
        self.state.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().requests.clear();
    }

    /// Ids currently stored in a collection, in order
    pub fn ids(&self, collection: &str) -> Vec<String> {
        self.state
            .lock()
            .collections
            .get(collection)
            .map(|items| items.iter().filter_map(id_of).collect())
            .unwrap_or_default()
    }

    pub fn record(&self, collection: &str, id: &str) -> Option<Value> {
        self.state
            .lock()
            .collections
            .get(collection)
            .and_then(|items| items.iter().find(|item| id_of(item).as_deref() == Some(id)).cloned())
    }

    /// Serve `body` for `method path` (query ignored) until cleared
    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, body.to_string().into_bytes());
    }

    pub fn respond_raw(&self, method: HttpMethod, path: &str, status: u16, body: Vec<u8>) {
        self.state
            .lock()
            .canned
            .insert((method, path.to_string()), (status, body));
    }

    pub fn fail_route(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.respond(method, path, status, body);
    }

    pub fn fail_route_raw(&self, method: HttpMethod, path: &str, status: u16, body: Vec<u8>) {
        self.respond_raw(method, path, status, body);
    }

    pub fn clear_route(&self, method: HttpMethod, path: &str) {
        self.state.lock().canned.remove(&(method, path.to_string()));
    }

    /// Every following request fails before reaching a route
    pub fn fail_transport(&self, message: &str) {
        self.state.lock().transport_error = Some(message.to_string());
    }

    pub fn restore_transport(&self) {
        self.state.lock().transport_error = None;
    }

    fn handle(&self, request: &NetworkRequest) -> Result<NetworkResponse> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());

        if let Some(message) = &state.transport_error {
            return Err(Error::network(request.url.clone(), message.clone()));
        }

        let relative = request.url.strip_prefix(MOCK_BASE_URL).unwrap_or(&request.url);
        let (path, query) = relative.split_once('?').unwrap_or((relative, ""));

        if let Some((status, body)) = state.canned.get(&(request.method, path.to_string())) {
            return Ok(raw_response(*status, body.clone()));
        }

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let params = parse_query(query);

        let response = match (request.method, segments.as_slice()) {
            (HttpMethod::Get, ["health"]) => ok(json!({"status": "ok"})),
            (HttpMethod::Post, ["media", "upload"]) => {
                let uploaded = match uploaded_file(&request.body) {
                    Some(file) => file,
                    None => return Ok(error(400, "No file provided")),
                };
                state.next_id += 1;
                let mut item = uploaded.clone();
                item["id"] = json!(state.next_id.to_string());
                collection_mut(&mut state, "media").push(item);
                ok(uploaded)
            }
            (HttpMethod::Post, ["upload"]) => match uploaded_file(&request.body) {
                Some(file) => ok(file),
                None => error(400, "No file provided"),
            },
            (HttpMethod::Put, ["orders", id, "status"]) => {
                let id = decode(id);
                let status = json_body(&request.body).and_then(|body| body.get("status").cloned());
                match (find_mut(&mut state, "orders", &id), status) {
                    (Some(order), Some(status)) => {
                        order["status"] = status;
                        order["updatedAt"] = json!("2024-06-10T12:00:00Z");
                        ok(order.clone())
                    }
                    (None, _) => error(404, "Commande introuvable"),
                    (_, None) => error(400, "Missing status"),
                }
            }
            (method, ["settings" | "social-media" | "stats" | "analytics"]) => {
                let name = match segments[0] {
                    "settings" => "settings",
                    "social-media" => "social-media",
                    "stats" => "stats",
                    _ => "analytics",
                };
                match method {
                    HttpMethod::Get => ok(state.singletons.get(name).cloned().unwrap_or(Value::Null)),
                    HttpMethod::Put if matches!(name, "settings" | "social-media") => {
                        match json_body(&request.body) {
                            Some(body) => {
                                state.singletons.insert(name, body.clone());
                                ok(body)
                            }
                            None => error(400, "Invalid JSON"),
                        }
                    }
                    _ => error(405, "Method not allowed"),
                }
            }
            (HttpMethod::Get, ["search"]) => {
                let needle = params.get("q").cloned().unwrap_or_default().to_lowercase();
                let collection = params.get("type").cloned().unwrap_or_default();
                let items = state.collections.get(collection.as_str()).cloned().unwrap_or_default();
                let hits: Vec<Value> = items
                    .into_iter()
                    .filter(|item| {
                        ["name", "customerName", "email", "description"].iter().any(|key| {
                            item.get(*key)
                                .and_then(Value::as_str)
                                .is_some_and(|text| text.to_lowercase().contains(&needle))
                        })
                    })
                    .collect();
                ok(Value::Array(hits))
            }
            (HttpMethod::Get, ["export", collection]) => {
                let items = state.collections.get(*collection).cloned().unwrap_or_default();
                if params.get("format").map(String::as_str) == Some("json") {
                    ok(Value::Array(items))
                } else {
                    raw_response(200, export_csv(&items).into_bytes())
                }
            }
            (method, [collection]) if COLLECTIONS.contains(collection) => match method {
                HttpMethod::Get => ok(Value::Array(collection_mut(&mut state, collection).clone())),
                HttpMethod::Post => match json_body(&request.body) {
                    Some(Value::Object(mut record)) => {
                        state.next_id += 1;
                        record.insert("id".to_string(), json!(state.next_id.to_string()));
                        let record = Value::Object(record);
                        collection_mut(&mut state, collection).push(record.clone());
                        created(record)
                    }
                    _ => error(400, "Invalid JSON"),
                },
                _ => error(405, "Method not allowed"),
            },
            (method, [collection, id]) if COLLECTIONS.contains(collection) => {
                let id = decode(id);
                match method {
                    HttpMethod::Get => match find_mut(&mut state, collection, &id) {
                        Some(record) => ok(record.clone()),
                        None => error(404, "Not found"),
                    },
                    HttpMethod::Put => {
                        let patch = json_body(&request.body);
                        match (find_mut(&mut state, collection, &id), patch) {
                            (Some(record), Some(Value::Object(patch))) => {
                                if let Value::Object(fields) = record {
                                    fields.extend(patch);
                                }
                                ok(record.clone())
                            }
                            (None, _) => error(404, "Not found"),
                            (_, _) => error(400, "Invalid JSON"),
                        }
                    }
                    HttpMethod::Delete => {
                        let items = collection_mut(&mut state, collection);
                        let before = items.len();
                        items.retain(|item| id_of(item).as_deref() != Some(id.as_str()));
                        if items.len() < before {
                            ok(json!({"message": "Deleted"}))
                        } else {
                            error(404, "Not found")
                        }
                    }
                    HttpMethod::Post => error(405, "Method not allowed"),
                }
            }
            _ => error(404, "Route not found"),
        };

        Ok(response)
    }
}

#[async_trait::async_trait]
impl NetworkProvider for MockBackend {
    async fn request(&self, request: NetworkRequest) -> Result<NetworkResponse> {
        self.handle(&request)
    }
}

fn as_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn id_of(item: &Value) -> Option<String> {
    match item.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn collection_mut<'a>(state: &'a mut MockState, name: &str) -> &'a mut Vec<Value> {
    let key = COLLECTIONS.into_iter().find(|c| *c == name).unwrap_or("products");
    state.collections.entry(key).or_default()
}

fn find_mut<'a>(state: &'a mut MockState, collection: &str, id: &str) -> Option<&'a mut Value> {
    collection_mut(state, collection)
        .iter_mut()
        .find(|item| id_of(item).as_deref() == Some(id))
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (decode(key), decode(value)))
        .collect()
}

fn json_body(body: &RequestBody) -> Option<Value> {
    match body {
        RequestBody::Json(bytes) => serde_json::from_slice(bytes).ok(),
        _ => None,
    }
}

fn uploaded_file(body: &RequestBody) -> Option<Value> {
    let RequestBody::Multipart(form) = body else {
        return None;
    };
    match form.part("file")? {
        FormPart::File { filename, data, .. } => {
            let stored = format!("upload-{}", filename);
            Some(json!({
                "fileUrl": format!("/uploads/{}", stored),
                "filename": stored,
                "originalName": filename,
                "size": data.len(),
            }))
        }
        FormPart::Text { .. } => None,
    }
}

fn export_csv(items: &[Value]) -> String {
    let mut csv = String::from("id,name\n");
    for item in items {
        let name = ["name", "customerName", "title"]
            .iter()
            .find_map(|key| item.get(*key).and_then(Value::as_str))
            .unwrap_or_default();
        csv.push_str(&format!("{},{}\n", id_of(item).unwrap_or_default(), name));
    }
    csv
}

fn raw_response(status_code: u16, body: Vec<u8>) -> NetworkResponse {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    NetworkResponse {
        status_code,
        headers,
        body,
    }
}

fn ok(body: Value) -> NetworkResponse {
    raw_response(200, body.to_string().into_bytes())
}

fn created(body: Value) -> NetworkResponse {
    raw_response(201, body.to_string().into_bytes())
}

fn error(status: u16, message: &str) -> NetworkResponse {
    raw_response(status, json!({"error": message}).to_string().into_bytes())
}

/// Literal storefront data the mock backend is seeded with
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn products() -> Value {
        json!([
            {
                "id": "1",
                "name": "T-shirt Premium",
                "price": 29.99,
                "description": "T-shirt en coton bio de haute qualité",
                "longDescription": "Un t-shirt confortable et durable, parfait pour tous les jours.",
                "category": "Vêtements",
                "stock": 50,
                "images": ["/uploads/product-1-1.jpg"],
                "video": "/uploads/product-1-video.mp4",
                "features": ["Coton bio", "Confortable", "Durable"],
                "specifications": {"material": "100% Coton bio", "weight": "180g/m²"},
                "rating": 4.5,
                "sales": 125
            },
            {
                "id": "2",
                "name": "Casque Audio Pro",
                "price": 89.99,
                "description": "Casque audio sans fil avec réduction de bruit",
                "category": "Électronique",
                "stock": 25,
                "images": ["/uploads/product-2-1.jpg"],
                "rating": 4.8,
                "sales": 89
            },
            {
                "id": "3",
                "name": "montre Connectée",
                "price": 129.5,
                "description": "Montre intelligente avec suivi d'activité",
                "category": "Électronique",
                "stock": 8,
                "images": [],
                "sales": 28
            }
        ])
    }

    pub fn orders() -> Value {
        json!([
            {
                "id": "ORD-001",
                "customerName": "Jean Dupont",
                "customerEmail": "jean.dupont@email.com",
                "total": 89.99,
                "status": "processing",
                "items": [
                    {"productId": "1", "productName": "T-shirt Premium", "quantity": 2, "price": 29.99},
                    {"productId": "2", "productName": "Casque Audio Pro", "quantity": 1, "price": 29.99}
                ],
                "createdAt": "2024-06-03T09:15:00Z",
                "updatedAt": "2024-06-03T09:15:00Z",
                "shippingAddress": "123 Rue de la Paix, 75001 Paris",
                "paymentMethod": "Carte bancaire"
            },
            {
                "id": "ORD-002",
                "customerName": "Marie Martin",
                "customerEmail": "marie.martin@email.com",
                "total": 129.5,
                "status": "delivered",
                "items": [
                    {"productId": "3", "productName": "Montre Connectée", "quantity": 1, "price": 129.5}
                ],
                "createdAt": "2024-06-02T14:30:00Z",
                "updatedAt": "2024-06-02T14:30:00Z",
                "shippingAddress": "456 Avenue des Champs, 69000 Lyon",
                "paymentMethod": "PayPal"
            },
            {
                "id": "ORD-003",
                "customerName": "Pierre Durand",
                "customerEmail": "pierre.durand@email.com",
                "total": 45.0,
                "status": "pending",
                "items": [
                    {"productId": "4", "productName": "Sac à dos", "quantity": 1, "price": 45.0}
                ],
                "createdAt": "2024-06-01T11:00:00Z",
                "updatedAt": "2024-06-01T11:00:00Z",
                "shippingAddress": "789 Boulevard Central, 13000 Marseille",
                "paymentMethod": "Carte bancaire"
            }
        ])
    }

    pub fn customers() -> Value {
        json!([
            {
                "id": "1",
                "name": "Jean Dupont",
                "email": "jean.dupont@email.com",
                "phone": "+33 6 12 34 56 78",
                "address": "123 Rue de la Paix",
                "city": "Paris",
                "country": "France",
                "totalOrders": 5,
                "totalSpent": 450.75,
                "lastOrder": "2024-06-03T09:15:00Z",
                "createdAt": "2024-05-04T10:00:00Z",
                "status": "active"
            },
            {
                "id": "2",
                "name": "Marie Martin",
                "email": "marie.martin@email.com",
                "phone": "+33 6 98 76 54 32",
                "address": "456 Avenue des Champs",
                "city": "Lyon",
                "country": "France",
                "totalOrders": 3,
                "totalSpent": 289.5,
                "lastOrder": "2024-05-27T16:45:00Z",
                "createdAt": "2024-04-19T10:00:00Z",
                "status": "active"
            },
            {
                "id": "3",
                "name": "Pierre Durand",
                "email": "pierre.durand@email.com",
                "phone": "+33 6 11 22 33 44",
                "address": "789 Boulevard Central",
                "city": "Marseille",
                "country": "France",
                "totalOrders": 1,
                "totalSpent": 89.99,
                "lastOrder": "2024-05-19T08:20:00Z",
                "createdAt": "2024-04-04T10:00:00Z",
                "status": "inactive"
            }
        ])
    }

    pub fn pages() -> Value {
        json!([
            {
                "id": "home",
                "title": "Accueil",
                "heroTitle": "Bienvenue",
                "heroSubtitle": "Découvrez nos produits",
                "heroImage": "/uploads/hero.jpg",
                "sections": []
            },
            {
                "id": "about",
                "title": "À propos",
                "content": "Notre histoire commence en 2020.",
                "image": "/uploads/about.jpg"
            },
            {
                "id": "contact",
                "title": "Contact",
                "address": "123 Rue de la Paix, 75001 Paris",
                "phone": "+33 1 23 45 67 89",
                "email": "contact@boutique.fr",
                "hours": "Lun-Ven 9h-18h"
            }
        ])
    }

    pub fn media() -> Value {
        json!([
            {
                "id": "1",
                "fileUrl": "/uploads/product-1-1.jpg",
                "filename": "product-1-1.jpg",
                "originalName": "tshirt.jpg",
                "size": 245760
            },
            {
                "id": "2",
                "fileUrl": "/uploads/product-1-video.mp4",
                "filename": "product-1-video.mp4",
                "originalName": "tshirt-demo.mp4",
                "size": 5242880
            }
        ])
    }

    pub fn settings() -> Value {
        json!({
            "siteName": "Ma Boutique",
            "siteDescription": "Boutique en ligne de produits de qualité",
            "logo": "/uploads/logo.png",
            "favicon": "/uploads/favicon.ico",
            "primaryColor": "#3B82F6",
            "secondaryColor": "#1F2937",
            "footerText": "© 2024 Ma Boutique",
            "seoTitle": "Ma Boutique - Produits de qualité",
            "seoDescription": "Découvrez notre sélection",
            "seoKeywords": "boutique, mode, électronique"
        })
    }

    pub fn social_media() -> Value {
        json!({
            "facebook": "https://facebook.com/maboutique",
            "instagram": "https://instagram.com/maboutique"
        })
    }

    pub fn stats() -> Value {
        json!({
            "totalSales": 12450.75,
            "totalOrders": 156,
            "totalCustomers": 89,
            "totalProducts": 24,
            "recentOrders": [
                {"id": "ORD-001", "customerName": "Jean Dupont", "total": 89.99, "status": "processing", "createdAt": "2024-06-03T09:15:00Z"},
                {"id": "ORD-002", "customerName": "Marie Martin", "total": 129.5, "status": "delivered", "createdAt": "2024-06-02T14:30:00Z"}
            ],
            "lowStockProducts": [
                {"id": "3", "name": "Montre Connectée", "stock": 8},
                {"id": "4", "name": "Sac à dos", "stock": 3}
            ]
        })
    }

    pub fn analytics() -> Value {
        json!({
            "totalSales": 12450.75,
            "totalOrders": 156,
            "totalCustomers": 89,
            "conversionRate": 3.2,
            "averageOrderValue": 79.81,
            "topProducts": [
                {"name": "T-shirt Premium", "sales": 45, "revenue": 1349.55},
                {"name": "Casque Audio Pro", "sales": 32, "revenue": 2879.68},
                {"name": "Montre Connectée", "sales": 28, "revenue": 3626.0}
            ],
            "salesByMonth": [
                {"month": "Avr", "sales": 9800.0},
                {"month": "Mai", "sales": 11200.0},
                {"month": "Juin", "sales": 12450.75}
            ],
            "customerGrowth": [
                {"month": "Avr", "customers": 70},
                {"month": "Mai", "customers": 81},
                {"month": "Juin", "customers": 89}
            ]
        })
    }
}
