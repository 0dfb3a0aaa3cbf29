// src/platform/native.rs - reqwest-backed transport

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::platform::network::{
    FormPart, HttpMethod, MultipartForm, NetworkArc, NetworkProvider, NetworkRequest,
    NetworkResponse, RequestBody,
};

/// Creates the default transport for native builds
pub fn create_network() -> NetworkArc {
    Arc::new(NativeNetwork::new())
}

/// Native network implementation
#[derive(Debug, Clone, Default)]
pub struct NativeNetwork {
    client: reqwest::Client,
}

impl NativeNetwork {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn build_form(form: MultipartForm) -> Result<reqwest::multipart::Form> {
    let mut multipart = reqwest::multipart::Form::new();

    for part in form.parts {
        multipart = match part {
            FormPart::Text { name, value } => multipart.text(name, value),
            FormPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                let mut file_part = reqwest::multipart::Part::bytes(data).file_name(filename);
                if let Some(mime) = content_type {
                    file_part = file_part.mime_str(&mime).map_err(|e| {
                        Error::platform("native", "network", format!("Invalid content type {}: {}", mime, e))
                    })?;
                }
                multipart.part(name, file_part)
            }
        };
    }

    Ok(multipart)
}

#[async_trait]
impl NetworkProvider for NativeNetwork {
    async fn request(&self, request: NetworkRequest) -> Result<NetworkResponse> {
        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Json(bytes) => req.body(bytes),
            // reqwest writes the multipart Content-Type with its boundary
            RequestBody::Multipart(form) => req.multipart(build_form(form)?),
        };

        let response = req
            .send()
            .await
            .map_err(|e| Error::network(request.url.clone(), error_chain(&e)))?;

        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                Error::network(
                    request.url.clone(),
                    format!("Failed to read response body: {}", error_chain(&e)),
                )
            })?
            .to_vec();

        tracing::trace!(url = %request.url, status_code, bytes = body.len(), "response received");

        Ok(NetworkResponse {
            status_code,
            headers,
            body,
        })
    }
}

/// Display of `error` followed by each underlying source, joined with `": "`.
/// reqwest's own message only names the URL; the cause sits further down.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
