//! REST client for the catalog service

use super::{BackendResult, CatalogBackend};
use crate::config::ClientConfig;
use crate::error::{BackendError, ConfigError};
use crate::types::{BookFields, BookRecord, CoverFile};
use async_trait::async_trait;
use core::time::Duration;
use reqwest::multipart::{Form, Part};
use reqwest::{header, ClientBuilder, Method, Response, StatusCode};
use serde::Deserialize;
use urlencoding::encode;

/// Catalog backend reached over HTTP
pub struct HttpBackend {
    /// Shared client so connections are pooled across requests
    http_client: reqwest::Client,
    config: ClientConfig,
}

/// Error body shapes the service may answer with
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ClientBuilder::new()
            .user_agent(concat!("shelf/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn book_url(&self, id: &str) -> String {
        self.config.endpoint(&format!("books/{}", encode(id)))
    }

    fn save_form(fields: BookFields, cover: Option<CoverFile>) -> BackendResult<Form> {
        let mut form = Form::new();
        for (name, value) in fields.form_parts() {
            form = form.text(name, value);
        }
        if let Some(cover) = cover {
            let part = Part::bytes(cover.bytes)
                .file_name(cover.file_name)
                .mime_str(&cover.mime_type)
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            form = form.part("cover", part);
        }
        Ok(form)
    }

    async fn send_save(
        &self,
        method: Method,
        url: String,
        fields: BookFields,
        cover: Option<CoverFile>,
    ) -> BackendResult<BookRecord> {
        let form = Self::save_form(fields, cover)?;
        let response = self
            .http_client
            .request(method, url)
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response, None).await?;
        Ok(response.json::<BookRecord>().await?)
    }
}

/// Turn a non-success response into a [`BackendError`].
/// `id` maps a 404 to `NotFound` for per-book endpoints.
async fn check_status(response: Response, id: Option<&str>) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(BackendError::NotFound(id.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// The service's own wording: a JSON `error`/`message` field, else the body
/// text, else the status reason
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.message) {
            return message;
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    async fn list_books(&self, search_text: &str) -> BackendResult<Vec<BookRecord>> {
        let response = self
            .http_client
            .get(self.config.endpoint("books"))
            .query(&[("search", search_text)])
            .send()
            .await?;
        let response = check_status(response, None).await?;
        Ok(response.json::<Vec<BookRecord>>().await?)
    }

    async fn create_book(
        &self,
        fields: BookFields,
        cover: Option<CoverFile>,
    ) -> BackendResult<BookRecord> {
        self.send_save(Method::POST, self.config.endpoint("books"), fields, cover)
            .await
    }

    async fn update_book(
        &self,
        id: &str,
        fields: BookFields,
        cover: Option<CoverFile>,
    ) -> BackendResult<BookRecord> {
        self.send_save(Method::PUT, self.book_url(id), fields, cover)
            .await
            .map_err(|e| match e {
                BackendError::Status { status: 404, .. } => BackendError::NotFound(id.to_string()),
                other => other,
            })
    }

    async fn delete_book(&self, id: &str) -> BackendResult<()> {
        let response = self.http_client.delete(self.book_url(id)).send().await?;
        check_status(response, Some(id)).await?;
        Ok(())
    }

    async fn download_book(&self, id: &str) -> BackendResult<Vec<u8>> {
        let url = format!("{}/download", self.book_url(id));
        let response = self.http_client.get(url).send().await?;
        let response = check_status(response, Some(id)).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
