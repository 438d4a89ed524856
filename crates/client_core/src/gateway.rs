use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode, Url};
use shared::{
    domain::{Pitcher, Roster},
    error::ApiErrorBody,
    protocol::{HealthStatus, RosterQuery, UploadAck},
};
use thiserror::Error;
use tracing::{info, warn};

pub const PITCHERS_PATH: &str = "/api/pitchers";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const HEALTH_PATH: &str = "/api/health";
pub const UPLOAD_FIELD: &str = "file";
const CSV_MIME: &str = "text/csv";
const DEFAULT_UPLOAD_FILENAME: &str = "upload.csv";
const GENERIC_UPLOAD_FAILURE: &str = "Upload failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Server responded {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("Failed to load pitchers: {0}")]
    Transport(String),
    #[error("Failed to load pitchers: malformed response ({0})")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("{}", .parsed_message.as_deref().unwrap_or(GENERIC_UPLOAD_FAILURE))]
    Http {
        status: u16,
        parsed_message: Option<String>,
    },
    #[error("{0}")]
    Transport(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

/// A CSV selected for upload, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read upload file '{}'", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_UPLOAD_FILENAME.to_string());
        Ok(Self::new(file_name, contents))
    }
}

/// Network boundary of the dashboard. Implementations never touch shared
/// state; they hand results back to the caller.
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn fetch_roster(&self) -> Result<Roster, FetchError> {
        self.fetch_roster_with(&RosterQuery::default()).await
    }
    async fn fetch_roster_with(&self, query: &RosterQuery) -> Result<Roster, FetchError>;
    async fn fetch_pitcher(&self, name: &str) -> Result<Option<Pitcher>, FetchError>;
    async fn health(&self) -> Result<HealthStatus, FetchError>;
    async fn upload(&self, file: &UploadFile) -> Result<UploadAck, UploadError>;
}

pub struct HttpDataGateway {
    http: Client,
    base_url: String,
}

impl HttpDataGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn pitcher_url(&self, name: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.endpoint(PITCHERS_PATH))
            .map_err(|e| FetchError::Transport(format!("invalid api base address: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::Transport(format!(
                    "api base address cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .push(name);
        Ok(url)
    }
}

fn fetch_transport(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.to_string())
}

async fn status_error(response: reqwest::Response) -> FetchError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();
    let detail = ApiErrorBody::parse(&body).and_then(|body| {
        body.first_listed_error()
            .or_else(|| body.first_message())
            .map(str::to_owned)
    });
    FetchError::Status { status, detail }
}

async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, FetchError> {
    let bytes = response.bytes().await.map_err(fetch_transport)?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
}

#[async_trait]
impl DataGateway for HttpDataGateway {
    async fn fetch_roster_with(&self, query: &RosterQuery) -> Result<Roster, FetchError> {
        let mut request = self.http.get(self.endpoint(PITCHERS_PATH));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await.map_err(|err| {
            warn!(base_url = %self.base_url, error = %err, "gateway: roster request failed");
            fetch_transport(err)
        })?;
        if !response.status().is_success() {
            let err = status_error(response).await;
            warn!(base_url = %self.base_url, error = %err, "gateway: roster request rejected");
            return Err(err);
        }
        let roster: Roster = decode_json(response).await?;
        info!(pitchers = roster.len(), "gateway: roster fetched");
        Ok(roster)
    }

    async fn fetch_pitcher(&self, name: &str) -> Result<Option<Pitcher>, FetchError> {
        let url = self.pitcher_url(name)?;
        let response = self.http.get(url).send().await.map_err(fetch_transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            info!(pitcher = name, "gateway: pitcher not found");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        decode_json(response).await.map(Some)
    }

    async fn health(&self) -> Result<HealthStatus, FetchError> {
        let response = self
            .http
            .get(self.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(fetch_transport)?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        decode_json(response).await
    }

    async fn upload(&self, file: &UploadFile) -> Result<UploadAck, UploadError> {
        let part = multipart::Part::bytes(file.contents.clone())
            .file_name(file.file_name.clone())
            .mime_str(CSV_MIME)
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        info!(
            file_name = %file.file_name,
            size_bytes = file.contents.len(),
            "gateway: uploading csv"
        );
        let response = self
            .http
            .post(self.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "gateway: upload transport failure");
                UploadError::Transport(err.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.ok();
        if !status.is_success() {
            let parsed_message = body
                .as_deref()
                .and_then(ApiErrorBody::parse)
                .and_then(|body| body.first_message().map(str::to_owned));
            warn!(
                status = status.as_u16(),
                server_message = parsed_message.as_deref().unwrap_or(GENERIC_UPLOAD_FAILURE),
                "gateway: upload rejected"
            );
            return Err(UploadError::Http {
                status: status.as_u16(),
                parsed_message,
            });
        }

        let ack = body
            .as_deref()
            .and_then(|bytes| serde_json::from_slice::<UploadAck>(bytes).ok())
            .unwrap_or_default();
        info!(
            status = status.as_u16(),
            server_message = ack.message.as_deref().unwrap_or_default(),
            "gateway: upload accepted"
        );
        Ok(ack)
    }
}
