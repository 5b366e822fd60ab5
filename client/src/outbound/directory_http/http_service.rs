//! Reqwest-backed Remote Directory Service adapter.
//!
//! This adapter owns transport details only: URL construction, request
//! serialisation, optional timeout, HTTP error mapping and JSON decoding into
//! domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use tracing::debug;

use super::dto::{UserPayloadDto, UserRowDto};
use crate::domain::ports::{DirectoryService, DirectoryServiceError};
use crate::domain::{UserKey, UserRecord};

const DEFAULT_USER_AGENT: &str = "user-directory/0.1";

/// The two base locations the directory is reached through.
///
/// Listing uses a standalone URL; writes and deletes go to
/// `{api_base_url}/api/users[/{key}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEndpoints {
    /// Absolute URL answering the list call.
    pub list_url: Url,
    /// Base URL that `/api/users` routes are joined onto.
    pub api_base_url: Url,
}

/// Directory adapter performing one HTTP request per port call.
pub struct HttpDirectoryService {
    client: Client,
    endpoints: DirectoryEndpoints,
}

impl HttpDirectoryService {
    /// Build an adapter, optionally bounding every request by `timeout`.
    ///
    /// Without a timeout a request may wait indefinitely.
    /// ```rust,ignore
    /// let service = HttpDirectoryService::new(endpoints, Some(Duration::from_secs(5)));
    /// assert!(service.is_ok() || service.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoints: DirectoryEndpoints,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoints,
        })
    }

    /// Endpoints this adapter talks to.
    pub fn endpoints(&self) -> &DirectoryEndpoints {
        &self.endpoints
    }

    fn users_url(&self) -> Result<Url, DirectoryServiceError> {
        api_url(&self.endpoints.api_base_url, None)
    }

    fn user_url(&self, key: &UserKey) -> Result<Url, DirectoryServiceError> {
        api_url(&self.endpoints.api_base_url, Some(key))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "directory request");
        self.client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, DirectoryServiceError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(status = status.as_u16(), bytes = body.len(), "directory response");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl DirectoryService for HttpDirectoryService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryServiceError> {
        let body = self
            .send(self.request(Method::GET, self.endpoints.list_url.clone()))
            .await?;
        parse_users(&body)
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), DirectoryServiceError> {
        let request = self
            .request(Method::POST, self.users_url()?)
            .json(&UserPayloadDto::from(user));
        self.send(request).await.map(drop)
    }

    async fn update_user(
        &self,
        key: &UserKey,
        user: &UserRecord,
    ) -> Result<(), DirectoryServiceError> {
        let request = self
            .request(Method::PUT, self.user_url(key)?)
            .json(&UserPayloadDto::from(user));
        self.send(request).await.map(drop)
    }

    async fn delete_user(&self, key: &UserKey) -> Result<(), DirectoryServiceError> {
        let request = self.request(Method::DELETE, self.user_url(key)?);
        self.send(request).await.map(drop)
    }
}

/// Join `api/users[/{key}]` onto `base`, percent-encoding the key as a single
/// path segment.
///
/// Keys `.` and `..` are dot segments that URL normalisation removes, so they
/// cannot name a record and are rejected.
fn api_url(base: &Url, key: Option<&UserKey>) -> Result<Url, DirectoryServiceError> {
    if let Some(key) = key.filter(|key| matches!(key.as_str(), "." | "..")) {
        return Err(DirectoryServiceError::rejected(format!(
            "user key {:?} cannot be sent as a path segment",
            key.as_str()
        )));
    }
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|()| {
            DirectoryServiceError::rejected(format!("base URL {base} cannot carry a path"))
        })?;
        segments.pop_if_empty().extend(["api", "users"]);
        if let Some(key) = key {
            segments.push(key.as_str());
        }
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn parse_users(body: &[u8]) -> Result<Vec<UserRecord>, DirectoryServiceError> {
    let rows: Vec<UserRowDto> = serde_json::from_slice(body).map_err(|error| {
        DirectoryServiceError::decode(format!("invalid user list payload: {error}"))
    })?;
    Ok(rows.into_iter().map(UserRecord::from).collect())
}

fn map_transport_error(error: reqwest::Error) -> DirectoryServiceError {
    if error.is_timeout() {
        DirectoryServiceError::timeout(error.to_string())
    } else if error.is_decode() {
        DirectoryServiceError::decode(error.to_string())
    } else {
        DirectoryServiceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DirectoryServiceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => DirectoryServiceError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            DirectoryServiceError::timeout(message)
        }
        _ if status.is_client_error() => DirectoryServiceError::rejected(message),
        _ => DirectoryServiceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
