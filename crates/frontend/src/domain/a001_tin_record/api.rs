use contracts::domain::a001_tin_record::{TinRecord, TinRecordDto, TinRecordId};
use contracts::shared::api_error::ApiErrorBody;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use thiserror::Error;

use super::mutation::Mutation;
use crate::shared::api_utils::bearer;

/// Failure of a call to the TIN service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Failed to send request: {0}")]
    Network(String),

    #[error("Request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

impl RequestError {
    /// Message supplied by the service, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RequestError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Server message when present, otherwise the operation-specific fallback
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[derive(Serialize)]
struct EmptyBody {}

/// Authenticated access to `/tins`. Built from the session and handed to the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TinApiClient {
    base_url: String,
    access_token: String,
}

impl TinApiClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/tins", self.base_url)
    }

    fn record_url(&self, id: &TinRecordId, action: Option<&str>) -> String {
        let encoded = urlencoding::encode(id.as_str());
        match action {
            Some(action) => format!("{}/tins/{}/{}", self.base_url, encoded, action),
            None => format!("{}/tins/{}", self.base_url, encoded),
        }
    }

    fn auth_header(&self) -> String {
        bearer(&self.access_token)
    }

    /// Fetch the caller-scoped collection
    pub async fn list(&self) -> Result<Vec<TinRecord>, RequestError> {
        let response = Request::get(&self.collection_url())
            .header("Authorization", &self.auth_header())
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        ensure_success(response)
            .await?
            .json::<Vec<TinRecord>>()
            .await
            .map_err(|e| RequestError::Decode(e.to_string()))
    }

    pub async fn create(&self, dto: &TinRecordDto) -> Result<(), RequestError> {
        let request = Request::post(&self.collection_url())
            .header("Authorization", &self.auth_header())
            .json(dto)
            .map_err(|e| RequestError::Serialize(e.to_string()))?;
        send(request).await
    }

    pub async fn update(&self, id: &TinRecordId, dto: &TinRecordDto) -> Result<(), RequestError> {
        let request = Request::put(&self.record_url(id, None))
            .header("Authorization", &self.auth_header())
            .json(dto)
            .map_err(|e| RequestError::Serialize(e.to_string()))?;
        send(request).await
    }

    pub async fn activate(&self, id: &TinRecordId) -> Result<(), RequestError> {
        self.put_action(id, "activate").await
    }

    pub async fn deactivate(&self, id: &TinRecordId) -> Result<(), RequestError> {
        self.put_action(id, "deactivate").await
    }

    pub async fn delete(&self, id: &TinRecordId) -> Result<(), RequestError> {
        let response = Request::delete(&self.record_url(id, None))
            .header("Authorization", &self.auth_header())
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;
        ensure_success(response).await.map(|_| ())
    }

    /// Dispatch a confirmed mutation to its endpoint
    pub async fn execute(&self, mutation: &Mutation) -> Result<(), RequestError> {
        match mutation {
            Mutation::Create(dto) => self.create(dto).await,
            Mutation::Update { id, dto } => self.update(id, dto).await,
            Mutation::Activate(id) => self.activate(id).await,
            Mutation::Deactivate(id) => self.deactivate(id).await,
            Mutation::Delete(id) => self.delete(id).await,
        }
    }

    async fn put_action(&self, id: &TinRecordId, action: &str) -> Result<(), RequestError> {
        let request = Request::put(&self.record_url(id, Some(action)))
            .header("Authorization", &self.auth_header())
            .json(&EmptyBody {})
            .map_err(|e| RequestError::Serialize(e.to_string()))?;
        send(request).await
    }
}

// The body of a successful mutation is not read: the store re-fetches afterwards.
async fn send(request: Request) -> Result<(), RequestError> {
    let response = request
        .send()
        .await
        .map_err(|e| RequestError::Network(e.to_string()))?;
    ensure_success(response).await.map(|_| ())
}

async fn ensure_success(response: Response) -> Result<Response, RequestError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(RequestError::Status {
        status,
        message: ApiErrorBody::parse(&body).message().map(str::to_string),
    })
}
