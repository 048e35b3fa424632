use std::fmt;

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::{models::Collection, utils::fmt_error_chain};

// Client for the workshop REST api
#[derive(Clone, Debug)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Error)]
pub enum ClientError {
    #[error("Failed to reach the workshop api")]
    RequestError(#[from] reqwest::Error),
    #[error("Server answered {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Invalid record data")]
    InvalidData(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::ApiError { status: 404, .. })
    }
}

impl fmt::Debug for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_error_chain(f, self)
    }
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<ApiClient, ClientError> {
        let http_client = Client::builder().build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url<R: Collection>(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    fn record_url<R: Collection>(&self, id: i32) -> String {
        format!("{}/{}/{}", self.base_url, R::PATH, id)
    }

    #[tracing::instrument("Fetching collection", skip(self), fields(collection = R::PATH))]
    pub async fn list<R: Collection>(&self) -> Result<Vec<R>, ClientError> {
        let response = self.http_client.get(self.collection_url::<R>()).send().await?;
        read_json(response).await
    }

    #[tracing::instrument("Fetching record", skip(self), fields(collection = R::PATH))]
    pub async fn get<R: Collection>(&self, id: i32) -> Result<R, ClientError> {
        let response = self.http_client.get(self.record_url::<R>(id)).send().await?;
        read_json(response).await
    }

    #[tracing::instrument("Creating record", skip_all, fields(collection = R::PATH))]
    pub async fn create<R: Collection>(&self, payload: &R::Payload) -> Result<R, ClientError> {
        let response = self
            .http_client
            .post(self.collection_url::<R>())
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    #[tracing::instrument("Updating record", skip(self, payload), fields(collection = R::PATH))]
    pub async fn update<R: Collection>(
        &self,
        id: i32,
        payload: &R::Payload,
    ) -> Result<R, ClientError> {
        let response = self
            .http_client
            .put(self.record_url::<R>(id))
            .json(payload)
            .send()
            .await?;
        read_json(response).await
    }

    /// Returns the server's confirmation message.
    #[tracing::instrument("Deleting record", skip(self), fields(collection = R::PATH))]
    pub async fn delete<R: Collection>(&self, id: i32) -> Result<String, ClientError> {
        let response = self.http_client.delete(self.record_url::<R>(id)).send().await?;
        let body: MessageBody = read_json(response).await?;
        Ok(body.message)
    }

    /// Form submission: updates the record being edited, or creates a new
    /// one when nothing is being edited.
    pub async fn save<R: Collection>(
        &self,
        editing: Option<&R>,
        payload: &R::Payload,
    ) -> Result<R, ClientError> {
        match editing {
            Some(record) => self.update::<R>(record.id(), payload).await,
            None => self.create::<R>(payload).await,
        }
    }

    /// Loads the record, overlays `changes` on its current values and sends
    /// the full field set back.
    pub async fn edit<R: Collection>(
        &self,
        id: i32,
        changes: serde_json::Value,
    ) -> Result<R, ClientError> {
        let current = self.get::<R>(id).await?;
        let payload = merge_payload::<R>(&current, changes)?;
        self.save(Some(&current), &payload).await
    }
}

pub fn merge_payload<R: Collection>(
    current: &R,
    changes: serde_json::Value,
) -> Result<R::Payload, ClientError> {
    let mut form = serde_json::to_value(current.payload())?;

    if let (Some(fields), serde_json::Value::Object(changes)) = (form.as_object_mut(), changes) {
        for (key, value) in changes {
            fields.insert(key, value);
        }
    }

    Ok(serde_json::from_value(form)?)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::ApiError {
        status: status.as_u16(),
        message,
    })
}
