use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::StatusCode;
use tracing::debug;
use ureq::Agent;

use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::field::{Field, FieldList};

/// Operations the field resource needs from the fields API.
///
/// Implementations take `&self`: callers share one handle across lifecycle
/// calls and never mutate it.
pub trait FieldClient {
    /// Resolves a field name to its id. Fails with [`ClientError::NotFound`]
    /// when no field carries that name.
    fn find_field_id(&self, name: &str) -> Result<String, ClientError>;

    /// `Ok(None)` means the server has no field with this id.
    fn get_field(&self, id: &str) -> Result<Option<Field>, ClientError>;

    /// Returns the id the server assigned.
    fn create_field(&self, field: &Field) -> Result<String, ClientError>;

    fn enable_field(&self, id: &str) -> Result<(), ClientError>;

    fn disable_field(&self, id: &str) -> Result<(), ClientError>;

    fn delete_field(&self, id: &str) -> Result<(), ClientError>;
}

/// Blocking client for the fields REST API.
pub struct HttpClient {
    agent: Agent,
    endpoint: Endpoint,
    authorization: String,
}

impl HttpClient {
    const TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(endpoint: Endpoint, access_id: &str, access_key: &str) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Self::TIMEOUT))
            .build();
        let credentials = STANDARD.encode(format!("{access_id}:{access_key}"));
        Self {
            agent: config.into(),
            endpoint,
            authorization: format!("Basic {credentials}"),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn request(
        &self,
        method: http::Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Vec<u8>), ClientError> {
        let url = self.endpoint.url(path);
        debug!(%method, %url, "sending request");

        let auth = self.authorization.as_str();
        let json = "application/json";
        let mut response = match (method, body) {
            (http::Method::GET, _) => self
                .agent
                .get(&url)
                .header("authorization", auth)
                .header("accept", json)
                .call()?,
            (http::Method::DELETE, _) => self
                .agent
                .delete(&url)
                .header("authorization", auth)
                .header("accept", json)
                .call()?,
            (http::Method::POST, Some(bytes)) => self
                .agent
                .post(&url)
                .header("authorization", auth)
                .header("content-type", json)
                .send(&bytes[..])?,
            (http::Method::POST, None) => self
                .agent
                .post(&url)
                .header("authorization", auth)
                .send_empty()?,
            (http::Method::PUT, Some(bytes)) => self
                .agent
                .put(&url)
                .header("authorization", auth)
                .header("content-type", json)
                .send(&bytes[..])?,
            (http::Method::PUT, None) => self
                .agent
                .put(&url)
                .header("authorization", auth)
                .send_empty()?,
            (other, _) => {
                return Err(ClientError::Transport(format!(
                    "unsupported method: {other}"
                )));
            }
        };

        let status = response.status();
        let bytes = response.body_mut().read_to_vec()?;
        Ok((status, bytes))
    }

    fn expect_ok(&self, method: http::Method, path: &str) -> Result<(), ClientError> {
        let (status, body) = self.request(method, path, None)?;
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, &body))
        }
    }
}

impl FieldClient for HttpClient {
    fn find_field_id(&self, name: &str) -> Result<String, ClientError> {
        let (status, body) = self.request(http::Method::GET, "v1/fields", None)?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        let list: FieldList = serde_json::from_slice(&body)?;
        list.data
            .into_iter()
            .find(|f| f.field_name == name)
            .map(|f| f.field_id)
            .ok_or_else(|| ClientError::NotFound(name.to_string()))
    }

    fn get_field(&self, id: &str) -> Result<Option<Field>, ClientError> {
        let (status, body) = self.request(http::Method::GET, &field_path(id, ""), None)?;
        match status {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(serde_json::from_slice(&body)?)),
            s => Err(api_error(s, &body)),
        }
    }

    fn create_field(&self, field: &Field) -> Result<String, ClientError> {
        let payload = serde_json::to_vec(field)?;
        let (status, body) = self.request(http::Method::POST, "v1/fields", Some(payload))?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        let created: Field = serde_json::from_slice(&body)?;
        Ok(created.field_id)
    }

    fn enable_field(&self, id: &str) -> Result<(), ClientError> {
        self.expect_ok(http::Method::PUT, &field_path(id, "/enable"))
    }

    fn disable_field(&self, id: &str) -> Result<(), ClientError> {
        self.expect_ok(http::Method::DELETE, &field_path(id, "/disable"))
    }

    fn delete_field(&self, id: &str) -> Result<(), ClientError> {
        self.expect_ok(http::Method::DELETE, &field_path(id, ""))
    }
}

/// `v1/fields/{id}{suffix}` with the id encoded as a single path segment.
fn field_path(id: &str, suffix: &str) -> String {
    format!("v1/fields/{}{suffix}", urlencoding::encode(id))
}

/// Builds an [`ClientError::Api`], preferring the first message of the API's
/// `{"errors":[{"message":..}]}` envelope over the raw body.
fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["errors"][0]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
    ClientError::Api { status, message }
}
