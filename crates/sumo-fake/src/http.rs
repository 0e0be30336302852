use std::collections::BTreeMap;
use std::sync::Mutex;

use http::{Method, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredField {
    pub field_id: String,
    pub field_name: String,
    pub data_type: String,
    pub state: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody {
    field_name: String,
    #[serde(default)]
    data_type: String,
}

#[derive(Default)]
struct Inner {
    fields: BTreeMap<String, StoredField>,
    next_id: u64,
    requests: Vec<String>,
}

/// In-memory stand-in for the fields API. Paths are served under `/api/`.
#[derive(Default)]
pub struct FieldsApi {
    inner: Mutex<Inner>,
}

impl FieldsApi {
    const DEFAULT_DATA_TYPE: &'static str = "String";

    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a field directly, bypassing the request log.
    pub fn insert(&self, field: StoredField) {
        let mut inner = self.lock();
        inner.fields.insert(field.field_id.clone(), field);
    }

    pub fn field(&self, id: &str) -> Option<StoredField> {
        self.lock().fields.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every request handled so far, as `"METHOD /path"`.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn handle(&self, req: Request<Vec<u8>>) -> Response<Vec<u8>> {
        let method = req.method().clone();
        let path = req.uri().path().trim_end_matches('/').to_string();
        self.lock().requests.push(format!("{method} {path}"));

        let Some(rest) = path
            .strip_prefix("/api/v1/fields")
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        else {
            return json_response(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#);
        };
        let segments: Vec<String> = match rest
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::decode(s).map(|d| d.into_owned()))
            .collect()
        {
            Ok(segments) => segments,
            Err(e) => {
                let err = ApiError::BadRequest(e.to_string());
                return json_response(err.status_code(), err.to_body().to_string());
            }
        };
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        let result = match (&method, segments.as_slice()) {
            (&Method::GET, []) => self.list(),
            (&Method::POST, []) => self.create(req.body()),
            (&Method::GET, [id]) => self.get(id),
            (&Method::DELETE, [id]) => self.delete(id),
            (&Method::PUT, [id, "enable"]) => self.set_state(id, "Enabled"),
            (&Method::DELETE, [id, "disable"]) => self.set_state(id, "Disabled"),
            _ => return json_response(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#),
        };

        match result {
            Ok((status, body)) => json_response(status, body),
            Err(e) => json_response(e.status_code(), e.to_body().to_string()),
        }
    }

    fn list(&self) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let inner = self.lock();
        let data: Vec<&StoredField> = inner.fields.values().collect();
        Ok((StatusCode::OK, to_vec(&serde_json::json!({ "data": data }))?))
    }

    fn get(&self, id: &str) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let inner = self.lock();
        let field = inner
            .fields
            .get(id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        Ok((StatusCode::OK, to_vec(field)?))
    }

    fn create(&self, body: &[u8]) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let body: CreateBody =
            serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
        if body.field_name.is_empty() {
            return Err(ApiError::BadRequest("fieldName must not be empty".into()));
        }

        let mut inner = self.lock();
        if inner.fields.values().any(|f| f.field_name == body.field_name) {
            return Err(ApiError::Duplicate(body.field_name));
        }

        inner.next_id += 1;
        let field = StoredField {
            field_id: format!("{:016X}", inner.next_id),
            field_name: body.field_name,
            data_type: if body.data_type.is_empty() {
                Self::DEFAULT_DATA_TYPE.to_string()
            } else {
                body.data_type
            },
            state: "Enabled".into(),
        };
        let bytes = to_vec(&field)?;
        inner.fields.insert(field.field_id.clone(), field);
        Ok((StatusCode::OK, bytes))
    }

    fn delete(&self, id: &str) -> Result<(StatusCode, Vec<u8>), ApiError> {
        self.lock()
            .fields
            .remove(id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        Ok((StatusCode::NO_CONTENT, Vec::new()))
    }

    fn set_state(&self, id: &str, state: &str) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let mut inner = self.lock();
        let field = inner
            .fields
            .get_mut(id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        field.state = state.to_string();
        Ok((StatusCode::NO_CONTENT, Vec::new()))
    }
}

fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn json_response(status: StatusCode, body: impl Into<Vec<u8>>) -> Response<Vec<u8>> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}
