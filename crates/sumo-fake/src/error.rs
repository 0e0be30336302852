#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("field with id {0} does not exist")]
    NotFound(String),

    #[error("field with name '{0}' already exists")]
    Duplicate(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            ApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) | ApiError::BadRequest(_) => http::StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "field:doesnt_exist",
            ApiError::Duplicate(_) => "field:already_exists",
            ApiError::BadRequest(_) => "field:invalid",
        }
    }

    /// The API's error envelope: `{"id": .., "errors": [{"code": .., "message": ..}]}`.
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "id": "FAKE",
            "errors": [{ "code": self.code(), "message": self.to_string() }],
        })
    }
}
