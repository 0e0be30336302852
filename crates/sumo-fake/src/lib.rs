mod error;
mod http;
mod server;

pub use error::ApiError;
pub use http::{FieldsApi, StoredField};
pub use server::{serve, spawn};
