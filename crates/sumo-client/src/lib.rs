mod client;
mod endpoint;
mod error;
mod field;

pub use client::{FieldClient, HttpClient};
pub use endpoint::Endpoint;
pub use error::ClientError;
pub use field::{Field, FieldList};
