mod config;
mod error;
mod logging;
pub mod resource;
pub mod schema;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use logging::init_logging;
pub use resource::{FieldAttributes, FieldResource, ResourceData};
pub use schema::{FIELD_RESOURCE, field_schema};
