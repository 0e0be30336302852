mod data;
mod field;

pub use data::{FieldAttributes, ResourceData};
pub use field::{FieldResource, FieldState, import, import_into};
