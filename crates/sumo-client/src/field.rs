use serde::{Deserialize, Serialize};

/// A field as the fields API represents it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field_id: String,
    pub field_name: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
}

/// Body of `GET v1/fields`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldList {
    pub data: Vec<Field>,
}
