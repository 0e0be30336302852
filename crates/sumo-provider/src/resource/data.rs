use serde::{Deserialize, Deserializer, Serialize};
use sumo_client::Field;

use crate::error::ProviderError;

/// Typed view of a `sumologic_field` block.
///
/// Built once from the framework's untyped attribute document by
/// [`FieldAttributes::bind`]; unset optional and computed attributes are empty
/// strings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FieldAttributes {
    pub field_name: String,

    #[serde(default, deserialize_with = "empty_if_null")]
    pub field_id: String,

    #[serde(default, deserialize_with = "empty_if_null")]
    pub data_type: String,

    /// `Enabled` or `Disabled`. Checked on update, not on bind.
    #[serde(default, deserialize_with = "empty_if_null")]
    pub state: String,
}

fn empty_if_null<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl FieldAttributes {
    pub fn new(field_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }

    pub fn bind(value: &serde_json::Value) -> Result<Self, ProviderError> {
        let attrs = Self::deserialize(value)?;
        if attrs.field_name.is_empty() {
            return Err(ProviderError::Binding("field_name must not be empty".into()));
        }
        Ok(attrs)
    }

    pub fn to_field(&self) -> Field {
        Field {
            field_id: self.field_id.clone(),
            field_name: self.field_name.clone(),
            data_type: self.data_type.clone(),
            state: self.state.clone(),
        }
    }

    /// Overwrites every attribute with the server's view.
    pub fn apply(&mut self, field: Field) {
        self.field_id = field.field_id;
        self.field_name = field.field_name;
        self.data_type = field.data_type;
        self.state = field.state;
    }
}

/// A tracked resource: its identity plus its attributes.
///
/// An empty `id` means the resource is not (or no longer) tracked.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceData {
    #[serde(default)]
    pub id: String,
    pub attributes: FieldAttributes,
}

impl ResourceData {
    pub fn new(attributes: FieldAttributes) -> Self {
        Self {
            id: String::new(),
            attributes,
        }
    }

    /// Binds a `{"id": .., "attributes": {..}}` document.
    pub fn bind(value: &serde_json::Value) -> Result<Self, ProviderError> {
        let id = match value.get("id") {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(ProviderError::Binding(format!("id must be a string, got {other}")));
            }
        };
        let attributes = value
            .get("attributes")
            .ok_or_else(|| ProviderError::Binding("missing attributes".into()))?;
        Ok(Self {
            id,
            attributes: FieldAttributes::bind(attributes)?,
        })
    }

    pub fn is_tracked(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Soft removal: the framework drops the resource from state.
    pub fn clear_id(&mut self) {
        self.id.clear();
    }
}
