use std::str::FromStr;

use sumo_client::FieldClient;
use tracing::{debug, info, warn};

use crate::error::ProviderError;
use crate::resource::data::{FieldAttributes, ResourceData};

/// Requested value of the `state` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Enabled,
    Disabled,
}

impl FromStr for FieldState {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enabled" => Ok(FieldState::Enabled),
            "Disabled" => Ok(FieldState::Disabled),
            other => Err(ProviderError::InvalidState(other.to_string())),
        }
    }
}

/// Lifecycle hooks of the `sumologic_field` resource.
///
/// Every hook is a straight translation onto the injected client. A failing
/// hook leaves the `ResourceData` it was handed untouched, except that
/// [`FieldResource::read`] clears the identity when the server no longer
/// has the field.
pub struct FieldResource<'a, C: FieldClient> {
    client: &'a C,
}

impl<'a, C: FieldClient> FieldResource<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// `field_id` when set, otherwise a lookup by `field_name`.
    pub fn resolve(&self, attrs: &FieldAttributes) -> Result<String, ProviderError> {
        if !attrs.field_id.is_empty() {
            return Ok(attrs.field_id.clone());
        }
        debug!(field_name = %attrs.field_name, "resolving field id by name");
        Ok(self.client.find_field_id(&attrs.field_name)?)
    }

    pub fn create(&self, data: &mut ResourceData) -> Result<(), ProviderError> {
        if !data.is_tracked() {
            let field = data.attributes.to_field();
            let id = self.client.create_field(&field)?;
            info!(field_id = %id, field_name = %field.field_name, "field created");
            data.set_id(id.clone());
            data.attributes.field_id = id;
        }
        self.read(data)
    }

    pub fn read(&self, data: &mut ResourceData) -> Result<(), ProviderError> {
        let id = self.resolve(&data.attributes)?;
        match self.client.get_field(&id)? {
            Some(field) => {
                if !data.is_tracked() {
                    data.set_id(id.clone());
                }
                data.attributes.apply(field);
                if data.attributes.field_id.is_empty() {
                    data.attributes.field_id = id;
                }
            }
            None => {
                warn!(field_id = %id, field_name = %data.attributes.field_name, "field not found, removing from state");
                data.clear_id();
            }
        }
        Ok(())
    }

    /// Pushes the requested `state`. Nothing else is ever sent.
    pub fn update(&self, data: &mut ResourceData) -> Result<(), ProviderError> {
        let attrs = &data.attributes;
        let id = self.resolve(attrs)?;
        let current = self
            .client
            .get_field(&id)?
            .ok_or_else(|| ProviderError::Gone(id.clone()))?;

        // Both immutable attributes have to differ before this trips; a lone
        // rename passes through.
        if current.field_name != attrs.field_name && current.data_type != attrs.data_type {
            return Err(ProviderError::ImmutableAttribute);
        }

        match attrs.state.parse::<FieldState>()? {
            FieldState::Enabled => {
                self.client.enable_field(&id)?;
                info!(field_id = %id, "field enabled");
            }
            FieldState::Disabled => {
                self.client.disable_field(&id)?;
                info!(field_id = %id, "field disabled");
            }
        }
        Ok(())
    }

    pub fn delete(&self, data: &mut ResourceData) -> Result<(), ProviderError> {
        let id = self.resolve(&data.attributes)?;
        self.client.delete_field(&id)?;
        info!(field_id = %id, "field deleted");
        Ok(())
    }
}

/// Seeds `field_id` from the import identifier unless already set.
pub fn import_into(data: &mut ResourceData, import_id: &str) {
    data.set_id(import_id);
    if data.attributes.field_id.is_empty() {
        data.attributes.field_id = import_id.to_string();
    }
}

/// Adopts an existing field. The framework reads each returned record next.
pub fn import(import_id: &str) -> Vec<ResourceData> {
    let mut data = ResourceData::default();
    import_into(&mut data, import_id);
    vec![data]
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use http::StatusCode;
    use sumo_client::{ClientError, Field};

    use super::*;

    /// Records every call and serves fields from a map.
    #[derive(Default)]
    struct RecordingClient {
        fields: RefCell<BTreeMap<String, Field>>,
        calls: RefCell<Vec<String>>,
        next_id: Option<&'static str>,
        /// Name of the one operation that answers with a server error.
        failing: Option<&'static str>,
    }

    impl RecordingClient {
        fn with_field(id: &str, name: &str, data_type: &str, state: &str) -> Self {
            let client = Self::default();
            client.fields.borrow_mut().insert(
                id.to_string(),
                Field {
                    field_id: id.into(),
                    field_name: name.into(),
                    data_type: data_type.into(),
                    state: state.into(),
                },
            );
            client
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn failing(mut self, op: &'static str) -> Self {
            self.failing = Some(op);
            self
        }

        /// Logs the call, then fails it if `op` is the failing operation.
        fn record(&self, op: &str, call: String) -> Result<(), ClientError> {
            self.calls.borrow_mut().push(call);
            if self.failing == Some(op) {
                return Err(ClientError::Api {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("{op} failed"),
                });
            }
            Ok(())
        }
    }

    impl FieldClient for RecordingClient {
        fn find_field_id(&self, name: &str) -> Result<String, ClientError> {
            self.record("find_field_id", format!("find_field_id({name})"))?;
            self.fields
                .borrow()
                .values()
                .find(|f| f.field_name == name)
                .map(|f| f.field_id.clone())
                .ok_or_else(|| ClientError::NotFound(name.to_string()))
        }

        fn get_field(&self, id: &str) -> Result<Option<Field>, ClientError> {
            self.record("get_field", format!("get_field({id})"))?;
            Ok(self.fields.borrow().get(id).cloned())
        }

        fn create_field(&self, field: &Field) -> Result<String, ClientError> {
            self.record(
                "create_field",
                format!("create_field({}, {})", field.field_name, field.data_type),
            )?;
            let id = self.next_id.unwrap_or("fld-1").to_string();
            self.fields.borrow_mut().insert(
                id.clone(),
                Field {
                    field_id: id.clone(),
                    state: "Enabled".into(),
                    ..field.clone()
                },
            );
            Ok(id)
        }

        fn enable_field(&self, id: &str) -> Result<(), ClientError> {
            self.record("enable_field", format!("enable_field({id})"))?;
            Ok(())
        }

        fn disable_field(&self, id: &str) -> Result<(), ClientError> {
            self.record("disable_field", format!("disable_field({id})"))?;
            Ok(())
        }

        fn delete_field(&self, id: &str) -> Result<(), ClientError> {
            self.record("delete_field", format!("delete_field({id})"))?;
            self.fields.borrow_mut().remove(id);
            Ok(())
        }
    }

    fn configured(name: &str, data_type: &str, state: &str) -> ResourceData {
        let mut attrs = FieldAttributes::new(name, data_type);
        attrs.state = state.into();
        ResourceData::new(attrs)
    }

    // ── resolve ─────────────────────────────────────────────────

    #[test]
    fn resolve_prefers_field_id() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled");
        let mut attrs = FieldAttributes::new("host", "String");
        attrs.field_id = "fld-9".into();

        let id = FieldResource::new(&client).resolve(&attrs).unwrap();
        assert_eq!(id, "fld-9");
        assert!(client.calls().is_empty());
    }

    #[test]
    fn resolve_unknown_name_propagates_not_found() {
        let client = RecordingClient::default();
        let err = FieldResource::new(&client)
            .resolve(&FieldAttributes::new("ghost", ""))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Client(ClientError::NotFound(n)) if n == "ghost"));
    }

    // ── create ──────────────────────────────────────────────────

    #[test]
    fn create_then_read_populates_everything() {
        let client = RecordingClient {
            next_id: Some("fld-42"),
            ..Default::default()
        };
        let mut data = configured("severity", "string", "");

        FieldResource::new(&client).create(&mut data).unwrap();

        assert_eq!(
            client.calls(),
            vec!["create_field(severity, string)", "get_field(fld-42)"]
        );
        assert_eq!(data.id, "fld-42");
        assert_eq!(
            data.attributes,
            FieldAttributes {
                field_id: "fld-42".into(),
                field_name: "severity".into(),
                data_type: "string".into(),
                state: "Enabled".into(),
            }
        );
    }

    #[test]
    fn create_with_identity_only_reads() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled");
        let mut data = configured("host", "String", "");
        data.set_id("fld-7");

        FieldResource::new(&client).create(&mut data).unwrap();

        assert_eq!(client.calls(), vec!["find_field_id(host)", "get_field(fld-7)"]);
        assert_eq!(data.attributes.field_id, "fld-7");
    }

    // ── read ────────────────────────────────────────────────────

    #[test]
    fn read_by_name_populates_computed_attributes() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Disabled");
        let mut data = configured("host", "", "");

        FieldResource::new(&client).read(&mut data).unwrap();

        assert_eq!(data.id, "fld-7");
        assert_eq!(data.attributes.field_id, "fld-7");
        assert_eq!(data.attributes.data_type, "String");
        assert_eq!(data.attributes.state, "Disabled");
    }

    #[test]
    fn read_keeps_identity_when_server_omits_id() {
        let client = RecordingClient::default();
        client.fields.borrow_mut().insert(
            "fld-7".into(),
            Field {
                field_id: String::new(),
                field_name: "host".into(),
                data_type: "String".into(),
                state: "Enabled".into(),
            },
        );
        let mut data = configured("host", "String", "");
        data.set_id("fld-7");
        data.attributes.field_id = "fld-7".into();

        FieldResource::new(&client).read(&mut data).unwrap();

        assert!(data.is_tracked());
        assert_eq!(data.id, "fld-7");
        assert_eq!(data.attributes.field_id, "fld-7");
    }

    #[test]
    fn read_never_rewrites_existing_identity() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled");
        let mut data = configured("host", "String", "");
        data.set_id("imported-7");
        data.attributes.field_id = "fld-7".into();

        FieldResource::new(&client).read(&mut data).unwrap();

        assert_eq!(data.id, "imported-7");
    }

    #[test]
    fn read_fetch_failure_passes_through() {
        let client =
            RecordingClient::with_field("fld-7", "host", "String", "Enabled").failing("get_field");
        let mut data = configured("host", "String", "");
        data.set_id("fld-7");
        data.attributes.field_id = "fld-7".into();
        let before = data.clone();

        let err = FieldResource::new(&client).read(&mut data).unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Client(ClientError::Api { status, ref message })
                if status == StatusCode::INTERNAL_SERVER_ERROR && message == "get_field failed"
        ));
        assert_eq!(data, before);
    }

    #[test]
    fn read_missing_field_clears_identity() {
        let client = RecordingClient::default();
        let mut data = configured("host", "String", "Enabled");
        data.set_id("fld-7");
        data.attributes.field_id = "fld-7".into();

        FieldResource::new(&client).read(&mut data).unwrap();

        assert!(!data.is_tracked());
        assert_eq!(data.attributes.field_name, "host");

        // Reading a removed resource again stays a quiet no-op.
        FieldResource::new(&client).read(&mut data).unwrap();
        assert!(!data.is_tracked());
    }

    // ── update ──────────────────────────────────────────────────

    #[test]
    fn update_enabled_calls_enable_only() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Disabled");
        let mut data = configured("host", "String", "Enabled");

        FieldResource::new(&client).update(&mut data).unwrap();

        assert_eq!(
            client.calls(),
            vec!["find_field_id(host)", "get_field(fld-7)", "enable_field(fld-7)"]
        );
    }

    #[test]
    fn update_disabled_calls_disable_only() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled");
        let mut data = configured("host", "String", "Disabled");
        data.attributes.field_id = "fld-7".into();

        FieldResource::new(&client).update(&mut data).unwrap();

        assert_eq!(client.calls(), vec!["get_field(fld-7)", "disable_field(fld-7)"]);
    }

    #[test]
    fn update_invalid_state_makes_no_mutating_call() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled");
        let mut data = configured("host", "String", "Paused");
        data.attributes.field_id = "fld-7".into();
        let before = data.clone();

        let err = FieldResource::new(&client).update(&mut data).unwrap_err();

        assert!(matches!(err, ProviderError::InvalidState(s) if s == "Paused"));
        assert_eq!(client.calls(), vec!["get_field(fld-7)"]);
        assert_eq!(data, before);
    }

    #[test]
    fn update_rejects_name_and_type_change() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled");
        let mut data = configured("hostname", "Long", "Disabled");
        data.attributes.field_id = "fld-7".into();

        let err = FieldResource::new(&client).update(&mut data).unwrap_err();

        assert!(matches!(err, ProviderError::ImmutableAttribute));
        assert_eq!(client.calls(), vec!["get_field(fld-7)"]);
    }

    /// Known-suspicious: the immutability check needs BOTH the name and the
    /// type to differ, so a rename alone still goes through to the state call.
    #[test]
    fn update_allows_name_change_alone() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled");
        let mut data = configured("hostname", "String", "Enabled");
        data.attributes.field_id = "fld-7".into();

        FieldResource::new(&client).update(&mut data).unwrap();

        assert_eq!(client.calls(), vec!["get_field(fld-7)", "enable_field(fld-7)"]);
    }

    #[test]
    fn update_fetch_failure_passes_through() {
        let client =
            RecordingClient::with_field("fld-7", "host", "String", "Enabled").failing("get_field");
        let mut data = configured("host", "String", "Disabled");
        data.attributes.field_id = "fld-7".into();
        let before = data.clone();

        let err = FieldResource::new(&client).update(&mut data).unwrap_err();

        assert!(matches!(err, ProviderError::Client(ClientError::Api { .. })));
        assert_eq!(client.calls(), vec!["get_field(fld-7)"]);
        assert_eq!(data, before);
    }

    #[test]
    fn update_enable_failure_passes_through() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Disabled")
            .failing("enable_field");
        let mut data = configured("host", "String", "Enabled");
        data.attributes.field_id = "fld-7".into();
        let before = data.clone();

        let err = FieldResource::new(&client).update(&mut data).unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Client(ClientError::Api { ref message, .. }) if message == "enable_field failed"
        ));
        assert_eq!(data, before);
    }

    #[test]
    fn update_disable_failure_passes_through() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled")
            .failing("disable_field");
        let mut data = configured("host", "String", "Disabled");
        data.attributes.field_id = "fld-7".into();
        let before = data.clone();

        let err = FieldResource::new(&client).update(&mut data).unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Client(ClientError::Api { ref message, .. }) if message == "disable_field failed"
        ));
        assert_eq!(data, before);
    }

    #[test]
    fn create_failure_leaves_data_untouched() {
        let client = RecordingClient::default().failing("create_field");
        let mut data = configured("severity", "String", "");
        let before = data.clone();

        let err = FieldResource::new(&client).create(&mut data).unwrap_err();

        assert!(matches!(err, ProviderError::Client(ClientError::Api { .. })));
        assert_eq!(data, before);
        assert_eq!(client.calls(), vec!["create_field(severity, String)"]);
    }

    #[test]
    fn update_vanished_field_is_gone() {
        let client = RecordingClient::default();
        let mut data = configured("host", "String", "Enabled");
        data.attributes.field_id = "fld-7".into();

        let err = FieldResource::new(&client).update(&mut data).unwrap_err();
        assert!(matches!(err, ProviderError::Gone(id) if id == "fld-7"));
    }

    // ── delete ──────────────────────────────────────────────────

    #[test]
    fn delete_by_name() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled");
        let mut data = configured("host", "String", "");

        FieldResource::new(&client).delete(&mut data).unwrap();

        assert_eq!(client.calls(), vec!["find_field_id(host)", "delete_field(fld-7)"]);
    }

    #[test]
    fn delete_failure_passes_through() {
        let client = RecordingClient::with_field("fld-7", "host", "String", "Enabled")
            .failing("delete_field");
        let mut data = configured("host", "String", "");
        data.set_id("fld-7");
        data.attributes.field_id = "fld-7".into();
        let before = data.clone();

        let err = FieldResource::new(&client).delete(&mut data).unwrap_err();

        assert!(matches!(err, ProviderError::Client(ClientError::Api { .. })));
        assert_eq!(data, before);
        assert!(client.fields.borrow().contains_key("fld-7"));
    }

    // ── import ──────────────────────────────────────────────────

    #[test]
    fn import_seeds_field_id() {
        let imported = import("fld-42");
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, "fld-42");
        assert_eq!(imported[0].attributes.field_id, "fld-42");
    }

    #[test]
    fn import_keeps_existing_field_id() {
        let mut data = configured("host", "String", "");
        data.attributes.field_id = "fld-7".into();

        import_into(&mut data, "fld-42");

        assert_eq!(data.id, "fld-42");
        assert_eq!(data.attributes.field_id, "fld-7");
    }

    #[test]
    fn state_parses_exact_values_only() {
        assert_eq!("Enabled".parse::<FieldState>().unwrap(), FieldState::Enabled);
        assert_eq!("Disabled".parse::<FieldState>().unwrap(), FieldState::Disabled);
        assert!("enabled".parse::<FieldState>().is_err());
        assert!("".parse::<FieldState>().is_err());
    }
}
