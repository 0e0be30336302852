use serde::Serialize;

/// Type name the field resource is registered under.
pub const FIELD_RESOURCE: &str = "sumologic_field";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
}

/// One attribute of a resource schema and how the framework treats it.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,

    #[serde(rename = "type")]
    pub kind: AttributeType,

    /// Must be present in configuration.
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,

    /// May be present in configuration.
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,

    /// Filled in by the server when absent.
    #[serde(skip_serializing_if = "is_false")]
    pub computed: bool,

    /// A changed value destroys and recreates the resource.
    #[serde(skip_serializing_if = "is_false")]
    pub force_new: bool,
}

impl Attribute {
    fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeType::String,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub attributes: Vec<Attribute>,
}

impl ResourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn force_new_attributes(&self) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.force_new)
            .map(|a| a.name)
            .collect()
    }
}

pub fn field_schema() -> ResourceSchema {
    ResourceSchema {
        type_name: FIELD_RESOURCE,
        attributes: vec![
            Attribute::string("field_name").required().force_new(),
            Attribute::string("field_id").computed(),
            Attribute::string("data_type").optional().force_new(),
            Attribute::string("state").optional(),
        ],
    }
}
