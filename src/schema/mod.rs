//! Declarative attribute schemas for manifest resources
//!
//! A [`Schema`] describes the Terraform-facing attribute tree of one resource.
//! Besides documenting the resource, the tree is the single source of truth for
//! mapping snake_case attribute names onto the camelCase field names of the
//! rendered manifest (see [`crate::convert`]).

pub mod kubernetes;
mod validators;

pub use validators::Validator;

use crate::utils::to_lower_camel_case;
use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute tree keyed by attribute name
pub type Attributes = BTreeMap<String, Attribute>;

/// Element type of list and map attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    String,
    Int64,
    Bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int64,
    Bool,
    List(ElementType),
    Map(ElementType),
    /// Single nested object
    Object(Attributes),
    /// List of nested objects
    ListOfObjects(Attributes),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub description: String,
    pub markdown_description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    /// Reported as a warning whenever the attribute is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    /// Manifest field name when it differs from the camelCase form of the attribute name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaml_name: Option<String>,
}

impl Attribute {
    fn new(kind: AttributeType, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            kind,
            markdown_description: description.clone(),
            description,
            required: false,
            optional: false,
            computed: false,
            deprecation_message: None,
            validators: Vec::new(),
            yaml_name: None,
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new(AttributeType::String, description)
    }

    pub fn int64(description: impl Into<String>) -> Self {
        Self::new(AttributeType::Int64, description)
    }

    pub fn bool(description: impl Into<String>) -> Self {
        Self::new(AttributeType::Bool, description)
    }

    pub fn list(element: ElementType, description: impl Into<String>) -> Self {
        Self::new(AttributeType::List(element), description)
    }

    pub fn map(element: ElementType, description: impl Into<String>) -> Self {
        Self::new(AttributeType::Map(element), description)
    }

    pub fn object(description: impl Into<String>, children: Attributes) -> Self {
        Self::new(AttributeType::Object(children), description)
    }

    pub fn list_of_objects(description: impl Into<String>, children: Attributes) -> Self {
        Self::new(AttributeType::ListOfObjects(children), description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecation_message = Some(message.into());
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn with_yaml_name(mut self, name: impl Into<String>) -> Self {
        self.yaml_name = Some(name.into());
        self
    }

    /// Field name of this attribute in the rendered manifest
    pub fn yaml_name(&self, attribute_name: &str) -> String {
        self.yaml_name
            .clone()
            .unwrap_or_else(|| to_lower_camel_case(attribute_name))
    }

    /// Nested attributes for object and list-of-object attributes
    pub fn children(&self) -> Option<&Attributes> {
        match &self.kind {
            AttributeType::Object(children) | AttributeType::ListOfObjects(children) => {
                Some(children)
            }
            _ => None,
        }
    }

    /// Computed attributes that cannot be set in configuration
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

/// Build an attribute tree from `(name, attribute)` pairs
pub fn attributes<I, K>(iter: I) -> Attributes
where
    I: IntoIterator<Item = (K, Attribute)>,
    K: Into<String>,
{
    iter.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub description: String,
    pub markdown_description: String,
    pub attributes: Attributes,
}

impl Schema {
    pub fn new(description: impl Into<String>, attributes: Attributes) -> Self {
        let description = description.into();
        Self {
            markdown_description: description.clone(),
            description,
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Look up a nested attribute by dotted path, e.g. `spec.server.active`
    ///
    /// List-of-object attributes are traversed transparently, so
    /// `spec.server.placement.tolerations.key` resolves to the element attribute.
    pub fn find(&self, path: &str) -> Option<&Attribute> {
        let mut segments = path.split('.');
        let mut current = self.attributes.get(segments.next()?)?;
        for segment in segments {
            current = current.children()?.get(segment)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(
            "Sample",
            attributes([
                ("id", Attribute::string("Identifier").computed()),
                (
                    "spec",
                    Attribute::object(
                        "Spec",
                        attributes([
                            ("priority_class_name", Attribute::string("Priority").optional()),
                            (
                                "items",
                                Attribute::list_of_objects(
                                    "Items",
                                    attributes([(
                                        "sub_path",
                                        Attribute::string("Path").required(),
                                    )]),
                                )
                                .optional(),
                            ),
                            (
                                "typ",
                                Attribute::string("Type").optional().with_yaml_name("type"),
                            ),
                        ]),
                    )
                    .optional(),
                ),
            ]),
        )
    }

    #[test]
    fn test_flags() {
        let attr = Attribute::string("x").optional().required();
        assert!(attr.required);
        assert!(!attr.optional);

        let id = Attribute::string("x").computed();
        assert!(id.is_computed_only());
        assert!(!Attribute::string("x").optional().computed().is_computed_only());
    }

    #[test]
    fn test_markdown_description_defaults_to_description() {
        let attr = Attribute::int64("Number of active servers.");
        assert_eq!(attr.markdown_description, "Number of active servers.");
    }

    #[test]
    fn test_yaml_name() {
        let schema = sample_schema();
        let spec = schema.attribute("spec").unwrap();
        let children = spec.children().unwrap();
        assert_eq!(
            children["priority_class_name"].yaml_name("priority_class_name"),
            "priorityClassName"
        );
        assert_eq!(children["typ"].yaml_name("typ"), "type");
    }

    #[test]
    fn test_find_nested() {
        let schema = sample_schema();
        assert!(schema.find("spec.items.sub_path").unwrap().required);
        assert!(schema.find("spec.missing").is_none());
        assert!(schema.find("id.nested").is_none());
    }

    #[test]
    fn test_serializes_type_tags() {
        let attr = Attribute::map(ElementType::String, "Labels").optional();
        let value = serde_json::to_value(&attr).unwrap();
        assert_eq!(value["type"], serde_json::json!({ "map": "string" }));
        assert_eq!(value["optional"], true);
        assert!(value.get("validators").is_none());
    }
}
