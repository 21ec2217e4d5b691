use crate::diagnostics::Diagnostics;
use crate::schema::{Attribute, AttributeType, Attributes, ElementType, Schema};
use serde_json::{Map, Value};

/// Trait for configuration validation implementations
///
/// Runs before any lifecycle handler, the way the plugin framework rejects
/// malformed configuration before a resource sees it.
pub trait SchemaValidator: Send + Sync {
    /// Validate an attribute-keyed configuration document against `schema`
    fn validate(&self, schema: &Schema, config: &Value) -> Diagnostics;
}

/// Default validator: required, read-only and unsupported attributes, value
/// types, then the validators attached to each attribute
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeValidator;

impl SchemaValidator for AttributeValidator {
    fn validate(&self, schema: &Schema, config: &Value) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        match config.as_object() {
            Some(object) => check_object(&schema.attributes, object, "", &mut diagnostics),
            None => diagnostics.add_error(
                "Invalid Configuration",
                format!("Expected an object, got: {}", json_type(config)),
            ),
        }
        diagnostics
    }
}

impl<V: SchemaValidator> SchemaValidator for std::sync::Arc<V> {
    fn validate(&self, schema: &Schema, config: &Value) -> Diagnostics {
        (**self).validate(schema, config)
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn check_object(
    attributes: &Attributes,
    object: &Map<String, Value>,
    prefix: &str,
    diagnostics: &mut Diagnostics,
) {
    for name in object.keys() {
        if !attributes.contains_key(name) {
            diagnostics.add_attribute_error(
                join(prefix, name),
                "Unsupported argument",
                format!("An argument named \"{}\" is not expected here.", name),
            );
        }
    }

    for (name, attribute) in attributes {
        let path = join(prefix, name);
        match object.get(name).filter(|v| !v.is_null()) {
            None if attribute.required => diagnostics.add_attribute_error(
                &path,
                "Missing required argument",
                format!(
                    "The argument \"{}\" is required, but no definition was found.",
                    path
                ),
            ),
            None => {}
            Some(_) if attribute.is_computed_only() => diagnostics.add_attribute_error(
                &path,
                "Invalid Configuration for Read-Only Attribute",
                format!("Cannot set value for attribute {} as it is computed.", path),
            ),
            Some(value) => check_value(attribute, value, &path, diagnostics),
        }
    }
}

fn check_value(attribute: &Attribute, value: &Value, path: &str, diagnostics: &mut Diagnostics) {
    let matches = match &attribute.kind {
        AttributeType::String => value.is_string(),
        AttributeType::Int64 => value.as_i64().is_some(),
        AttributeType::Bool => value.is_boolean(),
        AttributeType::List(element) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_element(*element, item, &format!("{}[{}]", path, i), diagnostics);
                }
                true
            }
            None => false,
        },
        AttributeType::Map(element) => match value.as_object() {
            Some(entries) => {
                for (key, item) in entries {
                    check_element(*element, item, &format!("{}[\"{}\"]", path, key), diagnostics);
                }
                true
            }
            None => false,
        },
        AttributeType::Object(children) => match value.as_object() {
            Some(object) => {
                check_object(children, object, path, diagnostics);
                true
            }
            None => false,
        },
        AttributeType::ListOfObjects(children) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    match item.as_object() {
                        Some(object) => check_object(children, object, &item_path, diagnostics),
                        None => type_mismatch(&item_path, "object", item, diagnostics),
                    }
                }
                true
            }
            None => false,
        },
    };

    if !matches {
        type_mismatch(path, expected_type(&attribute.kind), value, diagnostics);
        return;
    }

    for validator in &attribute.validators {
        validator.validate(path, value, diagnostics);
    }

    if let Some(message) = &attribute.deprecation_message {
        diagnostics.add_attribute_warning(path, "Attribute Deprecated", message.clone());
    }
}

fn check_element(element: ElementType, value: &Value, path: &str, diagnostics: &mut Diagnostics) {
    let matches = match element {
        ElementType::String => value.is_string(),
        ElementType::Int64 => value.as_i64().is_some(),
        ElementType::Bool => value.is_boolean(),
    };
    if !matches {
        type_mismatch(path, element_type_name(element), value, diagnostics);
    }
}

fn type_mismatch(path: &str, expected: &str, value: &Value, diagnostics: &mut Diagnostics) {
    diagnostics.add_attribute_error(
        path,
        "Incorrect attribute value type",
        format!(
            "Attribute {} must be {}, got: {}",
            path,
            expected,
            json_type(value)
        ),
    );
}

fn expected_type(kind: &AttributeType) -> &'static str {
    match kind {
        AttributeType::String => "string",
        AttributeType::Int64 => "number (int64)",
        AttributeType::Bool => "bool",
        AttributeType::List(_) | AttributeType::ListOfObjects(_) => "list",
        AttributeType::Map(_) => "map",
        AttributeType::Object(_) => "object",
    }
}

fn element_type_name(element: ElementType) -> &'static str {
    match element {
        ElementType::String => "string",
        ElementType::Int64 => "number (int64)",
        ElementType::Bool => "bool",
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Drop computed-only attributes from a plan
///
/// Plans carry prior computed values (such as `id`) that are not part of the
/// user's configuration.
pub fn strip_computed(schema: &Schema, plan: &Value) -> Value {
    match plan.as_object() {
        Some(object) => Value::Object(
            object
                .iter()
                .filter(|(name, _)| {
                    schema
                        .attribute(name)
                        .is_none_or(|attribute| !attribute.is_computed_only())
                })
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        ),
        None => plan.clone(),
    }
}
