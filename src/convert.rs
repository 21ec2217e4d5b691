//! Schema-driven mapping between attribute documents and manifest documents
//!
//! Object keys are renamed between attribute names and manifest field names
//! using the schema. Map keys (labels, caps, resource limits) are user data and
//! pass through untouched.

use crate::schema::{Attribute, AttributeType, Attributes};
use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::trace;

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Translate an attribute-keyed object into manifest shape, dropping nulls
pub fn to_manifest_value(attributes: &Attributes, value: &Value, path: &str) -> Result<Value> {
    trace!("Mapping attributes at {:?} to manifest fields", path);
    let object = value
        .as_object()
        .ok_or_else(|| Error::InvalidRequest(format!("{} must be an object", display(path))))?;

    let mut out = Map::new();
    for (name, item) in object {
        if item.is_null() {
            continue;
        }
        let item_path = join(path, name);
        let attribute = attributes
            .get(name)
            .ok_or_else(|| Error::UnknownAttribute {
                path: item_path.clone(),
            })?;
        out.insert(
            attribute.yaml_name(name),
            map_value(attribute, item, &item_path, to_manifest_value)?,
        );
    }
    Ok(Value::Object(out))
}

/// Translate a manifest object back into attribute names
pub fn from_manifest_value(attributes: &Attributes, value: &Value, path: &str) -> Result<Value> {
    trace!("Mapping manifest fields at {:?} to attributes", path);
    let object = value
        .as_object()
        .ok_or_else(|| Error::InvalidRequest(format!("{} must be an object", display(path))))?;

    let mut out = Map::new();
    for (field, item) in object {
        if item.is_null() {
            continue;
        }
        let (name, attribute) = attributes
            .iter()
            .find(|(name, attribute)| attribute.yaml_name(name) == *field)
            .ok_or_else(|| Error::UnknownField {
                path: join(path, field),
            })?;
        let item_path = join(path, name);
        out.insert(
            name.clone(),
            map_value(attribute, item, &item_path, from_manifest_value)?,
        );
    }
    Ok(Value::Object(out))
}

fn map_value(
    attribute: &Attribute,
    value: &Value,
    path: &str,
    recurse: fn(&Attributes, &Value, &str) -> Result<Value>,
) -> Result<Value> {
    match &attribute.kind {
        AttributeType::Object(children) => recurse(children, value, path),
        AttributeType::ListOfObjects(children) => {
            let items = value
                .as_array()
                .ok_or_else(|| Error::InvalidRequest(format!("{} must be a list", path)))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| recurse(children, item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        _ => Ok(value.clone()),
    }
}

fn display(path: &str) -> &str {
    if path.is_empty() {
        "document"
    } else {
        path
    }
}
