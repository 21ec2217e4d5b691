use crate::{Error, Result};
use kube::core::GroupVersionKind;
use serde_json::Value;

/// Generate a resource id from the current wall-clock time in nanoseconds.
pub fn timestamp_id() -> String {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
        .to_string()
}

/// Convert a snake_case attribute name to the lowerCamelCase field name used by
/// Kubernetes manifests.
pub fn to_lower_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn extract_gvk(value: &Value) -> Result<GroupVersionKind> {
    let api_version = value
        .get("apiVersion")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::InvalidRequest("Missing apiVersion".to_string()))?;

    let kind = value
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::InvalidRequest("Missing kind".to_string()))?;

    let (group, version) = api_version.split_once('/').unwrap_or(("", api_version));

    Ok(GroupVersionKind::gvk(group, version, kind))
}
