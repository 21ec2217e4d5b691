//! Manifest resources and their lifecycle data
//!
//! Every resource has two representations of one Kubernetes object:
//!
//! - [`ResourceData`], the attribute-keyed model exchanged as plan and state
//! - a typed manifest model (for example [`crate::resources::ceph_rook_io::CephNfs`])
//!   with upstream camelCase field names, which produces the YAML
//!
//! The resource's [`Schema`] maps one onto the other.

use crate::convert::{from_manifest_value, to_manifest_value};
use crate::diagnostics::Diagnostics;
use crate::schema::{attributes, kubernetes, Attribute, Schema};
use crate::{Error, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A custom resource kind exposed as a manifest resource
///
/// # Example
///
/// ```rust
/// use kube_manifest_provider::resources::ceph_rook_io::CephNfsResource;
/// use kube_manifest_provider::ManifestResource;
///
/// assert_eq!(CephNfsResource::TYPE_SUFFIX, "ceph_rook_io_ceph_nfs_v1");
/// assert!(CephNfsResource::schema().attribute("spec").is_some());
/// ```
pub trait ManifestResource: 'static {
    /// Typed manifest; its `k8s_openapi::Resource` constants supply apiVersion and kind
    type Manifest: k8s_openapi::Resource
        + k8s_openapi::Metadata<Ty = ObjectMeta>
        + Serialize
        + DeserializeOwned;

    /// Appended to the provider type name, e.g. `ceph_rook_io_ceph_nfs_v1`
    const TYPE_SUFFIX: &'static str;

    fn schema() -> Schema;
}

/// Terraform-facing model shared by all manifest resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub yaml: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    pub metadata: MetadataModel,
    #[serde(default)]
    pub spec: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl From<&MetadataModel> for ObjectMeta {
    fn from(model: &MetadataModel) -> Self {
        ObjectMeta {
            name: Some(model.name.clone()),
            namespace: model.namespace.clone(),
            labels: model.labels.clone(),
            annotations: model.annotations.clone(),
            ..Default::default()
        }
    }
}

impl From<&ObjectMeta> for MetadataModel {
    fn from(meta: &ObjectMeta) -> Self {
        MetadataModel {
            name: meta.name.clone().unwrap_or_default(),
            namespace: meta.namespace.clone(),
            labels: meta.labels.clone(),
            annotations: meta.annotations.clone(),
        }
    }
}

/// Build the full resource schema around a kind-specific `spec` attribute
///
/// Adds the computed `id`, `yaml`, `api_version` and `kind` attributes and the
/// standard `metadata` block.
pub fn resource_schema(description: &str, namespaced: bool, spec: Option<Attribute>) -> Schema {
    let mut attrs = attributes([
        (
            "id",
            Attribute::string("Timestamp of the last apply, used as resource identifier.")
                .computed(),
        ),
        (
            "yaml",
            Attribute::string("The generated manifest in YAML format.").computed(),
        ),
        (
            "api_version",
            Attribute::string("The API group of the requested resource.").computed(),
        ),
        (
            "kind",
            Attribute::string("The type of the requested resource.").computed(),
        ),
        ("metadata", kubernetes::object_meta(namespaced)),
    ]);
    if let Some(spec) = spec {
        attrs.insert("spec".to_string(), spec);
    }
    Schema::new(description, attrs)
}

/// Assemble the manifest document for `data`, stamping apiVersion and kind
pub(crate) fn build_manifest(
    schema: &Schema,
    data: &ResourceData,
    api_version: &str,
    kind: &str,
) -> Result<Value> {
    let mut manifest = json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": serde_json::to_value(ObjectMeta::from(&data.metadata))?,
    });

    if let Some(spec) = data.spec.as_ref().filter(|s| !s.is_null()) {
        let children = schema
            .attribute("spec")
            .and_then(Attribute::children)
            .ok_or_else(|| Error::UnknownAttribute {
                path: "spec".to_string(),
            })?;
        manifest["spec"] = to_manifest_value(children, spec, "spec")?;
    }

    Ok(manifest)
}

/// Top-level keys accepted in an imported manifest document
const DOCUMENT_FIELDS: [&str; 5] = ["apiVersion", "kind", "metadata", "spec", "status"];

/// Reject top-level keys the typed models would otherwise drop silently
pub(crate) fn check_document_fields(manifest: &Value) -> Result<()> {
    let object = manifest
        .as_object()
        .ok_or_else(|| Error::InvalidRequest("document must be an object".to_string()))?;
    match object.keys().find(|key| !DOCUMENT_FIELDS.contains(&key.as_str())) {
        Some(key) => Err(Error::UnknownField { path: key.clone() }),
        None => Ok(()),
    }
}

/// Split a normalized manifest document back into resource data
pub(crate) fn data_from_manifest(schema: &Schema, manifest: &Value) -> Result<ResourceData> {
    let meta: ObjectMeta = match manifest.get("metadata") {
        Some(m) => serde_json::from_value(m.clone())?,
        None => ObjectMeta::default(),
    };

    let spec = match manifest.get("spec").filter(|s| !s.is_null()) {
        Some(spec) => {
            let children = schema
                .attribute("spec")
                .and_then(Attribute::children)
                .ok_or_else(|| Error::UnknownField {
                    path: "spec".to_string(),
                })?;
            Some(from_manifest_value(children, spec, "spec")?)
        }
        None => None,
    };

    Ok(ResourceData {
        metadata: MetadataModel::from(&meta),
        spec,
        ..Default::default()
    })
}

/// Marshal a manifest document through the typed model `M`
pub(crate) fn render<M>(manifest: Value) -> Result<String>
where
    M: Serialize + DeserializeOwned,
{
    let typed: M = serde_json::from_value(manifest)?;
    Ok(serde_yaml::to_string(&typed)?)
}

/// Round-trip a manifest document through the typed model `M`
pub(crate) fn normalize<M>(manifest: Value) -> Result<Value>
where
    M: Serialize + DeserializeOwned,
{
    let typed: M = serde_json::from_value(manifest)?;
    Ok(serde_json::to_value(&typed)?)
}

#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub plan: Value,
}

#[derive(Debug, Clone, Default)]
pub struct CreateResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    pub state: Value,
}

#[derive(Debug, Clone, Default)]
pub struct ReadResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub plan: Value,
    pub prior_state: Value,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub state: Value,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteResponse {
    pub diagnostics: Diagnostics,
}

/// A manifest document imported into resource state
///
/// `state` is `None` when the document fails validation or rendering, as for
/// [`CreateResponse`].
#[derive(Debug, Clone)]
pub struct ImportedResource {
    pub type_name: String,
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}
