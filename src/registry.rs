//! Resource registry for manifest resources
//!
//! Maps Terraform type names (e.g. `k8s_ceph_rook_io_ceph_nfs_v1`) to the
//! schema and typed manifest model of one custom resource kind. Imports look
//! resources up by (group, version, kind) instead.

use crate::resource::{normalize, render, ManifestResource};
use crate::schema::Schema;
use crate::Result;
use kube::Resource;
use serde_json::Value;
use std::any::TypeId;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Renders a manifest document to YAML through the resource's typed model
pub type RenderFn = fn(Value) -> Result<String>;

/// Round-trips a manifest document through the resource's typed model
pub type NormalizeFn = fn(Value) -> Result<Value>;

/// Metadata for a registered resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMetadata {
    /// Full Terraform type name (e.g., "k8s_ceph_rook_io_ceph_nfs_v1")
    pub type_name: String,
    /// The Kind name (e.g., "CephNFS")
    pub kind: String,
    /// The API group (e.g., "ceph.rook.io")
    pub group: String,
    /// The API version (e.g., "v1")
    pub version: String,
    /// The plural name (e.g., "cephnfses")
    pub plural: String,
    /// Whether the resource is namespaced
    pub namespaced: bool,
}

impl ResourceMetadata {
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

pub struct RegisteredResource {
    pub metadata: ResourceMetadata,
    pub schema: Schema,
    pub(crate) render: RenderFn,
    pub(crate) normalize: NormalizeFn,
}

impl std::fmt::Debug for RegisteredResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredResource")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct ResourceRegistry {
    /// Lookup by type name -> resource
    resources: BTreeMap<String, Arc<RegisteredResource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    /// Register a resource type under `{provider_type_name}_{R::TYPE_SUFFIX}`
    ///
    /// Group, version, kind and plural come from the typed manifest's
    /// `Resource` implementation. Registering the same type name twice replaces
    /// the earlier entry.
    pub fn register<R>(&mut self, provider_type_name: &str)
    where
        R: ManifestResource,
        R::Manifest: Resource<DynamicType = ()>,
        <R::Manifest as k8s_openapi::Resource>::Scope: 'static,
    {
        let type_name = format!("{}_{}", provider_type_name, R::TYPE_SUFFIX);
        let metadata = ResourceMetadata {
            type_name: type_name.clone(),
            kind: <R::Manifest as Resource>::kind(&()).into_owned(),
            group: <R::Manifest as Resource>::group(&()).into_owned(),
            version: <R::Manifest as Resource>::version(&()).into_owned(),
            plural: <R::Manifest as Resource>::plural(&()).into_owned(),
            namespaced: is_namespaced::<R::Manifest>(),
        };

        let registered = RegisteredResource {
            metadata,
            schema: R::schema(),
            render: render::<R::Manifest>,
            normalize: normalize::<R::Manifest>,
        };

        self.resources.insert(type_name, Arc::new(registered));
    }

    pub fn lookup(&self, type_name: &str) -> Option<Arc<RegisteredResource>> {
        self.resources.get(type_name).cloned()
    }

    /// Look up a resource by (group, version, kind)
    pub fn lookup_by_kind(
        &self,
        group: &str,
        version: &str,
        kind: &str,
    ) -> Option<Arc<RegisteredResource>> {
        self.resources
            .values()
            .find(|r| {
                r.metadata.group == group
                    && r.metadata.version == version
                    && r.metadata.kind == kind
            })
            .cloned()
    }

    /// Registered type names in sorted order
    pub fn type_names(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

fn is_namespaced<K>() -> bool
where
    K: k8s_openapi::Resource,
    K::Scope: 'static,
{
    TypeId::of::<K::Scope>() == TypeId::of::<k8s_openapi::NamespaceResourceScope>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ceph_rook_io::{CephClientResource, CephNfsResource};

    #[test]
    fn test_registry_empty() {
        let registry = ResourceRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("k8s_ceph_rook_io_ceph_nfs_v1").is_none());
    }

    #[test]
    fn test_register_extracts_metadata() {
        let mut registry = ResourceRegistry::new();
        registry.register::<CephNfsResource>("k8s");

        let nfs = registry.lookup("k8s_ceph_rook_io_ceph_nfs_v1").unwrap();
        assert_eq!(nfs.metadata.kind, "CephNFS");
        assert_eq!(nfs.metadata.group, "ceph.rook.io");
        assert_eq!(nfs.metadata.version, "v1");
        assert_eq!(nfs.metadata.plural, "cephnfses");
        assert_eq!(nfs.metadata.api_version(), "ceph.rook.io/v1");
        assert!(nfs.metadata.namespaced);
    }

    #[test]
    fn test_lookup_by_kind() {
        let mut registry = ResourceRegistry::new();
        registry.register::<CephNfsResource>("k8s");
        registry.register::<CephClientResource>("k8s");

        let client = registry
            .lookup_by_kind("ceph.rook.io", "v1", "CephClient")
            .unwrap();
        assert_eq!(client.metadata.type_name, "k8s_ceph_rook_io_ceph_client_v1");
        assert!(registry.lookup_by_kind("ceph.rook.io", "v2", "CephClient").is_none());
        assert_eq!(
            registry.type_names(),
            vec![
                "k8s_ceph_rook_io_ceph_client_v1".to_string(),
                "k8s_ceph_rook_io_ceph_nfs_v1".to_string(),
            ]
        );
    }

    #[test]
    fn test_type_name_prefix() {
        let mut registry = ResourceRegistry::new();
        registry.register::<CephNfsResource>("kubernetes");
        assert!(registry.lookup("kubernetes_ceph_rook_io_ceph_nfs_v1").is_some());
        assert_eq!(registry.len(), 1);
    }
}
