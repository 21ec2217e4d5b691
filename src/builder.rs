//! Builder for constructing providers with various options

use crate::provider::{IdGenerator, Provider};
use crate::registry::ResourceRegistry;
use crate::resource::ManifestResource;
use crate::resources::ceph_rook_io::{
    CephClientResource, CephFilesystemMirrorResource, CephNfsResource, CephRbdMirrorResource,
};
use crate::utils::timestamp_id;
use crate::validator::{AttributeValidator, SchemaValidator};
use kube::Resource;
use std::sync::Arc;

const DEFAULT_TYPE_NAME: &str = "k8s";

type Registration = fn(&mut ResourceRegistry, &str);

/// Builder for creating providers
///
/// Provides a fluent API for constructing providers with various options:
/// - Registered resource types
/// - Configuration validation
/// - Resource id generation
///
/// # Example
///
/// ```rust
/// use kube_manifest_provider::ProviderBuilder;
///
/// let provider = ProviderBuilder::new().with_rook_resources().build();
/// assert!(provider
///     .resource_types()
///     .contains(&"k8s_ceph_rook_io_ceph_nfs_v1".to_string()));
/// ```
pub struct ProviderBuilder {
    type_name: String,
    registrations: Vec<Registration>,
    validator: Option<Arc<dyn SchemaValidator>>,
    id_generator: IdGenerator,
}

impl ProviderBuilder {
    /// Create a new provider builder
    pub fn new() -> Self {
        Self {
            type_name: DEFAULT_TYPE_NAME.to_string(),
            registrations: Vec::new(),
            validator: Some(Arc::new(AttributeValidator)),
            id_generator: Arc::new(timestamp_id),
        }
    }

    /// Set the provider type name used as prefix of every resource type name
    ///
    /// Defaults to `k8s`.
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Register a resource type
    ///
    /// # Example
    ///
    /// ```rust
    /// use kube_manifest_provider::ProviderBuilder;
    /// use kube_manifest_provider::resources::ceph_rook_io::CephClientResource;
    ///
    /// let provider = ProviderBuilder::new()
    ///     .with_resource::<CephClientResource>()
    ///     .build();
    /// assert_eq!(provider.resource_types(), vec!["k8s_ceph_rook_io_ceph_client_v1"]);
    /// ```
    pub fn with_resource<R>(mut self) -> Self
    where
        R: ManifestResource,
        R::Manifest: Resource<DynamicType = ()>,
        <R::Manifest as k8s_openapi::Resource>::Scope: 'static,
    {
        self.registrations.push(register::<R>);
        self
    }

    /// Register every `ceph.rook.io` resource type
    pub fn with_rook_resources(self) -> Self {
        self.with_resource::<CephClientResource>()
            .with_resource::<CephFilesystemMirrorResource>()
            .with_resource::<CephNfsResource>()
            .with_resource::<CephRbdMirrorResource>()
    }

    /// Replace the configuration validator
    ///
    /// By default configuration is checked with [`AttributeValidator`].
    pub fn with_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Skip configuration validation, handlers receive plans unchecked
    pub fn without_validation(mut self) -> Self {
        self.validator = None;
        self
    }

    /// Configure how resource ids are generated
    ///
    /// Defaults to the current time in nanoseconds. A fixed generator makes
    /// state deterministic in tests.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kube_manifest_provider::ProviderBuilder;
    ///
    /// let provider = ProviderBuilder::new()
    ///     .with_rook_resources()
    ///     .with_id_generator(|| "1700000000000000000".to_string())
    ///     .build();
    /// ```
    pub fn with_id_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.id_generator = Arc::new(generator);
        self
    }

    pub fn build(self) -> Provider {
        let mut registry = ResourceRegistry::new();
        for register in &self.registrations {
            register(&mut registry, &self.type_name);
        }

        Provider {
            type_name: self.type_name,
            registry,
            validator: self.validator,
            id_generator: self.id_generator,
        }
    }
}

fn register<R>(registry: &mut ResourceRegistry, type_name: &str)
where
    R: ManifestResource,
    R::Manifest: Resource<DynamicType = ()>,
    <R::Manifest as k8s_openapi::Resource>::Scope: 'static,
{
    registry.register::<R>(type_name);
}

impl Default for ProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
