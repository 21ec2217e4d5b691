//! Manifest provider dispatching lifecycle requests by resource type name

use crate::diagnostics::Diagnostics;
use crate::registry::{RegisteredResource, ResourceRegistry};
use crate::resource::{
    build_manifest, check_document_fields, data_from_manifest, CreateRequest, CreateResponse,
    DeleteRequest, DeleteResponse, ImportedResource, ReadRequest, ReadResponse, ResourceData,
    UpdateRequest, UpdateResponse,
};
use crate::schema::{Attributes, Schema};
use crate::utils::extract_gvk;
use crate::validator::{strip_computed, SchemaValidator};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// Generates the `id` stored with each applied resource
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Terraform-style provider exposing registered custom resources
///
/// Construct with [`crate::ProviderBuilder`].
pub struct Provider {
    pub(crate) type_name: String,
    pub(crate) registry: ResourceRegistry,
    /// Configuration validator (optional, handlers receive unchecked input if None)
    pub(crate) validator: Option<Arc<dyn SchemaValidator>>,
    pub(crate) id_generator: IdGenerator,
}

impl Provider {
    /// Provider type name, the prefix of every resource type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Provider-level configuration schema (the provider takes no configuration)
    pub fn schema(&self) -> Schema {
        Schema::new(
            "Provider for Kubernetes manifests. Renders custom resources as YAML without \
             contacting a cluster.",
            Attributes::new(),
        )
    }

    /// Registered resource type names in sorted order
    pub fn resource_types(&self) -> Vec<String> {
        self.registry.type_names()
    }

    pub fn resource_schema(&self, type_name: &str) -> Result<Schema> {
        Ok(self.resource(type_name)?.schema.clone())
    }

    fn resource(&self, type_name: &str) -> Result<Arc<RegisteredResource>> {
        self.registry
            .lookup(type_name)
            .ok_or_else(|| Error::UnknownResourceType(type_name.to_string()))
    }

    /// Validate user configuration, including the attached attribute validators
    pub fn validate_resource_config(&self, type_name: &str, config: &Value) -> Result<Diagnostics> {
        let resource = self.resource(type_name)?;
        Ok(match &self.validator {
            Some(validator) => validator.validate(&resource.schema, config),
            None => Diagnostics::new(),
        })
    }

    pub fn create(&self, type_name: &str, request: CreateRequest) -> Result<CreateResponse> {
        debug!("Create resource {}", type_name);
        let resource = self.resource(type_name)?;
        let (state, diagnostics) = self.apply(&resource, &request.plan);
        Ok(CreateResponse { state, diagnostics })
    }

    pub fn read(&self, type_name: &str, request: ReadRequest) -> Result<ReadResponse> {
        debug!("Read resource {}", type_name);
        self.resource(type_name)?;
        Ok(ReadResponse {
            state: Some(request.state),
            diagnostics: Diagnostics::new(),
        })
    }

    /// Identical to [`Provider::create`]; the prior state is not consulted
    pub fn update(&self, type_name: &str, request: UpdateRequest) -> Result<UpdateResponse> {
        debug!("Update resource {}", type_name);
        let resource = self.resource(type_name)?;
        let (state, diagnostics) = self.apply(&resource, &request.plan);
        Ok(UpdateResponse { state, diagnostics })
    }

    pub fn delete(&self, type_name: &str, request: DeleteRequest) -> Result<DeleteResponse> {
        debug!("Delete resource {}", type_name);
        self.resource(type_name)?;
        trace!("Dropping state {:?}", request.state.get("id"));
        Ok(DeleteResponse {
            diagnostics: Diagnostics::new(),
        })
    }

    /// Import manifests from single- or multi-document YAML
    ///
    /// Each document is matched to a registered resource by apiVersion and kind,
    /// normalized through the typed model and rendered like a fresh Create.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The YAML cannot be parsed
    /// - A document has no registered resource
    /// - A document has top-level keys other than apiVersion, kind, metadata,
    ///   spec and status
    /// - A document has fields the resource schema does not describe
    ///
    /// `status` and server-populated metadata (uid, resourceVersion, ...) are
    /// dropped, so manifests exported from a cluster import cleanly.
    pub fn import_manifests(&self, yaml: &str) -> Result<Vec<ImportedResource>> {
        let mut imported = Vec::new();
        for document in serde_yaml::Deserializer::from_str(yaml) {
            let value = Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }

            let gvk = extract_gvk(&value)?;
            let resource = self
                .registry
                .lookup_by_kind(&gvk.group, &gvk.version, &gvk.kind)
                .ok_or_else(|| Error::UnknownApiVersionKind {
                    api_version: gvk.api_version(),
                    kind: gvk.kind.clone(),
                })?;
            debug!("Import resource {}", resource.metadata.type_name);

            check_document_fields(&value)?;
            let normalized = (resource.normalize)(value)?;
            let data = data_from_manifest(&resource.schema, &normalized)?;
            let plan = serde_json::to_value(&data)?;
            let (state, diagnostics) = self.apply(&resource, &plan);

            imported.push(ImportedResource {
                type_name: resource.metadata.type_name.clone(),
                state,
                diagnostics,
            });
        }
        Ok(imported)
    }

    /// Shared Create/Update handler
    fn apply(&self, resource: &RegisteredResource, plan: &Value) -> (Option<Value>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();

        if let Some(validator) = &self.validator {
            let config = strip_computed(&resource.schema, plan);
            diagnostics.extend(validator.validate(&resource.schema, &config));
            if diagnostics.has_error() {
                return (None, diagnostics);
            }
        }

        let mut data: ResourceData = match serde_json::from_value(plan.clone()) {
            Ok(data) => data,
            Err(e) => {
                diagnostics.add_error("Unable to read plan", e.to_string());
                return (None, diagnostics);
            }
        };

        let metadata = &resource.metadata;
        let api_version = metadata.api_version();
        data.id = Some((self.id_generator)());
        data.api_version = Some(api_version.clone());
        data.kind = Some(metadata.kind.clone());

        let rendered = build_manifest(&resource.schema, &data, &api_version, &metadata.kind)
            .and_then(|manifest| (resource.render)(manifest));
        match rendered {
            Ok(yaml) => data.yaml = Some(yaml),
            Err(e) => {
                diagnostics.add_error("Unable to render manifest", e.to_string());
                return (None, diagnostics);
            }
        }

        match serde_json::to_value(&data) {
            Ok(state) => (Some(state), diagnostics),
            Err(e) => {
                diagnostics.add_error("Unable to write state", e.to_string());
                (None, diagnostics)
            }
        }
    }
}
