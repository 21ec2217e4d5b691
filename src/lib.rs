//! Terraform-style resources that render Kubernetes custom resources as YAML.
//!
//! Each registered resource turns an attribute-keyed plan into a Kubernetes
//! manifest: `apiVersion` and `kind` are stamped from the resource's typed
//! model, an `id` is generated, and the manifest is rendered into the `yaml`
//! attribute of the returned state. No cluster is contacted.
//!
//! # Examples
//!
//! ```rust
//! use kube_manifest_provider::{CreateRequest, ProviderBuilder};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new().with_rook_resources().build();
//!
//! let response = provider.create(
//!     "k8s_ceph_rook_io_ceph_nfs_v1",
//!     CreateRequest {
//!         plan: json!({
//!             "metadata": { "name": "my-nfs", "namespace": "rook-ceph" },
//!             "spec": { "server": { "active": 1 } }
//!         }),
//!     },
//! )?;
//!
//! assert!(!response.diagnostics.has_error());
//! let state = response.state.unwrap();
//! assert!(state["yaml"].as_str().unwrap().contains("kind: CephNFS"));
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod convert;
pub mod diagnostics;
mod error;
mod provider;
pub mod registry;
pub mod resource;
pub mod resources;
pub mod schema;
mod utils;
pub mod validator;

#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod convert_test;
#[cfg(test)]
mod utils_test;
#[cfg(test)]
mod validator_test;

pub use builder::ProviderBuilder;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use provider::{IdGenerator, Provider};
pub use resource::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ImportedResource,
    ManifestResource, ReadRequest, ReadResponse, ResourceData, UpdateRequest, UpdateResponse,
};
pub use schema::Schema;
