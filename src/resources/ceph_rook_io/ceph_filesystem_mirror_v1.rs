use super::{placement, pod_annotations, pod_labels, Placement};
use crate::resource::{resource_schema, ManifestResource};
use crate::schema::{attributes, kubernetes, Attribute, Schema};
use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CephFilesystemMirror is the Ceph Filesystem Mirror object definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CephFilesystemMirror {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<FilesystemMirroringSpec>,
}

impl k8s_openapi::Resource for CephFilesystemMirror {
    const API_VERSION: &'static str = super::API_VERSION;
    const GROUP: &'static str = super::GROUP;
    const KIND: &'static str = "CephFilesystemMirror";
    const VERSION: &'static str = super::VERSION;
    const URL_PATH_SEGMENT: &'static str = "cephfilesystemmirrors";
    type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for CephFilesystemMirror {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilesystemMirroringSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

/// `k8s_ceph_rook_io_ceph_filesystem_mirror_v1`
pub struct CephFilesystemMirrorResource;

impl ManifestResource for CephFilesystemMirrorResource {
    type Manifest = CephFilesystemMirror;

    const TYPE_SUFFIX: &'static str = "ceph_rook_io_ceph_filesystem_mirror_v1";

    fn schema() -> Schema {
        resource_schema(
            "CephFilesystemMirror is the Ceph Filesystem Mirror object definition",
            true,
            Some(
                Attribute::object(
                    "FilesystemMirroringSpec is the filesystem mirroring specification",
                    attributes([
                        ("annotations", pod_annotations()),
                        ("labels", pod_labels()),
                        (
                            "placement",
                            placement(
                                "The affinity to place the rgw pods (default is to place on any \
                                 available node)",
                            ),
                        ),
                        (
                            "priority_class_name",
                            Attribute::string(
                                "PriorityClassName sets priority class on the cephfs-mirror pods",
                            )
                            .optional(),
                        ),
                        (
                            "resources",
                            kubernetes::resource_requirements(
                                "The resource requirements for the cephfs-mirror pods",
                            ),
                        ),
                    ]),
                )
                .required(),
            ),
        )
    }
}
