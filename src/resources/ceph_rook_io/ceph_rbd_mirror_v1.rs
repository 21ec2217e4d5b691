use super::{placement, pod_annotations, pod_labels, Placement};
use crate::resource::{resource_schema, ManifestResource};
use crate::schema::{attributes, kubernetes, Attribute, ElementType, Schema, Validator};
use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CephRBDMirror represents a Ceph RBD Mirror
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CephRbdMirror {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<RbdMirroringSpec>,
}

impl k8s_openapi::Resource for CephRbdMirror {
    const API_VERSION: &'static str = super::API_VERSION;
    const GROUP: &'static str = super::GROUP;
    const KIND: &'static str = "CephRBDMirror";
    const VERSION: &'static str = super::VERSION;
    const URL_PATH_SEGMENT: &'static str = "cephrbdmirrors";
    type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for CephRbdMirror {
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
pub struct RbdMirroringSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    pub count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peers: Option<MirroringPeerSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MirroringPeerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_names: Option<Vec<String>>,
}

/// `k8s_ceph_rook_io_ceph_rbd_mirror_v1`
pub struct CephRbdMirrorResource;

impl ManifestResource for CephRbdMirrorResource {
    type Manifest = CephRbdMirror;

    const TYPE_SUFFIX: &'static str = "ceph_rook_io_ceph_rbd_mirror_v1";

    fn schema() -> Schema {
        resource_schema(
            "CephRBDMirror represents a Ceph RBD Mirror",
            true,
            Some(
                Attribute::object(
                    "RBDMirroringSpec represents the specification of an RBD mirror daemon",
                    attributes([
                        ("annotations", pod_annotations()),
                        (
                            "count",
                            Attribute::int64(
                                "Count represents the number of rbd mirror instance to run",
                            )
                            .required()
                            .validator(Validator::Int64AtLeast { min: 1 }),
                        ),
                        ("labels", pod_labels()),
                        (
                            "peers",
                            Attribute::object(
                                "Peers represents the peers spec",
                                attributes([(
                                    "secret_names",
                                    Attribute::list(
                                        ElementType::String,
                                        "SecretNames represents the Kubernetes Secret names to \
                                         add rbd-mirror or cephfs-mirror peers",
                                    )
                                    .optional(),
                                )]),
                            )
                            .optional(),
                        ),
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
                                "PriorityClassName sets priority class on the rbd mirror pods",
                            )
                            .optional(),
                        ),
                        (
                            "resources",
                            kubernetes::resource_requirements(
                                "The resource requirements for the rbd mirror pods",
                            ),
                        ),
                    ]),
                )
                .required(),
            ),
        )
    }
}
