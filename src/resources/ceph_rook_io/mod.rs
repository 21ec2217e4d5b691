//! Rook/Ceph custom resources in the `ceph.rook.io/v1` API group

mod ceph_client_v1;
mod ceph_filesystem_mirror_v1;
mod ceph_nfs_v1;
mod ceph_rbd_mirror_v1;

pub use ceph_client_v1::{CephClient, CephClientResource, CephClientSpec};
pub use ceph_filesystem_mirror_v1::{
    CephFilesystemMirror, CephFilesystemMirrorResource, FilesystemMirroringSpec,
};
pub use ceph_nfs_v1::{
    AdditionalVolumeMount, CephNfs, CephNfsResource, GaneshaRadosSpec, GaneshaServerSpec,
    KerberosSpec, NfsGaneshaSpec, NfsSecuritySpec, SssdSidecar, SssdSpec, VolumeSourceFile,
};
pub use ceph_rbd_mirror_v1::{
    CephRbdMirror, CephRbdMirrorResource, MirroringPeerSpec, RbdMirroringSpec,
};

use crate::schema::{attributes, kubernetes, Attribute, ElementType};
use k8s_openapi::api::core::v1::{
    ConfigMapVolumeSource, EmptyDirVolumeSource, HostPathVolumeSource, NodeAffinity,
    PersistentVolumeClaimVolumeSource, PodAffinity, PodAntiAffinity, SecretVolumeSource,
    Toleration, TopologySpreadConstraint,
};
use serde::{Deserialize, Serialize};

pub(crate) const GROUP: &str = "ceph.rook.io";
pub(crate) const VERSION: &str = "v1";
pub(crate) const API_VERSION: &str = "ceph.rook.io/v1";

/// Placement is the placement for an object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Placement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_affinity: Option<NodeAffinity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_affinity: Option<PodAffinity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_anti_affinity: Option<PodAntiAffinity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology_spread_constraints: Option<Vec<TopologySpreadConstraint>>,
}

/// Pared down VolumeSource for configuration files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFileVolumeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_dir: Option<EmptyDirVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_path: Option<HostPathVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim: Option<PersistentVolumeClaimVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretVolumeSource>,
}

pub(crate) fn placement(description: &str) -> Attribute {
    Attribute::object(
        description,
        attributes([
            ("node_affinity", kubernetes::node_affinity()),
            ("pod_affinity", kubernetes::pod_affinity()),
            ("pod_anti_affinity", kubernetes::pod_anti_affinity()),
            (
                "tolerations",
                kubernetes::tolerations(
                    "The pod this Toleration is attached to tolerates any taint that matches \
                     the triple <key,value,effect> using the matching operator <operator>.",
                ),
            ),
            (
                "topology_spread_constraints",
                kubernetes::topology_spread_constraints(
                    "TopologySpreadConstraint specifies how to spread matching pods among the \
                     given topology",
                ),
            ),
        ]),
    )
    .optional()
}

pub(crate) fn pod_annotations() -> Attribute {
    Attribute::map(
        ElementType::String,
        "The annotations-related configuration to add/set on each Pod related object.",
    )
    .optional()
}

pub(crate) fn pod_labels() -> Attribute {
    Attribute::map(
        ElementType::String,
        "The labels-related configuration to add/set on each Pod related object.",
    )
    .optional()
}
