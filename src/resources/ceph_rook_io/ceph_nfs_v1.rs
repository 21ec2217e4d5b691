use super::{placement, pod_annotations, pod_labels, ConfigFileVolumeSource, Placement};
use crate::resource::{resource_schema, ManifestResource};
use crate::schema::{attributes, kubernetes, Attribute, Schema, Validator};
use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const GANESHA_LOG_LEVELS: [&str; 10] = [
    "NIV_NULL",
    "NIV_FATAL",
    "NIV_MAJ",
    "NIV_CRIT",
    "NIV_WARN",
    "NIV_EVENT",
    "NIV_INFO",
    "NIV_DEBUG",
    "NIV_MID_DEBUG",
    "NIV_FULL_DEBUG",
];

/// CephNFS represents a Ceph NFS
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CephNfs {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<NfsGaneshaSpec>,
}

impl k8s_openapi::Resource for CephNfs {
    const API_VERSION: &'static str = super::API_VERSION;
    const GROUP: &'static str = super::GROUP;
    const KIND: &'static str = "CephNFS";
    const VERSION: &'static str = super::VERSION;
    const URL_PATH_SEGMENT: &'static str = "cephnfses";
    type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for CephNfs {
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
pub struct NfsGaneshaSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rados: Option<GaneshaRadosSpec>,
    pub server: GaneshaServerSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<NfsSecuritySpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GaneshaRadosSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GaneshaServerSpec {
    pub active: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_network: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NfsSecuritySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kerberos: Option<KerberosSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sssd: Option<SssdSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KerberosSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_files: Option<VolumeSourceFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keytab_file: Option<VolumeSourceFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,
}

/// Wrapper holding the volume source of a mounted file or directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VolumeSourceFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_source: Option<ConfigFileVolumeSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SssdSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidecar: Option<SssdSidecar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SssdSidecar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_files: Option<Vec<AdditionalVolumeMount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_level: Option<i64>,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sssd_config_file: Option<VolumeSourceFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdditionalVolumeMount {
    pub sub_path: String,
    pub volume_source: ConfigFileVolumeSource,
}

/// `k8s_ceph_rook_io_ceph_nfs_v1`
pub struct CephNfsResource;

impl ManifestResource for CephNfsResource {
    type Manifest = CephNfs;

    const TYPE_SUFFIX: &'static str = "ceph_rook_io_ceph_nfs_v1";

    fn schema() -> Schema {
        resource_schema(
            "CephNFS represents a Ceph NFS",
            true,
            Some(
                Attribute::object(
                    "NFSGaneshaSpec represents the spec of an nfs ganesha server",
                    attributes([
                        ("rados", rados()),
                        ("security", security()),
                        ("server", server()),
                    ]),
                )
                .required(),
            ),
        )
    }
}

fn rados() -> Attribute {
    Attribute::object(
        "RADOS is the Ganesha RADOS specification",
        attributes([
            (
                "namespace",
                Attribute::string(
                    "The namespace inside the Ceph pool (set by 'pool') where shared NFS-Ganesha \
                     config is stored. This setting is deprecated as it is internally set to the \
                     name of the CephNFS.",
                )
                .optional()
                .deprecated("rados.namespace is ignored; Rook uses the name of the CephNFS."),
            ),
            (
                "pool",
                Attribute::string(
                    "The Ceph pool used store the shared configuration for NFS-Ganesha daemons. \
                     This setting is deprecated, as it is internally required to be '.nfs'.",
                )
                .optional()
                .deprecated("rados.pool is ignored; Rook always uses the '.nfs' pool."),
            ),
        ]),
    )
    .optional()
}

fn server() -> Attribute {
    Attribute::object(
        "Server is the Ganesha Server specification",
        attributes([
            (
                "active",
                Attribute::int64("The number of active Ganesha servers")
                    .required()
                    .validator(Validator::Int64AtLeast { min: 1 }),
            ),
            ("annotations", pod_annotations()),
            (
                "host_network",
                Attribute::bool(
                    "Whether host networking is enabled for the Ganesha server. If not set, the \
                     network settings from the cluster CR will be applied.",
                )
                .optional(),
            ),
            ("labels", pod_labels()),
            (
                "log_level",
                Attribute::string("LogLevel set logging level")
                    .optional()
                    .validator(Validator::one_of(GANESHA_LOG_LEVELS)),
            ),
            ("placement", placement("The affinity to place the ganesha pods")),
            (
                "priority_class_name",
                Attribute::string("PriorityClassName sets the priority class on the pods")
                    .optional(),
            ),
            (
                "resources",
                kubernetes::resource_requirements("Resources set resource requests and limits"),
            ),
        ]),
    )
    .required()
}

fn volume_source_file(description: &str, volume_description: &str) -> Attribute {
    Attribute::object(
        description,
        attributes([(
            "volume_source",
            kubernetes::config_file_volume_source(volume_description),
        )]),
    )
    .optional()
}

fn security() -> Attribute {
    Attribute::object(
        "Security allows specifying security configurations for the NFS cluster",
        attributes([
            (
                "kerberos",
                Attribute::object(
                    "Kerberos configures NFS-Ganesha to secure NFS client connections with \
                     Kerberos.",
                    attributes([
                        (
                            "config_files",
                            volume_source_file(
                                "ConfigFiles defines where the Kerberos configuration should be \
                                 sourced from. Config files will be placed into the \
                                 '/etc/krb5.conf.rook/' directory. If this is left empty, Rook \
                                 will not add any files.",
                                "VolumeSource accepts a pared down version of the standard \
                                 Kubernetes VolumeSource for Kerberos configuration files.",
                            ),
                        ),
                        (
                            "domain_name",
                            Attribute::string("DomainName should be set to the Kerberos Realm.")
                                .optional(),
                        ),
                        (
                            "keytab_file",
                            volume_source_file(
                                "KeytabFile defines where the Kerberos keytab should be sourced \
                                 from. The keytab file will be placed into '/etc/krb5.keytab'. \
                                 If this is left empty, Rook will not add the file.",
                                "VolumeSource accepts a pared down version of the standard \
                                 Kubernetes VolumeSource for the Kerberos keytab file.",
                            ),
                        ),
                        (
                            "principal_name",
                            Attribute::string(
                                "PrincipalName corresponds directly to NFS-Ganesha's \
                                 NFS_KRB5:PrincipalName config. In practice, this is the \
                                 service prefix of the principal name. The default is 'nfs'.",
                            )
                            .optional(),
                        ),
                    ]),
                )
                .optional(),
            ),
            (
                "sssd",
                Attribute::object(
                    "SSSD enables integration with System Security Services Daemon (SSSD). SSSD \
                     can be used to provide user ID mapping from a number of sources.",
                    attributes([("sidecar", sssd_sidecar())]),
                )
                .optional(),
            ),
        ]),
    )
    .optional()
}

fn sssd_sidecar() -> Attribute {
    Attribute::object(
        "Sidecar tells Rook to run SSSD in a sidecar alongside the NFS-Ganesha server in each \
         NFS pod.",
        attributes([
            (
                "additional_files",
                Attribute::list_of_objects(
                    "AdditionalFiles defines any number of additional files that should be \
                     mounted into the SSSD sidecar. These files may be referenced by the \
                     sssd.conf config file.",
                    attributes([
                        (
                            "sub_path",
                            Attribute::string(
                                "SubPath defines the sub-path (subdirectory) of the directory \
                                 root where the volumeSource will be mounted. Each subPath \
                                 definition must be unique and must not contain ':'.",
                            )
                            .required()
                            .validator(Validator::StringLengthAtLeast { min: 1 })
                            .validator(Validator::matches(
                                "^[^:]+$",
                                "value must not contain ':'",
                            )),
                        ),
                        (
                            "volume_source",
                            kubernetes::config_file_volume_source(
                                "VolumeSource accepts a pared down version of the standard \
                                 Kubernetes VolumeSource for the additional file(s).",
                            )
                            .required(),
                        ),
                    ]),
                )
                .optional(),
            ),
            (
                "debug_level",
                Attribute::int64(
                    "DebugLevel sets the debug level for SSSD. If unset or set to 0, Rook does \
                     nothing. Otherwise, this may be a value between 1 and 10.",
                )
                .optional()
                .validator(Validator::Int64Between { min: 0, max: 10 }),
            ),
            (
                "image",
                Attribute::string(
                    "Image defines the container image that should be used for the SSSD sidecar.",
                )
                .required()
                .validator(Validator::StringLengthAtLeast { min: 1 }),
            ),
            (
                "resources",
                kubernetes::resource_requirements(
                    "Resources allow specifying resource requests/limits on the SSSD sidecar \
                     container.",
                ),
            ),
            (
                "sssd_config_file",
                volume_source_file(
                    "SSSDConfigFile defines where the SSSD configuration should be sourced from. \
                     The config file will be placed into '/etc/sssd/sssd.conf'. If this is left \
                     empty, Rook will not add the file.",
                    "VolumeSource accepts a pared down version of the standard Kubernetes \
                     VolumeSource for the SSSD configuration file.",
                ),
            ),
        ]),
    )
    .optional()
}
