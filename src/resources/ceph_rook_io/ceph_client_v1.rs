use crate::resource::{resource_schema, ManifestResource};
use crate::schema::{attributes, Attribute, ElementType, Schema, Validator};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CephClient represents a Ceph Client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CephClient {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<CephClientSpec>,
}

impl k8s_openapi::Resource for CephClient {
    const API_VERSION: &'static str = super::API_VERSION;
    const GROUP: &'static str = super::GROUP;
    const KIND: &'static str = "CephClient";
    const VERSION: &'static str = super::VERSION;
    const URL_PATH_SEGMENT: &'static str = "cephclients";
    type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for CephClient {
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
pub struct CephClientSpec {
    pub caps: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

/// `k8s_ceph_rook_io_ceph_client_v1`
pub struct CephClientResource;

impl ManifestResource for CephClientResource {
    type Manifest = CephClient;

    const TYPE_SUFFIX: &'static str = "ceph_rook_io_ceph_client_v1";

    fn schema() -> Schema {
        resource_schema(
            "CephClient represents a Ceph Client",
            true,
            Some(
                Attribute::object(
                    "Spec represents the specification of a Ceph Client",
                    attributes([
                        (
                            "caps",
                            Attribute::map(
                                ElementType::String,
                                "Caps maps each Ceph daemon type (mon, osd, mds, mgr) to the \
                                 capability string granted to this client.",
                            )
                            .required(),
                        ),
                        (
                            "name",
                            Attribute::string(
                                "Name is the name of the Ceph client. Defaults to the name of \
                                 the CephClient resource.",
                            )
                            .optional(),
                        ),
                        (
                            "secret_name",
                            Attribute::string(
                                "SecretName is the name of the secret created for this ceph \
                                 client. If not specified, the default name \
                                 'rook-ceph-client-' as a prefix to the CephClient resource name \
                                 is used.",
                            )
                            .optional()
                            .validator(Validator::DnsSubdomainName),
                        ),
                    ]),
                )
                .required(),
            ),
        )
    }
}
