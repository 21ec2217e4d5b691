//! Attribute subtrees for Kubernetes core/v1 types embedded in custom resources
//!
//! Descriptions follow the upstream API reference.

use super::{attributes, Attribute, Attributes, ElementType, Validator};

/// Upper bound of int32 fields in the Kubernetes API
const INT32_MAX: i64 = i32::MAX as i64;

/// `metadata` block shared by every manifest resource
pub fn object_meta(namespaced: bool) -> Attribute {
    let mut children = vec![
        (
            "name",
            Attribute::string(
                "Unique identifier for this object. Must be a lowercase RFC 1123 subdomain.",
            )
            .required()
            .validator(Validator::StringLengthAtLeast { min: 1 })
            .validator(Validator::DnsSubdomainName),
        ),
        (
            "labels",
            Attribute::map(
                ElementType::String,
                "Map of string keys and values that can be used to organize and categorize \
                 (scope and select) objects. May match selectors of replication controllers \
                 and services.",
            )
            .optional()
            .validator(Validator::Labels),
        ),
        (
            "annotations",
            Attribute::map(
                ElementType::String,
                "Annotations is an unstructured key value map stored with a resource that may \
                 be set by external tools to store and retrieve arbitrary metadata.",
            )
            .optional()
            .validator(Validator::Annotations),
        ),
    ];
    if namespaced {
        children.push((
            "namespace",
            Attribute::string("Namespace defines the space within which the object is created.")
                .required()
                .validator(Validator::StringLengthAtLeast { min: 1 })
                .validator(Validator::DnsLabelName),
        ));
    }
    Attribute::object(
        "Data that helps uniquely identify this object.",
        attributes(children),
    )
    .required()
}

fn selector_requirement(description: &str) -> Attribute {
    Attribute::list_of_objects(
        description,
        attributes([
            (
                "key",
                Attribute::string("key is the label key that the selector applies to.").required(),
            ),
            (
                "operator",
                Attribute::string(
                    "operator represents a key's relationship to a set of values. Valid \
                     operators are In, NotIn, Exists and DoesNotExist.",
                )
                .required(),
            ),
            (
                "values",
                Attribute::list(
                    ElementType::String,
                    "values is an array of string values. If the operator is In or NotIn, the \
                     values array must be non-empty. If the operator is Exists or DoesNotExist, \
                     the values array must be empty.",
                )
                .optional(),
            ),
        ]),
    )
    .optional()
}

pub fn label_selector(description: &str) -> Attribute {
    Attribute::object(
        description,
        attributes([
            (
                "match_expressions",
                selector_requirement(
                    "matchExpressions is a list of label selector requirements. The \
                     requirements are ANDed.",
                ),
            ),
            (
                "match_labels",
                Attribute::map(
                    ElementType::String,
                    "matchLabels is a map of {key,value} pairs. A single {key,value} in the \
                     matchLabels map is equivalent to an element of matchExpressions, whose key \
                     field is 'key', the operator is 'In', and the values array contains only \
                     'value'.",
                )
                .optional(),
            ),
        ]),
    )
    .optional()
}

fn node_selector_term() -> Attributes {
    attributes([
        (
            "match_expressions",
            selector_requirement("A list of node selector requirements by node's labels."),
        ),
        (
            "match_fields",
            selector_requirement("A list of node selector requirements by node's fields."),
        ),
    ])
}

pub fn node_affinity() -> Attribute {
    Attribute::object(
        "NodeAffinity is a group of node affinity scheduling rules",
        attributes([
            (
                "preferred_during_scheduling_ignored_during_execution",
                Attribute::list_of_objects(
                    "The scheduler will prefer to schedule pods to nodes that satisfy the \
                     affinity expressions specified by this field, but it may choose a node \
                     that violates one or more of the expressions.",
                    attributes([
                        (
                            "preference",
                            Attribute::object(
                                "A node selector term, associated with the corresponding weight.",
                                node_selector_term(),
                            )
                            .required(),
                        ),
                        (
                            "weight",
                            Attribute::int64(
                                "Weight associated with matching the corresponding \
                                 nodeSelectorTerm, in the range 1-100.",
                            )
                            .required()
                            .validator(Validator::Int64Between { min: 1, max: 100 }),
                        ),
                    ]),
                )
                .optional(),
            ),
            (
                "required_during_scheduling_ignored_during_execution",
                Attribute::object(
                    "If the affinity requirements specified by this field are not met at \
                     scheduling time, the pod will not be scheduled onto the node.",
                    attributes([(
                        "node_selector_terms",
                        Attribute::list_of_objects(
                            "Required. A list of node selector terms. The terms are ORed.",
                            node_selector_term(),
                        )
                        .required(),
                    )]),
                )
                .optional(),
            ),
        ]),
    )
    .optional()
}

fn pod_affinity_term() -> Attributes {
    attributes([
        (
            "label_selector",
            label_selector("A label query over a set of resources, in this case pods."),
        ),
        (
            "match_label_keys",
            Attribute::list(
                ElementType::String,
                "MatchLabelKeys is a set of pod label keys to select which pods will be taken \
                 into consideration.",
            )
            .optional(),
        ),
        (
            "mismatch_label_keys",
            Attribute::list(
                ElementType::String,
                "MismatchLabelKeys is a set of pod label keys to select which pods will be \
                 taken into consideration.",
            )
            .optional(),
        ),
        (
            "namespace_selector",
            label_selector(
                "A label query over the set of namespaces that the term applies to.",
            ),
        ),
        (
            "namespaces",
            Attribute::list(
                ElementType::String,
                "namespaces specifies a static list of namespace names that the term applies \
                 to.",
            )
            .optional(),
        ),
        (
            "topology_key",
            Attribute::string(
                "This pod should be co-located (affinity) or not co-located (anti-affinity) \
                 with the pods matching the labelSelector in the specified namespaces, where \
                 co-located is defined as running on a node whose value of the label with key \
                 topologyKey matches that of any node on which any of the selected pods is \
                 running. Empty topologyKey is not allowed.",
            )
            .required(),
        ),
    ])
}

fn pod_affinity_rules(description: &str) -> Attribute {
    Attribute::object(
        description,
        attributes([
            (
                "preferred_during_scheduling_ignored_during_execution",
                Attribute::list_of_objects(
                    "The scheduler will prefer to schedule pods to nodes that satisfy the \
                     expressions specified by this field, but it may choose a node that \
                     violates one or more of the expressions.",
                    attributes([
                        (
                            "pod_affinity_term",
                            Attribute::object(
                                "Required. A pod affinity term, associated with the \
                                 corresponding weight.",
                                pod_affinity_term(),
                            )
                            .required(),
                        ),
                        (
                            "weight",
                            Attribute::int64(
                                "weight associated with matching the corresponding \
                                 podAffinityTerm, in the range 1-100.",
                            )
                            .required()
                            .validator(Validator::Int64Between { min: 1, max: 100 }),
                        ),
                    ]),
                )
                .optional(),
            ),
            (
                "required_during_scheduling_ignored_during_execution",
                Attribute::list_of_objects(
                    "If the requirements specified by this field are not met at scheduling \
                     time, the pod will not be scheduled onto the node.",
                    pod_affinity_term(),
                )
                .optional(),
            ),
        ]),
    )
    .optional()
}

pub fn pod_affinity() -> Attribute {
    pod_affinity_rules(
        "PodAffinity is a group of inter pod affinity scheduling rules",
    )
}

pub fn pod_anti_affinity() -> Attribute {
    pod_affinity_rules(
        "PodAntiAffinity is a group of inter pod anti affinity scheduling rules",
    )
}

pub fn tolerations(description: &str) -> Attribute {
    Attribute::list_of_objects(
        description,
        attributes([
            (
                "effect",
                Attribute::string(
                    "Effect indicates the taint effect to match. Empty means match all taint \
                     effects. When specified, allowed values are NoSchedule, PreferNoSchedule \
                     and NoExecute.",
                )
                .optional()
                .validator(Validator::one_of(["NoSchedule", "PreferNoSchedule", "NoExecute"])),
            ),
            (
                "key",
                Attribute::string(
                    "Key is the taint key that the toleration applies to. Empty means match all \
                     taint keys.",
                )
                .optional(),
            ),
            (
                "operator",
                Attribute::string(
                    "Operator represents a key's relationship to the value. Valid operators are \
                     Exists and Equal. Defaults to Equal.",
                )
                .optional()
                .validator(Validator::one_of(["Exists", "Equal"])),
            ),
            (
                "toleration_seconds",
                Attribute::int64(
                    "TolerationSeconds represents the period of time the toleration (which must \
                     be of effect NoExecute, otherwise this field is ignored) tolerates the \
                     taint.",
                )
                .optional(),
            ),
            (
                "value",
                Attribute::string(
                    "Value is the taint value the toleration matches to. If the operator is \
                     Exists, the value should be empty, otherwise just a regular string.",
                )
                .optional(),
            ),
        ]),
    )
    .optional()
}

pub fn topology_spread_constraints(description: &str) -> Attribute {
    Attribute::list_of_objects(
        description,
        attributes([
            (
                "label_selector",
                label_selector(
                    "LabelSelector is used to find matching pods. Pods that match this label \
                     selector are counted to determine the number of pods in their \
                     corresponding topology domain.",
                ),
            ),
            (
                "match_label_keys",
                Attribute::list(
                    ElementType::String,
                    "MatchLabelKeys is a set of pod label keys to select the pods over which \
                     spreading will be calculated.",
                )
                .optional(),
            ),
            (
                "max_skew",
                Attribute::int64(
                    "MaxSkew describes the degree to which pods may be unevenly distributed. \
                     It's a required field. Default value is 1 and 0 is not allowed.",
                )
                .required()
                .validator(Validator::Int64Between {
                    min: 1,
                    max: INT32_MAX,
                }),
            ),
            (
                "min_domains",
                Attribute::int64(
                    "MinDomains indicates a minimum number of eligible domains. When value is \
                     not nil, WhenUnsatisfiable must be DoNotSchedule and minDomains must be \
                     greater than 0.",
                )
                .optional()
                .validator(Validator::Int64Between {
                    min: 1,
                    max: INT32_MAX,
                }),
            ),
            (
                "node_affinity_policy",
                Attribute::string(
                    "NodeAffinityPolicy indicates how we will treat Pod's \
                     nodeAffinity/nodeSelector when calculating pod topology spread skew. \
                     Options are Honor and Ignore.",
                )
                .optional()
                .validator(Validator::one_of(["Honor", "Ignore"])),
            ),
            (
                "node_taints_policy",
                Attribute::string(
                    "NodeTaintsPolicy indicates how we will treat node taints when calculating \
                     pod topology spread skew. Options are Honor and Ignore.",
                )
                .optional()
                .validator(Validator::one_of(["Honor", "Ignore"])),
            ),
            (
                "topology_key",
                Attribute::string(
                    "TopologyKey is the key of node labels. Nodes that have a label with this \
                     key and identical values are considered to be in the same topology.",
                )
                .required(),
            ),
            (
                "when_unsatisfiable",
                Attribute::string(
                    "WhenUnsatisfiable indicates how to deal with a pod if it doesn't satisfy \
                     the spread constraint. DoNotSchedule (default) tells the scheduler not to \
                     schedule it. ScheduleAnyway tells the scheduler to schedule the pod in any \
                     location.",
                )
                .required()
                .validator(Validator::one_of(["DoNotSchedule", "ScheduleAnyway"])),
            ),
        ]),
    )
    .optional()
}

pub fn resource_requirements(description: &str) -> Attribute {
    Attribute::object(
        description,
        attributes([
            (
                "claims",
                Attribute::list_of_objects(
                    "Claims lists the names of resources, defined in spec.resourceClaims, that \
                     are used by this container.",
                    attributes([(
                        "name",
                        Attribute::string(
                            "Name must match the name of one entry in pod.spec.resourceClaims of \
                             the Pod where this field is used.",
                        )
                        .required(),
                    )]),
                )
                .optional(),
            ),
            (
                "limits",
                Attribute::map(
                    ElementType::String,
                    "Limits describes the maximum amount of compute resources allowed.",
                )
                .optional(),
            ),
            (
                "requests",
                Attribute::map(
                    ElementType::String,
                    "Requests describes the minimum amount of compute resources required.",
                )
                .optional(),
            ),
        ]),
    )
    .optional()
}

fn key_to_path_items() -> Attribute {
    Attribute::list_of_objects(
        "items if unspecified, each key-value pair in the Data field of the referenced object \
         will be projected into the volume as a file whose name is the key and content is the \
         value.",
        attributes([
            ("key", Attribute::string("key is the key to project.").required()),
            (
                "mode",
                Attribute::int64(
                    "mode is Optional: mode bits used to set permissions on this file. Must be \
                     an octal value between 0000 and 0777 or a decimal value between 0 and 511.",
                )
                .optional()
                .validator(Validator::Int64Between { min: 0, max: 511 }),
            ),
            (
                "path",
                Attribute::string(
                    "path is the relative path of the file to map the key to. May not be an \
                     absolute path. May not contain the path element '..'.",
                )
                .required(),
            ),
        ]),
    )
    .optional()
}

fn default_mode() -> Attribute {
    Attribute::int64(
        "defaultMode is optional: mode bits used to set permissions on created files by \
         default. Must be an octal value between 0000 and 0777 or a decimal value between 0 \
         and 511.",
    )
    .optional()
    .validator(Validator::Int64Between { min: 0, max: 511 })
}

/// Volume source subset accepted for configuration files mounted into pods
pub fn config_file_volume_source(description: &str) -> Attribute {
    Attribute::object(
        description,
        attributes([
            (
                "config_map",
                Attribute::object(
                    "configMap represents a configMap that should populate this volume",
                    attributes([
                        ("default_mode", default_mode()),
                        ("items", key_to_path_items()),
                        (
                            "name",
                            Attribute::string("Name of the referent.").optional(),
                        ),
                        (
                            "optional",
                            Attribute::bool(
                                "optional specify whether the ConfigMap or its keys must be \
                                 defined",
                            )
                            .optional(),
                        ),
                    ]),
                )
                .optional(),
            ),
            (
                "empty_dir",
                Attribute::object(
                    "emptyDir represents a temporary directory that shares a pod's lifetime.",
                    attributes([
                        (
                            "medium",
                            Attribute::string(
                                "medium represents what type of storage medium should back \
                                 this directory. The default is \"\" which means to use the \
                                 node's default medium. Must be an empty string (default) or \
                                 Memory.",
                            )
                            .optional(),
                        ),
                        (
                            "size_limit",
                            Attribute::string(
                                "sizeLimit is the total amount of local storage required for \
                                 this EmptyDir volume.",
                            )
                            .optional(),
                        ),
                    ]),
                )
                .optional(),
            ),
            (
                "host_path",
                Attribute::object(
                    "hostPath represents a pre-existing file or directory on the host machine \
                     that is directly exposed to the container.",
                    attributes([
                        (
                            "path",
                            Attribute::string(
                                "path of the directory on the host. If the path is a symlink, it \
                                 will follow the link to the real path.",
                            )
                            .required(),
                        ),
                        (
                            "type",
                            Attribute::string(
                                "type for HostPath Volume. Defaults to \"\".",
                            )
                            .optional(),
                        ),
                    ]),
                )
                .optional(),
            ),
            (
                "persistent_volume_claim",
                Attribute::object(
                    "persistentVolumeClaimVolumeSource represents a reference to a \
                     PersistentVolumeClaim in the same namespace.",
                    attributes([
                        (
                            "claim_name",
                            Attribute::string(
                                "claimName is the name of a PersistentVolumeClaim in the same \
                                 namespace as the pod using this volume.",
                            )
                            .required(),
                        ),
                        (
                            "read_only",
                            Attribute::bool(
                                "readOnly Will force the ReadOnly setting in VolumeMounts. \
                                 Default false.",
                            )
                            .optional(),
                        ),
                    ]),
                )
                .optional(),
            ),
            (
                "secret",
                Attribute::object(
                    "secret represents a secret that should populate this volume.",
                    attributes([
                        ("default_mode", default_mode()),
                        ("items", key_to_path_items()),
                        (
                            "optional",
                            Attribute::bool(
                                "optional field specify whether the Secret or its keys must be \
                                 defined",
                            )
                            .optional(),
                        ),
                        (
                            "secret_name",
                            Attribute::string(
                                "secretName is the name of the secret in the pod's namespace to \
                                 use.",
                            )
                            .optional(),
                        ),
                    ]),
                )
                .optional(),
            ),
        ]),
    )
    .optional()
}
