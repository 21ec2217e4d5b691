#[cfg(test)]
mod tests {
    use crate::diagnostics::Diagnostics;
    use crate::resources::ceph_rook_io::CephNfsResource;
    use crate::schema::{attributes, Attribute, ElementType, Schema, Validator};
    use crate::validator::{strip_computed, AttributeValidator, SchemaValidator};
    use crate::{ManifestResource, ProviderBuilder};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn schema() -> Schema {
        Schema::new(
            "Test resource",
            attributes([
                ("id", Attribute::string("Identifier").computed()),
                ("name", Attribute::string("Name").required()),
                ("ports", Attribute::list(ElementType::Int64, "Ports").optional()),
                ("labels", Attribute::map(ElementType::String, "Labels").optional()),
                (
                    "mounts",
                    Attribute::list_of_objects(
                        "Mounts",
                        attributes([(
                            "sub_path",
                            Attribute::string("Sub path")
                                .required()
                                .validator(Validator::matches("^[^:]+$", "must not contain ':'")),
                        )]),
                    )
                    .optional(),
                ),
                (
                    "count",
                    Attribute::int64("Count")
                        .optional()
                        .validator(Validator::Int64AtLeast { min: 1 }),
                ),
            ]),
        )
    }

    fn summaries(diagnostics: &Diagnostics) -> Vec<(&str, Option<&str>)> {
        diagnostics
            .iter()
            .map(|d| (d.summary.as_str(), d.attribute.as_deref()))
            .collect()
    }

    #[test]
    fn test_valid_config() {
        let config = json!({
            "name": "a",
            "ports": [80, 443],
            "labels": { "app": "nfs" },
            "mounts": [{ "sub_path": "ldap" }],
            "count": 3
        });
        assert!(AttributeValidator.validate(&schema(), &config).is_empty());
    }

    #[test]
    fn test_null_counts_as_unset() {
        let config = json!({ "name": "a", "count": null, "mounts": null });
        assert!(AttributeValidator.validate(&schema(), &config).is_empty());
    }

    #[test]
    fn test_unsupported_and_missing() {
        let diagnostics = AttributeValidator.validate(&schema(), &json!({ "replicas": 2 }));
        assert_eq!(
            summaries(&diagnostics),
            vec![
                ("Unsupported argument", Some("replicas")),
                ("Missing required argument", Some("name")),
            ]
        );
    }

    #[test]
    fn test_computed_attribute_is_read_only() {
        let config = json!({ "id": "1", "name": "a" });
        let diagnostics = AttributeValidator.validate(&schema(), &config);
        assert_eq!(
            summaries(&diagnostics),
            vec![("Invalid Configuration for Read-Only Attribute", Some("id"))]
        );
    }

    #[test]
    fn test_type_mismatches() {
        let config = json!({
            "name": 5,
            "ports": [80, "https"],
            "labels": { "app": true },
            "mounts": ["ldap"],
            "count": "three"
        });
        let diagnostics = AttributeValidator.validate(&schema(), &config);
        assert!(diagnostics
            .iter()
            .all(|d| d.summary == "Incorrect attribute value type"));

        let paths: Vec<_> = summaries(&diagnostics).into_iter().filter_map(|(_, p)| p).collect();
        assert_eq!(
            paths,
            vec!["count", "labels[\"app\"]", "mounts[0]", "name", "ports[1]"]
        );
    }

    #[test]
    fn test_attached_validators_run_on_nested_paths() {
        let config = json!({
            "name": "a",
            "mounts": [{ "sub_path": "ok" }, { "sub_path": "a:b" }],
            "count": 0
        });
        let diagnostics = AttributeValidator.validate(&schema(), &config);
        assert_eq!(
            summaries(&diagnostics),
            vec![
                ("Invalid Attribute Value", Some("count")),
                ("Invalid Attribute Value Match", Some("mounts[1].sub_path")),
            ]
        );
    }

    #[test]
    fn test_non_object_config() {
        let diagnostics = AttributeValidator.validate(&schema(), &json!("name"));
        assert!(diagnostics.has_error());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_strip_computed() {
        let plan = json!({ "id": "1", "name": "a", "unknown": true });
        assert_eq!(
            strip_computed(&schema(), &plan),
            json!({ "name": "a", "unknown": true })
        );
    }

    #[test]
    fn test_nfs_sidecar_validation() {
        let config = json!({
            "metadata": { "name": "my-nfs", "namespace": "rook-ceph" },
            "spec": {
                "server": { "active": 1 },
                "security": {
                    "sssd": {
                        "sidecar": {
                            "image": "",
                            "debug_level": 11,
                            "additional_files": [{ "sub_path": "a:b", "volume_source": {} }]
                        }
                    }
                }
            }
        });
        let diagnostics = AttributeValidator.validate(&CephNfsResource::schema(), &config);
        let paths: Vec<_> = summaries(&diagnostics).into_iter().filter_map(|(_, p)| p).collect();
        assert!(paths.contains(&"spec.security.sssd.sidecar.image"));
        assert!(paths.contains(&"spec.security.sssd.sidecar.debug_level"));
        assert!(paths.contains(&"spec.security.sssd.sidecar.additional_files[0].sub_path"));
    }

    #[test]
    fn test_int32_fields_are_bounded() {
        let config = |min_domains: i64| {
            json!({
                "metadata": { "name": "my-nfs", "namespace": "rook-ceph" },
                "spec": {
                    "server": {
                        "active": 1,
                        "placement": {
                            "topology_spread_constraints": [{
                                "max_skew": i64::from(i32::MAX),
                                "min_domains": min_domains,
                                "topology_key": "kubernetes.io/hostname",
                                "when_unsatisfiable": "DoNotSchedule"
                            }]
                        }
                    }
                }
            })
        };
        let schema = CephNfsResource::schema();

        let diagnostics = AttributeValidator.validate(&schema, &config(i64::from(i32::MAX)));
        assert!(diagnostics.is_empty());

        let diagnostics = AttributeValidator.validate(&schema, &config(i64::from(i32::MAX) + 1));
        assert_eq!(
            summaries(&diagnostics),
            vec![(
                "Invalid Attribute Value",
                Some("spec.server.placement.topology_spread_constraints[0].min_domains")
            )]
        );
    }

    #[test]
    fn test_deprecated_attribute_warns_only_when_set() {
        let schema = Schema::new(
            "Test resource",
            attributes([(
                "pool",
                Attribute::string("Pool").optional().deprecated("pool is ignored"),
            )]),
        );

        assert!(AttributeValidator.validate(&schema, &json!({})).is_empty());

        let diagnostics = AttributeValidator.validate(&schema, &json!({ "pool": ".nfs" }));
        assert!(!diagnostics.has_error());
        assert_eq!(summaries(&diagnostics), vec![("Attribute Deprecated", Some("pool"))]);
    }

    struct CountingValidator {
        calls: AtomicUsize,
    }

    impl SchemaValidator for CountingValidator {
        fn validate(&self, _schema: &Schema, _config: &Value) -> Diagnostics {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Diagnostics::new()
        }
    }

    #[test]
    fn test_custom_validator_replaces_default() {
        let validator = Arc::new(CountingValidator {
            calls: AtomicUsize::new(0),
        });
        let provider = ProviderBuilder::new()
            .with_rook_resources()
            .with_validator(validator.clone())
            .build();

        let response = provider
            .create(
                "k8s_ceph_rook_io_ceph_nfs_v1",
                crate::CreateRequest {
                    plan: json!({
                        "metadata": { "name": "my-nfs", "namespace": "rook-ceph" },
                        "spec": { "server": { "active": 0 } }
                    }),
                },
            )
            .unwrap();
        assert!(response.state.is_some());
        assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
    }
}
