#[cfg(test)]
mod tests {
    use crate::resources::ceph_rook_io::{CephClientResource, CephNfsResource};
    use crate::{CreateRequest, ProviderBuilder};
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let provider = ProviderBuilder::default().build();
        assert_eq!(provider.type_name(), "k8s");
        assert!(provider.resource_types().is_empty());
    }

    #[test]
    fn test_builder_with_resource() {
        let provider = ProviderBuilder::new()
            .with_resource::<CephNfsResource>()
            .with_resource::<CephClientResource>()
            .build();
        assert_eq!(
            provider.resource_types(),
            vec!["k8s_ceph_rook_io_ceph_client_v1", "k8s_ceph_rook_io_ceph_nfs_v1"]
        );
    }

    #[test]
    fn test_builder_with_type_name() {
        let provider = ProviderBuilder::new()
            .with_type_name("rook")
            .with_resource::<CephNfsResource>()
            .build();
        assert_eq!(provider.type_name(), "rook");
        assert!(provider.resource_schema("rook_ceph_rook_io_ceph_nfs_v1").is_ok());
        assert!(provider.resource_schema("k8s_ceph_rook_io_ceph_nfs_v1").is_err());
    }

    #[test]
    fn test_builder_registering_twice_keeps_one_entry() {
        let provider = ProviderBuilder::new()
            .with_resource::<CephNfsResource>()
            .with_rook_resources()
            .build();
        assert_eq!(provider.resource_types().len(), 4);
    }

    #[test]
    fn test_builder_with_id_generator() {
        let provider = ProviderBuilder::new()
            .with_resource::<CephClientResource>()
            .with_id_generator(|| "42".to_string())
            .build();

        let state = provider
            .create(
                "k8s_ceph_rook_io_ceph_client_v1",
                CreateRequest {
                    plan: json!({
                        "metadata": { "name": "glance", "namespace": "rook-ceph" },
                        "spec": { "caps": { "mon": "allow r" } }
                    }),
                },
            )
            .unwrap()
            .state
            .unwrap();
        assert_eq!(state["id"], "42");
    }

    #[test]
    fn test_builder_without_validation() {
        let provider = ProviderBuilder::new()
            .with_resource::<CephClientResource>()
            .without_validation()
            .build();

        // secret_name would fail DNS subdomain validation
        let response = provider
            .create(
                "k8s_ceph_rook_io_ceph_client_v1",
                CreateRequest {
                    plan: json!({
                        "metadata": { "name": "glance", "namespace": "rook-ceph" },
                        "spec": { "caps": { "mon": "allow r" }, "secret_name": "Not A Name" }
                    }),
                },
            )
            .unwrap();
        assert!(response.state.is_some());

        let diagnostics = provider
            .validate_resource_config("k8s_ceph_rook_io_ceph_client_v1", &json!({}))
            .unwrap();
        assert!(diagnostics.is_empty());
    }
}
