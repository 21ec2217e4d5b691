#[cfg(test)]
mod tests {
    use crate::utils::*;
    use serde_json::json;

    #[test]
    fn test_to_lower_camel_case() {
        assert_eq!(to_lower_camel_case("spec"), "spec");
        assert_eq!(to_lower_camel_case("api_version"), "apiVersion");
        assert_eq!(to_lower_camel_case("priority_class_name"), "priorityClassName");
        assert_eq!(to_lower_camel_case("sssd_config_file"), "sssdConfigFile");
        assert_eq!(
            to_lower_camel_case("preferred_during_scheduling_ignored_during_execution"),
            "preferredDuringSchedulingIgnoredDuringExecution"
        );
    }

    #[test]
    fn test_to_lower_camel_case_ignores_leading_underscore() {
        assert_eq!(to_lower_camel_case("_type"), "type");
    }

    #[test]
    fn test_timestamp_id_is_numeric_and_increasing() {
        let first: i64 = timestamp_id().parse().unwrap();
        let second: i64 = timestamp_id().parse().unwrap();
        assert!(first > 0);
        assert!(second >= first);
    }

    #[test]
    fn test_extract_gvk() {
        let obj = json!({
            "apiVersion": "ceph.rook.io/v1",
            "kind": "CephNFS",
            "metadata": { "name": "my-nfs" }
        });

        let gvk = extract_gvk(&obj).unwrap();
        assert_eq!(gvk.group, "ceph.rook.io");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.kind, "CephNFS");
    }

    #[test]
    fn test_extract_gvk_core_group() {
        let gvk = extract_gvk(&json!({ "apiVersion": "v1", "kind": "ConfigMap" })).unwrap();
        assert_eq!(gvk.group, "");
        assert_eq!(gvk.version, "v1");
    }

    #[test]
    fn test_extract_gvk_missing_kind() {
        let result = extract_gvk(&json!({ "apiVersion": "v1" }));
        assert!(matches!(result, Err(crate::Error::InvalidRequest(_))));
    }
}
