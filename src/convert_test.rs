#[cfg(test)]
mod tests {
    use crate::convert::{from_manifest_value, to_manifest_value};
    use crate::schema::{attributes, Attribute, Attributes, ElementType};
    use crate::Error;
    use serde_json::json;

    fn server_attributes() -> Attributes {
        attributes([
            ("active", Attribute::int64("Active servers").required()),
            ("priority_class_name", Attribute::string("Priority class").optional()),
            ("labels", Attribute::map(ElementType::String, "Pod labels").optional()),
            (
                "additional_files",
                Attribute::list_of_objects(
                    "Files",
                    attributes([
                        ("sub_path", Attribute::string("Sub path").required()),
                        (
                            "host_path_type",
                            Attribute::string("Type").optional().with_yaml_name("type"),
                        ),
                    ]),
                )
                .optional(),
            ),
        ])
    }

    #[test]
    fn test_to_manifest_renames_attributes() {
        let value = json!({
            "active": 1,
            "priority_class_name": "high",
            "additional_files": [{ "sub_path": "ldap", "host_path_type": "Directory" }]
        });

        let manifest = to_manifest_value(&server_attributes(), &value, "spec.server").unwrap();
        assert_eq!(
            manifest,
            json!({
                "active": 1,
                "priorityClassName": "high",
                "additionalFiles": [{ "subPath": "ldap", "type": "Directory" }]
            })
        );
    }

    #[test]
    fn test_map_keys_are_untouched() {
        let value = json!({ "active": 1, "labels": { "team_name": "storage" } });
        let manifest = to_manifest_value(&server_attributes(), &value, "").unwrap();
        assert_eq!(manifest["labels"], json!({ "team_name": "storage" }));

        let back = from_manifest_value(&server_attributes(), &manifest, "").unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_nulls_are_dropped() {
        let value = json!({ "active": 1, "priority_class_name": null, "labels": null });
        let manifest = to_manifest_value(&server_attributes(), &value, "").unwrap();
        assert_eq!(manifest, json!({ "active": 1 }));
    }

    #[test]
    fn test_unknown_attribute() {
        let value = json!({ "active": 1, "replicas": 2 });
        let err = to_manifest_value(&server_attributes(), &value, "spec.server").unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { path } if path == "spec.server.replicas"));
    }

    #[test]
    fn test_from_manifest_unknown_field() {
        let manifest = json!({ "active": 1, "additionalFiles": [{ "subPath": "a", "mode": 1 }] });
        let err = from_manifest_value(&server_attributes(), &manifest, "spec").unwrap_err();
        assert!(
            matches!(err, Error::UnknownField { path } if path == "spec.additional_files[0].mode")
        );
    }

    #[test]
    fn test_from_manifest_restores_attribute_names() {
        let manifest = json!({
            "priorityClassName": "high",
            "additionalFiles": [{ "subPath": "ldap", "type": "Directory" }]
        });

        let value = from_manifest_value(&server_attributes(), &manifest, "").unwrap();
        assert_eq!(
            value,
            json!({
                "priority_class_name": "high",
                "additional_files": [{ "sub_path": "ldap", "host_path_type": "Directory" }]
            })
        );
    }

    #[test]
    fn test_shape_errors() {
        let err = to_manifest_value(&server_attributes(), &json!([1]), "").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        let err = to_manifest_value(
            &server_attributes(),
            &json!({ "additional_files": { "sub_path": "a" } }),
            "spec",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(msg) if msg.contains("spec.additional_files")));
    }
}
