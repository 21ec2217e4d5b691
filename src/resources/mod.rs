//! Custom resource kinds, one module per API group

pub mod ceph_rook_io;

#[cfg(test)]
mod tests {
    use crate::resource::CreateRequest;
    use crate::schema::{Attribute, AttributeType, Attributes, ElementType};
    use crate::ProviderBuilder;
    use serde_json::{json, Value};

    fn sample_element(element: ElementType) -> Value {
        match element {
            ElementType::String => json!("sample"),
            ElementType::Int64 => json!(1),
            ElementType::Bool => json!(true),
        }
    }

    fn sample(attribute: &Attribute) -> Value {
        match &attribute.kind {
            AttributeType::String => sample_element(ElementType::String),
            AttributeType::Int64 => sample_element(ElementType::Int64),
            AttributeType::Bool => sample_element(ElementType::Bool),
            AttributeType::List(element) => json!([sample_element(*element)]),
            AttributeType::Map(element) => json!({ "example.com/key": sample_element(*element) }),
            AttributeType::Object(children) => sample_object(children),
            AttributeType::ListOfObjects(children) => json!([sample_object(children)]),
        }
    }

    /// Every configurable attribute populated
    fn sample_object(attributes: &Attributes) -> Value {
        Value::Object(
            attributes
                .iter()
                .filter(|(_, attribute)| !attribute.is_computed_only())
                .map(|(name, attribute)| (name.clone(), sample(attribute)))
                .collect(),
        )
    }

    /// Render a fully populated configuration for every resource, import the
    /// YAML again and expect the identical attribute tree back. A misspelled
    /// manifest field either fails rendering or goes missing on import.
    #[test]
    fn test_every_attribute_round_trips_through_yaml() {
        let provider = ProviderBuilder::new()
            .with_rook_resources()
            .without_validation()
            .with_id_generator(|| "1".to_string())
            .build();

        for type_name in provider.resource_types() {
            let schema = provider.resource_schema(&type_name).unwrap();
            let plan = sample_object(&schema.attributes);

            let created = provider
                .create(&type_name, CreateRequest { plan: plan.clone() })
                .unwrap();
            assert!(
                !created.diagnostics.has_error(),
                "{}: {:?}",
                type_name,
                created.diagnostics
            );
            let state = created.state.unwrap();
            let yaml = state["yaml"].as_str().unwrap();

            let imported = provider.import_manifests(yaml).unwrap();
            assert_eq!(imported.len(), 1);
            assert_eq!(imported[0].type_name, type_name);
            assert!(!imported[0].diagnostics.has_error());

            let round_tripped = imported[0].state.as_ref().unwrap();
            assert_eq!(round_tripped["spec"], plan["spec"], "{}", type_name);
            assert_eq!(round_tripped["metadata"], plan["metadata"], "{}", type_name);
            assert_eq!(round_tripped["yaml"], state["yaml"], "{}", type_name);
        }
    }

    #[test]
    fn test_all_resources_are_namespaced_ceph_kinds() {
        let provider = ProviderBuilder::new().with_rook_resources().build();
        assert_eq!(provider.resource_types().len(), 4);
        for type_name in provider.resource_types() {
            let schema = provider.resource_schema(&type_name).unwrap();
            assert!(schema.find("metadata.namespace").unwrap().required);
            assert!(type_name.starts_with("k8s_ceph_rook_io_"));
        }
    }
}
