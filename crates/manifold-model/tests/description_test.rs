//! End-to-end construction of a realistic extension description.

use manifold_model::{
    classify, DataQualifier, DataType, ExtensionBuilder, ExtensionConfigurationBuilder,
    ExtensionOperationBuilder, ExtensionParameterBuilder, RawType, Value,
};

#[test]
fn test_full_extension_graph() {
    let extension = ExtensionBuilder::new()
        .with_name("wsconsumer")
        .with_description("Consumes SOAP web services")
        .with_version("3.7.0")
        .with_min_runtime_version("1.0.0")
        .with_configuration(
            ExtensionConfigurationBuilder::new()
                .with_name("config")
                .with_description("Connection defaults")
                .with_parameter(
                    ExtensionParameterBuilder::new()
                        .with_name("wsdlLocation")
                        .with_data_type(DataType::string())
                        .with_required(true),
                )
                .with_parameter(
                    ExtensionParameterBuilder::new()
                        .with_name("port")
                        .with_data_type(DataType::i32())
                        .with_default_value(Value::Integer(8080)),
                )
                .with_parameter(
                    ExtensionParameterBuilder::new()
                        .with_name("soapHeaders")
                        .with_data_type(DataType::map_of(DataType::string(), DataType::string())),
                ),
        )
        .with_operation(
            ExtensionOperationBuilder::new()
                .with_name("consume")
                .with_input_type(DataType::string())
                .with_output_type(DataType::any())
                .with_parameter(
                    ExtensionParameterBuilder::new()
                        .with_name("operation")
                        .with_data_type(DataType::string())
                        .with_required(true),
                ),
        )
        .build()
        .unwrap();

    assert_eq!(extension.name(), "wsconsumer");
    assert_eq!(extension.configurations().len(), 1);
    assert_eq!(extension.operations().len(), 1);

    let config = extension.configuration("config").unwrap();
    assert_eq!(config.parameters().len(), 3);
    assert_eq!(
        config.parameter("soapHeaders").unwrap().data_type().qualifier(),
        DataQualifier::Map
    );

    let consume = extension.operation("consume").unwrap();
    assert_eq!(consume.input_types().len(), 1);
    assert_eq!(consume.output_type(), &DataType::any());
}

#[test]
fn test_list_of_string_classification_scenario() {
    let list = DataType::list_of(DataType::string());
    assert_eq!(list.qualifier(), DataQualifier::List);
    assert_eq!(list.generics().len(), 1);
    assert_eq!(list.generics()[0].raw(), &RawType::String);
    assert_eq!(list.generics()[0].qualifier(), DataQualifier::String);
    assert_eq!(classify(list.raw()).unwrap(), DataQualifier::List);
}
