//! Builders for the description entities.
//!
//! Construction is staged: fluent setters accumulate state, child builders
//! nest into their parents, and a terminal `build()` runs every invariant
//! check before the immutable entity exists. `build()` fails fast with the
//! offending entity and field; it never returns a partially valid
//! description. Builders are single-use, single-threaded staging objects.

use semver::Version;

use crate::capability::CapabilitySet;
use crate::datatype::DataType;
use crate::description::{
    Extension, ExtensionConfiguration, ExtensionOperation, ExtensionParameter,
};
use crate::error::{ModelError, Result};
use crate::value::Value;

/// Oldest runtime an extension may declare compatibility with.
pub const RUNTIME_BASELINE: &str = "1.0.0";

fn baseline() -> Version {
    Version::new(1, 0, 0)
}

fn check_not_blank(value: &str, entity: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModelError::BlankField {
            entity: entity.to_string(),
            field,
        });
    }
    Ok(())
}

fn check_unique_parameter_names(owner: &str, parameters: &[ExtensionParameter]) -> Result<()> {
    for (i, parameter) in parameters.iter().enumerate() {
        if parameters[..i].iter().any(|p| p.name() == parameter.name()) {
            return Err(ModelError::DuplicateName {
                owner: owner.to_string(),
                kind: "parameter",
                name: parameter.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Builder for [`ExtensionParameter`].
#[derive(Debug, Clone, Default)]
pub struct ExtensionParameterBuilder {
    name: String,
    description: String,
    data_type: Option<DataType>,
    required: bool,
    dynamic: bool,
    default_value: Option<Value>,
}

impl ExtensionParameterBuilder {
    /// Create an empty parameter builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameter name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the parameter description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the parameter type.
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Mark whether a value must be supplied by the configuration.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark whether the value may be a runtime expression.
    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Set the default value used when the configuration supplies nothing.
    pub fn with_default_value(mut self, default_value: Value) -> Self {
        self.default_value = Some(default_value);
        self
    }

    /// Validate and freeze the parameter.
    pub fn build(&self) -> Result<ExtensionParameter> {
        let entity = format!("parameter '{}'", self.name);
        check_not_blank(&self.name, "parameter", "name")?;
        let data_type = self.data_type.clone().ok_or(ModelError::MissingField {
            entity: entity.clone(),
            field: "data type",
        })?;

        if self.required && self.default_value.is_some() {
            return Err(ModelError::RequiredWithDefault {
                parameter: self.name.clone(),
            });
        }
        if let Some(default) = &self.default_value {
            // An explicit null default is allowed for any type.
            if !matches!(default, Value::Null) && !data_type.is_instance(default) {
                return Err(ModelError::DefaultTypeMismatch {
                    parameter: self.name.clone(),
                    expected: data_type.to_string(),
                    actual: default.type_name(),
                });
            }
        }

        Ok(ExtensionParameter {
            name: self.name.clone(),
            description: self.description.clone(),
            data_type,
            required: self.required,
            dynamic: self.dynamic,
            default_value: self.default_value.clone(),
        })
    }
}

/// Builder for [`ExtensionConfiguration`].
#[derive(Debug, Clone, Default)]
pub struct ExtensionConfigurationBuilder {
    name: String,
    description: String,
    parameters: Vec<ExtensionParameterBuilder>,
}

impl ExtensionConfigurationBuilder {
    /// Create an empty configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the configuration description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: ExtensionParameterBuilder) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(&self) -> Result<ExtensionConfiguration> {
        check_not_blank(&self.name, "configuration", "name")?;
        let parameters: Vec<ExtensionParameter> = self
            .parameters
            .iter()
            .map(|p| p.build())
            .collect::<Result<_>>()?;
        check_unique_parameter_names(&format!("configuration '{}'", self.name), &parameters)?;

        Ok(ExtensionConfiguration {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters,
        })
    }
}

/// Builder for [`ExtensionOperation`].
#[derive(Debug, Clone, Default)]
pub struct ExtensionOperationBuilder {
    name: String,
    description: String,
    input_types: Vec<DataType>,
    output_type: Option<DataType>,
    parameters: Vec<ExtensionParameterBuilder>,
}

impl ExtensionOperationBuilder {
    /// Create an empty operation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operation name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the operation description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare an accepted input type.
    pub fn with_input_type(mut self, input_type: DataType) -> Self {
        self.input_types.push(input_type);
        self
    }

    /// Declare the output type. Mandatory.
    pub fn with_output_type(mut self, output_type: DataType) -> Self {
        self.output_type = Some(output_type);
        self
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: ExtensionParameterBuilder) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Validate and freeze the operation.
    pub fn build(&self) -> Result<ExtensionOperation> {
        check_not_blank(&self.name, "operation", "name")?;
        let output_type = self.output_type.clone().ok_or(ModelError::MissingOutputType {
            operation: self.name.clone(),
        })?;

        // Undeclared inputs mean the operation accepts anything.
        let input_types = if self.input_types.is_empty() {
            vec![DataType::any()]
        } else {
            self.input_types.clone()
        };

        let parameters: Vec<ExtensionParameter> = self
            .parameters
            .iter()
            .map(|p| p.build())
            .collect::<Result<_>>()?;
        check_unique_parameter_names(&format!("operation '{}'", self.name), &parameters)?;

        Ok(ExtensionOperation {
            name: self.name.clone(),
            description: self.description.clone(),
            input_types,
            output_type,
            parameters,
        })
    }
}

/// Builder for [`Extension`].
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    name: String,
    description: String,
    version: String,
    min_runtime_version: String,
    configurations: Vec<ExtensionConfigurationBuilder>,
    operations: Vec<ExtensionOperationBuilder>,
    capabilities: CapabilitySet,
}

impl ExtensionBuilder {
    /// Create an empty extension builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extension name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the extension description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the declared semantic version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the minimum compatible runtime version.
    pub fn with_min_runtime_version(mut self, version: impl Into<String>) -> Self {
        self.min_runtime_version = version.into();
        self
    }

    /// Append a configuration.
    pub fn with_configuration(mut self, configuration: ExtensionConfigurationBuilder) -> Self {
        self.configurations.push(configuration);
        self
    }

    /// Append an operation.
    pub fn with_operation(mut self, operation: ExtensionOperationBuilder) -> Self {
        self.operations.push(operation);
        self
    }

    /// Attach a capability instance.
    pub fn with_capability<T: std::any::Any + Send + Sync>(mut self, capability: T) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Attach an already-boxed capability.
    pub fn with_opaque_capability(mut self, capability: crate::capability::Capability) -> Self {
        self.capabilities.insert_opaque(capability);
        self
    }

    /// Validate and freeze the full extension graph.
    pub fn build(&self) -> Result<Extension> {
        check_not_blank(&self.name, "extension", "name")?;
        let entity = format!("extension '{}'", self.name);
        check_not_blank(&self.version, &entity, "version")?;
        check_not_blank(&self.min_runtime_version, &entity, "minimum runtime version")?;

        let min_runtime =
            Version::parse(&self.min_runtime_version).map_err(|_| ModelError::InvalidVersion {
                entity: entity.clone(),
                version: self.min_runtime_version.clone(),
            })?;
        if min_runtime < baseline() {
            return Err(ModelError::VersionBelowBaseline {
                version: self.min_runtime_version.clone(),
                baseline: RUNTIME_BASELINE.to_string(),
            });
        }

        let configurations: Vec<ExtensionConfiguration> = self
            .configurations
            .iter()
            .map(|c| c.build())
            .collect::<Result<_>>()?;
        for (i, configuration) in configurations.iter().enumerate() {
            if configurations[..i]
                .iter()
                .any(|c| c.name() == configuration.name())
            {
                return Err(ModelError::DuplicateName {
                    owner: entity.clone(),
                    kind: "configuration",
                    name: configuration.name().to_string(),
                });
            }
        }

        let operations: Vec<ExtensionOperation> = self
            .operations
            .iter()
            .map(|o| o.build())
            .collect::<Result<_>>()?;
        for (i, operation) in operations.iter().enumerate() {
            if operations[..i].iter().any(|o| o.name() == operation.name()) {
                return Err(ModelError::DuplicateName {
                    owner: entity.clone(),
                    kind: "operation",
                    name: operation.name().to_string(),
                });
            }
            // Operation and configuration names share one namespace.
            if configurations.iter().any(|c| c.name() == operation.name()) {
                return Err(ModelError::NameCollision {
                    extension: self.name.clone(),
                    name: operation.name().to_string(),
                });
            }
        }

        Ok(Extension {
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            min_runtime_version: self.min_runtime_version.clone(),
            configurations,
            operations,
            capabilities: self.capabilities.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualifier::DataQualifier;

    fn parameter(name: &str) -> ExtensionParameterBuilder {
        ExtensionParameterBuilder::new()
            .with_name(name)
            .with_data_type(DataType::string())
    }

    fn extension() -> ExtensionBuilder {
        ExtensionBuilder::new()
            .with_name("wsconsumer")
            .with_description("Consumes web services")
            .with_version("3.7.0")
            .with_min_runtime_version("1.0.0")
    }

    #[test]
    fn test_required_and_default_are_mutually_exclusive() {
        let err = parameter("address")
            .with_required(true)
            .with_default_value(Value::from("http://localhost"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::RequiredWithDefault { .. }));

        assert!(parameter("address").with_required(true).build().is_ok());
        assert!(parameter("address")
            .with_required(false)
            .with_default_value(Value::from("http://localhost"))
            .build()
            .is_ok());
    }

    #[test]
    fn test_default_must_be_instance_of_type() {
        let err = ExtensionParameterBuilder::new()
            .with_name("port")
            .with_data_type(DataType::i32())
            .with_default_value(Value::from("8080"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::DefaultTypeMismatch { .. }));

        assert!(ExtensionParameterBuilder::new()
            .with_name("port")
            .with_data_type(DataType::i32())
            .with_default_value(Value::from(8080))
            .build()
            .is_ok());
    }

    #[test]
    fn test_null_default_fits_any_type() {
        assert!(ExtensionParameterBuilder::new()
            .with_name("port")
            .with_data_type(DataType::i32())
            .with_default_value(Value::Null)
            .build()
            .is_ok());
    }

    #[test]
    fn test_parameter_requires_name_and_type() {
        let err = ExtensionParameterBuilder::new()
            .with_data_type(DataType::string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::BlankField { .. }));

        let err = ExtensionParameterBuilder::new()
            .with_name("x")
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingField { .. }));
    }

    #[test]
    fn test_duplicate_parameter_names_rejected() {
        let err = ExtensionConfigurationBuilder::new()
            .with_name("config")
            .with_parameter(parameter("address"))
            .with_parameter(parameter("address"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::DuplicateName {
                kind: "parameter",
                ..
            }
        ));
    }

    #[test]
    fn test_parameter_order_round_trips() {
        let names = ["alpha", "bravo", "charlie", "delta"];
        let mut builder = ExtensionConfigurationBuilder::new().with_name("config");
        for name in names {
            builder = builder.with_parameter(parameter(name));
        }
        let configuration = builder.build().unwrap();
        let read_back: Vec<&str> = configuration
            .parameters()
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(read_back, names);
    }

    #[test]
    fn test_operation_without_output_fails() {
        let err = ExtensionOperationBuilder::new()
            .with_name("consume")
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingOutputType { .. }));
    }

    #[test]
    fn test_operation_defaults_to_any_input() {
        let operation = ExtensionOperationBuilder::new()
            .with_name("consume")
            .with_output_type(DataType::string())
            .build()
            .unwrap();
        assert_eq!(operation.input_types().len(), 1);
        assert_eq!(operation.input_types()[0].qualifier(), DataQualifier::Bean);
        assert_eq!(operation.input_types()[0], DataType::any());
    }

    #[test]
    fn test_duplicate_configuration_names_rejected() {
        let err = extension()
            .with_configuration(ExtensionConfigurationBuilder::new().with_name("config"))
            .with_configuration(ExtensionConfigurationBuilder::new().with_name("config"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::DuplicateName {
                kind: "configuration",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_operation_names_rejected() {
        let operation = || {
            ExtensionOperationBuilder::new()
                .with_name("consume")
                .with_output_type(DataType::string())
        };
        let err = extension()
            .with_operation(operation())
            .with_operation(operation())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::DuplicateName {
                kind: "operation",
                ..
            }
        ));
    }

    #[test]
    fn test_operation_name_must_not_collide_with_configuration() {
        let err = extension()
            .with_configuration(ExtensionConfigurationBuilder::new().with_name("consume"))
            .with_operation(
                ExtensionOperationBuilder::new()
                    .with_name("consume")
                    .with_output_type(DataType::string()),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::NameCollision { .. }));
    }

    #[test]
    fn test_version_checks() {
        let err = extension().with_version("  ").build().unwrap_err();
        assert!(matches!(err, ModelError::BlankField { .. }));

        let err = extension()
            .with_min_runtime_version("not-a-version")
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidVersion { .. }));

        let err = extension()
            .with_min_runtime_version("0.9.0")
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::VersionBelowBaseline { .. }));

        // The extension's own version is only checked for presence here;
        // parseability is the registry's concern.
        assert!(extension().with_version("not.semver").build().is_ok());
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = extension().with_configuration(
            ExtensionConfigurationBuilder::new()
                .with_name("config")
                .with_parameter(parameter("address")),
        );
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.configurations().len(), second.configurations().len());
        assert_eq!(
            first.configurations()[0].parameters()[0].name(),
            second.configurations()[0].parameters()[0].name()
        );
    }

    #[test]
    fn test_capability_attachment() {
        #[derive(Debug, PartialEq)]
        struct Marker(u8);

        let ext = extension().with_capability(Marker(7)).build().unwrap();
        assert!(ext.is_capable_of::<Marker>());
        assert_eq!(ext.capability::<Marker>(), Some(&Marker(7)));
        assert!(!ext.is_capable_of::<String>());
    }
}
