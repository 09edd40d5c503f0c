//! Declarative extension manifests.
//!
//! A manifest is the descriptive self-knowledge of a host component: its
//! metadata, configurable fields and operations, expressed as data. It is
//! the only representation the framework ever sees of a host type — the
//! pipeline reads manifests, never the component's behavior.

use serde::{Deserialize, Serialize};

use manifold_model::DataType;

fn default_min_runtime() -> String {
    manifold_model::RUNTIME_BASELINE.to_string()
}

/// XML-support marker recognized by the built-in capability extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlSupport {
    /// Namespace URI the extension's schema lives under
    pub namespace: String,
    /// Location of the generated schema
    pub schema_location: String,
}

/// A configurable field of an extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterManifest {
    /// Field identifier as declared on the host type
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Declared field type
    pub data_type: DataType,
    /// Marked optional; unmarked fields are required
    #[serde(default)]
    pub optional: bool,
    /// Declared default, carried verbatim as literal text
    #[serde(default)]
    pub default_value: Option<String>,
    /// Whether the value may be a runtime expression
    #[serde(default)]
    pub dynamic: bool,
}

impl ParameterManifest {
    /// Describe a required field of the given type.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            data_type,
            optional: false,
            default_value: None,
            dynamic: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the field optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Declare a default value as literal text, used verbatim.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Allow runtime expressions for this field.
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }
}

/// A named group of configurable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterManifest>,
}

impl ConfigurationManifest {
    /// Describe a configuration with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a configurable field.
    pub fn with_parameter(mut self, parameter: ParameterManifest) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// An invocable operation of an extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationManifest {
    /// Declared identifier of the operation
    pub name: String,
    /// Explicit public name overriding the identifier
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Accepted input types; empty means "accepts anything"
    #[serde(default)]
    pub inputs: Vec<DataType>,
    /// Output type; an operation without one cannot be built
    #[serde(default)]
    pub output: Option<DataType>,
    #[serde(default)]
    pub parameters: Vec<ParameterManifest>,
}

impl OperationManifest {
    /// Describe an operation by its declared identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            description: String::new(),
            inputs: Vec::new(),
            output: None,
            parameters: Vec::new(),
        }
    }

    /// Override the public name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare an accepted input type.
    pub fn with_input(mut self, input: DataType) -> Self {
        self.inputs.push(input);
        self
    }

    /// Declare the output type.
    pub fn with_output(mut self, output: DataType) -> Self {
        self.output = Some(output);
        self
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: ParameterManifest) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// The full self-description of an extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Declared semantic version
    pub version: String,
    /// Minimum compatible runtime version; defaults to the baseline
    #[serde(default = "default_min_runtime")]
    pub min_runtime_version: String,
    #[serde(default)]
    pub configurations: Vec<ConfigurationManifest>,
    #[serde(default)]
    pub operations: Vec<OperationManifest>,
    /// XML-support marker, if the extension declares one
    #[serde(default)]
    pub xml: Option<XmlSupport>,
}

impl ExtensionManifest {
    /// Describe an extension with the given name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: version.into(),
            min_runtime_version: default_min_runtime(),
            configurations: Vec::new(),
            operations: Vec::new(),
            xml: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the minimum compatible runtime version.
    pub fn with_min_runtime_version(mut self, version: impl Into<String>) -> Self {
        self.min_runtime_version = version.into();
        self
    }

    /// Append a configuration.
    pub fn with_configuration(mut self, configuration: ConfigurationManifest) -> Self {
        self.configurations.push(configuration);
        self
    }

    /// Append an operation.
    pub fn with_operation(mut self, operation: OperationManifest) -> Self {
        self.operations.push(operation);
        self
    }

    /// Declare XML support.
    pub fn with_xml(mut self, xml: XmlSupport) -> Self {
        self.xml = Some(xml);
        self
    }
}
