//! Immutable description entities.
//!
//! These are the frozen outputs of the builder pipeline: once `build()`
//! returns, a description never changes and is safe to share across
//! threads. Producing a new version of an extension means building a new
//! graph, not mutating this one.

use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::capability::CapabilitySet;
use crate::datatype::DataType;
use crate::value::Value;

/// A single configurable parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionParameter {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) data_type: DataType,
    pub(crate) required: bool,
    pub(crate) dynamic: bool,
    pub(crate) default_value: Option<Value>,
}

impl ExtensionParameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Whether a value must be supplied by the configuration.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the value may be a runtime expression rather than a literal.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// The declared default, used when the configuration supplies nothing.
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }
}

/// A named group of parameters describing how an extension instance is set
/// up.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionConfiguration {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) parameters: Vec<ExtensionParameter>,
}

impl ExtensionConfiguration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[ExtensionParameter] {
        &self.parameters
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ExtensionParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A named, typed unit of invocable behavior.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionOperation {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) input_types: Vec<DataType>,
    pub(crate) output_type: DataType,
    pub(crate) parameters: Vec<ExtensionParameter>,
}

impl ExtensionOperation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Accepted input types; never empty.
    pub fn input_types(&self) -> &[DataType] {
        &self.input_types
    }

    pub fn output_type(&self) -> &DataType {
        &self.output_type
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[ExtensionParameter] {
        &self.parameters
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ExtensionParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// The top-level immutable description of a pluggable component.
///
/// Identity is (name, version): two extensions with the same name and
/// version are the same entity regardless of structural content.
#[derive(Debug, Clone, Serialize)]
pub struct Extension {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) version: String,
    pub(crate) min_runtime_version: String,
    pub(crate) configurations: Vec<ExtensionConfiguration>,
    pub(crate) operations: Vec<ExtensionOperation>,
    #[serde(skip)]
    pub(crate) capabilities: CapabilitySet,
}

impl Extension {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared semantic version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Minimum compatible runtime version.
    pub fn min_runtime_version(&self) -> &str {
        &self.min_runtime_version
    }

    /// Configurations in registration order.
    pub fn configurations(&self) -> &[ExtensionConfiguration] {
        &self.configurations
    }

    /// Look up a configuration by name.
    pub fn configuration(&self, name: &str) -> Option<&ExtensionConfiguration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Operations in registration order.
    pub fn operations(&self) -> &[ExtensionOperation] {
        &self.operations
    }

    /// Look up an operation by name.
    pub fn operation(&self, name: &str) -> Option<&ExtensionOperation> {
        self.operations.iter().find(|o| o.name == name)
    }

    /// All attached capabilities.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// The capability of type `T`, if attached.
    pub fn capability<T: std::any::Any + Send + Sync>(&self) -> Option<&T> {
        self.capabilities.get::<T>()
    }

    /// Whether a capability of type `T` is attached.
    pub fn is_capable_of<T: std::any::Any + Send + Sync>(&self) -> bool {
        self.capabilities.has::<T>()
    }
}

impl PartialEq for Extension {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl Eq for Extension {}

impl Hash for Extension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
    }
}
