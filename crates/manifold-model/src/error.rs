//! Error types for classification and metamodel construction.

/// Errors raised by classification and by `build()` invariant checks.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// A raw type matched no classification rule
    #[error("type {type_name} matches no qualifier rule")]
    Unclassifiable { type_name: String },

    /// A required textual field was empty or whitespace
    #[error("{entity} has a blank {field}")]
    BlankField {
        entity: String,
        field: &'static str,
    },

    /// A mandatory builder field was never supplied
    #[error("{entity} is missing its {field}")]
    MissingField {
        entity: String,
        field: &'static str,
    },

    /// Two siblings in the same collection share a name
    #[error("duplicate {kind} name '{name}' in {owner}")]
    DuplicateName {
        owner: String,
        kind: &'static str,
        name: String,
    },

    /// An operation name collides with a configuration name
    #[error("extension {extension}: operation '{name}' collides with a configuration of the same name")]
    NameCollision { extension: String, name: String },

    /// A required parameter also declared a default value
    #[error("parameter '{parameter}' is required and must not declare a default value")]
    RequiredWithDefault { parameter: String },

    /// A declared default is not an instance of the parameter's type
    #[error("parameter '{parameter}': default value of type {actual} is not an instance of {expected}")]
    DefaultTypeMismatch {
        parameter: String,
        expected: String,
        actual: &'static str,
    },

    /// An operation was built without an output type
    #[error("operation '{operation}' declares no output type")]
    MissingOutputType { operation: String },

    /// A version string that must parse as semver did not
    #[error("{entity}: version '{version}' is not a valid semantic version")]
    InvalidVersion { entity: String, version: String },

    /// The declared minimum runtime version is below the supported floor
    #[error("minimum runtime version {version} is below the supported baseline {baseline}")]
    VersionBelowBaseline { version: String, baseline: String },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
