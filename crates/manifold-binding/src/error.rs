//! Error types for value coercion and resolution.

/// Errors raised while coercing configuration input into typed values.
///
/// All of these are fatal and synchronous; no partial binding survives a
/// failure.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// A required parameter had neither a supplied value nor a default
    #[error("required field '{field}' of type {expected} has no value and no default")]
    MissingRequired { field: String, expected: String },

    /// A literal did not parse as the expected type
    #[error("value '{value}' is not a valid {expected}")]
    UnparseableValue { value: String, expected: String },

    /// A date/time literal did not match the fixed pattern
    #[error("value '{value}' does not match the date pattern {pattern}")]
    UnparseableDate {
        value: String,
        pattern: &'static str,
    },

    /// An enum literal named no declared constant
    #[error("'{value}' is not a constant of {expected}")]
    UnknownEnumVariant { value: String, expected: String },

    /// A map entry was structurally incomplete
    #[error("map entry '{entry}' supplies no value")]
    IncompleteMapEntry { entry: String },

    /// Field context wrapped around an inner coercion failure
    #[error("cannot bind field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<BindingError>,
    },
}

impl BindingError {
    /// Wrap this error with the name of the field being bound.
    pub fn for_field(self, field: impl Into<String>) -> Self {
        BindingError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for binding operations.
pub type Result<T> = std::result::Result<T, BindingError>;
