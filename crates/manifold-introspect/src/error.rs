//! Error types for the introspection pipeline.

use manifold_binding::BindingError;
use manifold_model::ModelError;

/// Errors raised while turning a manifest into a built extension.
#[derive(Debug, thiserror::Error)]
pub enum IntrospectError {
    /// A build-time invariant failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A declared default value did not coerce to its field's type
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Result type alias for introspection operations.
pub type Result<T> = std::result::Result<T, IntrospectError>;
