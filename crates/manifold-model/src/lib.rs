//! Core metamodel for extension descriptions.
//!
//! This crate defines the closed qualifier set, the structural type model,
//! the qualifier visitor dispatch, and the immutable description entities
//! (`Extension` / `ExtensionConfiguration` / `ExtensionOperation` /
//! `ExtensionParameter`) together with their validating builders.
//!
//! Classification, type construction and building are pure synchronous
//! computations; everything this crate produces is immutable and safe to
//! share across threads.

pub mod builder;
pub mod capability;
pub mod classifier;
pub mod datatype;
pub mod description;
pub mod error;
pub mod qualifier;
pub mod value;
pub mod visitor;

pub use builder::{
    ExtensionBuilder, ExtensionConfigurationBuilder, ExtensionOperationBuilder,
    ExtensionParameterBuilder, RUNTIME_BASELINE,
};
pub use capability::{Capability, CapabilitySet};
pub use classifier::{classify, rules, QualifierRule};
pub use datatype::{BeanField, BeanType, DataType, EnumType, RawType, StreamKind};
pub use description::{Extension, ExtensionConfiguration, ExtensionOperation, ExtensionParameter};
pub use error::{ModelError, Result};
pub use qualifier::DataQualifier;
pub use value::Value;
pub use visitor::QualifierVisitor;

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::builder::{
        ExtensionBuilder, ExtensionConfigurationBuilder, ExtensionOperationBuilder,
        ExtensionParameterBuilder,
    };
    pub use crate::datatype::{DataType, RawType};
    pub use crate::description::{
        Extension, ExtensionConfiguration, ExtensionOperation, ExtensionParameter,
    };
    pub use crate::error::{ModelError, Result};
    pub use crate::qualifier::DataQualifier;
    pub use crate::value::Value;
    pub use crate::visitor::QualifierVisitor;
}
