//! Semantic qualifier set for classified types.
//!
//! A qualifier is the closed-set semantic kind of a type: every type the
//! framework touches classifies into exactly one of these. Components that
//! need qualifier-specific behavior dispatch through
//! [`QualifierVisitor`](crate::visitor::QualifierVisitor) instead of
//! matching on this enum directly.

use serde::{Deserialize, Serialize};

/// Semantic classification of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQualifier {
    /// No value at all
    Void,
    /// True/false values
    Boolean,
    /// Numeric values with no more specific family
    Number,
    /// Whole-number family (short, int, long)
    Integer,
    /// Floating-point family (float, double)
    Double,
    /// Dedicated long classification
    Long,
    /// Arbitrary-precision integers and decimals
    Decimal,
    /// Character and string data
    String,
    /// Single raw bytes
    Byte,
    /// Readable/writable byte or character stream handles
    Stream,
    /// Enumerated constant types
    Enum,
    /// Calendar dates with a time component
    Date,
    /// Zoned date-time values
    DateTime,
    /// Plain structured objects (the deliberate fallback)
    Bean,
    /// Ordered or unordered sequences
    List,
    /// Associative key/value types
    Map,
    /// Invocable nested operations
    Operation,
}

impl DataQualifier {
    /// Get the string representation of the qualifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataQualifier::Void => "void",
            DataQualifier::Boolean => "boolean",
            DataQualifier::Number => "number",
            DataQualifier::Integer => "integer",
            DataQualifier::Double => "double",
            DataQualifier::Long => "long",
            DataQualifier::Decimal => "decimal",
            DataQualifier::String => "string",
            DataQualifier::Byte => "byte",
            DataQualifier::Stream => "stream",
            DataQualifier::Enum => "enum",
            DataQualifier::Date => "date",
            DataQualifier::DateTime => "date_time",
            DataQualifier::Bean => "bean",
            DataQualifier::List => "list",
            DataQualifier::Map => "map",
            DataQualifier::Operation => "operation",
        }
    }

    /// Whether this qualifier describes a simple single-attribute value
    /// rather than a structured one.
    pub fn is_simple(&self) -> bool {
        !matches!(
            self,
            DataQualifier::List
                | DataQualifier::Map
                | DataQualifier::Bean
                | DataQualifier::Operation
        )
    }
}

impl std::fmt::Display for DataQualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_as_str() {
        assert_eq!(DataQualifier::Bean.as_str(), "bean");
        assert_eq!(DataQualifier::DateTime.as_str(), "date_time");
        assert_eq!(DataQualifier::Operation.to_string(), "operation");
    }

    #[test]
    fn test_simple_vs_structured() {
        assert!(DataQualifier::String.is_simple());
        assert!(DataQualifier::Date.is_simple());
        assert!(!DataQualifier::List.is_simple());
        assert!(!DataQualifier::Bean.is_simple());
        assert!(!DataQualifier::Map.is_simple());
    }
}
