//! Structural type descriptions and the `DataType` value object.
//!
//! `RawType` is the framework's view of a host type: a structural
//! description rather than a reflective handle. `DataType` pairs a raw type
//! with its generic arguments and the qualifier resolved at construction
//! time; it is the unit every parameter and operation signature is
//! expressed in.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::classifier;
use crate::error::{ModelError, Result};
use crate::qualifier::DataQualifier;
use crate::value::Value;

/// Direction-agnostic stream payload kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Raw byte streams
    Byte,
    /// Character streams
    Char,
}

/// Structural description of an enumerated constant type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumType {
    /// Type name
    pub name: String,
    /// Declared constants, in declaration order
    pub variants: Vec<String>,
}

impl EnumType {
    /// Create an enum type description.
    pub fn new(name: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    /// Whether `variant` is one of the declared constants.
    pub fn has_variant(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }
}

/// A declared field of a bean type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeanField {
    /// Field name as declared on the host type
    pub name: String,
    /// Field type
    pub data_type: DataType,
}

impl BeanField {
    /// Create a bean field description.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Structural description of a plain object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeanType {
    /// Type name
    pub name: String,
    /// Declared fields, in declaration order
    #[serde(default)]
    pub fields: Vec<BeanField>,
}

impl BeanType {
    /// Create a bean type description.
    pub fn new(name: impl Into<String>, fields: Vec<BeanField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Structural description of a raw host type.
///
/// Container element/key/value types are not part of the raw type; they are
/// carried as generic arguments on the owning [`DataType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawType {
    /// The absence of a value
    Unit,
    Bool,
    /// A single character
    Char,
    String,
    /// Signed 8-bit scalar
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// Arbitrary-precision integer
    BigInt,
    /// Arbitrary-precision decimal
    BigDecimal,
    /// A numeric value with no more specific family
    Number,
    /// A binary blob
    Bytes,
    Date,
    DateTime,
    Stream(StreamKind),
    Enum(EnumType),
    /// Ordered sequence
    List,
    /// Unordered collection
    Set,
    Map,
    /// An invocable nested operation
    Operation,
    /// The unconstrained top type
    Any,
    Bean(BeanType),
}

impl RawType {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> String {
        match self {
            RawType::Unit => "unit".to_string(),
            RawType::Bool => "bool".to_string(),
            RawType::Char => "char".to_string(),
            RawType::String => "string".to_string(),
            RawType::I8 => "i8".to_string(),
            RawType::I16 => "i16".to_string(),
            RawType::I32 => "i32".to_string(),
            RawType::I64 => "i64".to_string(),
            RawType::F32 => "f32".to_string(),
            RawType::F64 => "f64".to_string(),
            RawType::BigInt => "bigint".to_string(),
            RawType::BigDecimal => "bigdecimal".to_string(),
            RawType::Number => "number".to_string(),
            RawType::Bytes => "bytes".to_string(),
            RawType::Date => "date".to_string(),
            RawType::DateTime => "date_time".to_string(),
            RawType::Stream(StreamKind::Byte) => "byte_stream".to_string(),
            RawType::Stream(StreamKind::Char) => "char_stream".to_string(),
            RawType::Enum(e) => format!("enum<{}>", e.name),
            RawType::List => "list".to_string(),
            RawType::Set => "set".to_string(),
            RawType::Map => "map".to_string(),
            RawType::Operation => "operation".to_string(),
            RawType::Any => "any".to_string(),
            RawType::Bean(b) => format!("bean<{}>", b.name),
        }
    }

    /// Whether this raw type belongs to the numeric families.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            RawType::I8
                | RawType::I16
                | RawType::I32
                | RawType::I64
                | RawType::F32
                | RawType::F64
                | RawType::BigInt
                | RawType::BigDecimal
                | RawType::Number
        )
    }
}

impl std::fmt::Display for RawType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The type of a value in the metamodel: a raw type, its generic arguments
/// and the qualifier resolved from the raw type.
///
/// Constructed once through [`DataType::of`] or
/// [`DataType::of_parameterized`]; immutable thereafter. Equality is
/// structural over raw type, qualifier and generics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DataType {
    raw: RawType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    generics: Vec<DataType>,
    qualifier: DataQualifier,
}

impl DataType {
    /// Describe a non-parameterized type. Classification runs once here;
    /// an unclassifiable raw type is a hard error, never a default.
    pub fn of(raw: RawType) -> Result<Self> {
        Self::of_parameterized(raw, Vec::new())
    }

    /// Describe a parameterized type such as a list with its element type
    /// or a map with its key and value types.
    pub fn of_parameterized(raw: RawType, generics: Vec<DataType>) -> Result<Self> {
        let qualifier = classifier::classify(&raw)?;
        Ok(Self {
            raw,
            generics,
            qualifier,
        })
    }

    // Internal constructor for raw types whose classification is fixed by
    // the rule table. Paired with a test that checks each shortcut against
    // the classifier.
    fn known(raw: RawType, qualifier: DataQualifier) -> Self {
        Self {
            raw,
            generics: Vec::new(),
            qualifier,
        }
    }

    /// The string type.
    pub fn string() -> Self {
        Self::known(RawType::String, DataQualifier::String)
    }

    /// The bool type.
    pub fn bool() -> Self {
        Self::known(RawType::Bool, DataQualifier::Boolean)
    }

    /// The 32-bit integer type.
    pub fn i32() -> Self {
        Self::known(RawType::I32, DataQualifier::Integer)
    }

    /// The 64-bit integer type.
    pub fn i64() -> Self {
        Self::known(RawType::I64, DataQualifier::Integer)
    }

    /// The double-precision float type.
    pub fn f64() -> Self {
        Self::known(RawType::F64, DataQualifier::Double)
    }

    /// The unconstrained top type.
    pub fn any() -> Self {
        Self::known(RawType::Any, DataQualifier::Bean)
    }

    /// A list with the given element type.
    pub fn list_of(element: DataType) -> Self {
        Self {
            raw: RawType::List,
            generics: vec![element],
            qualifier: DataQualifier::List,
        }
    }

    /// A map with the given key and value types.
    pub fn map_of(key: DataType, value: DataType) -> Self {
        Self {
            raw: RawType::Map,
            generics: vec![key, value],
            qualifier: DataQualifier::Map,
        }
    }

    /// The underlying raw type.
    pub fn raw(&self) -> &RawType {
        &self.raw
    }

    /// Generic type arguments, in declaration order.
    pub fn generics(&self) -> &[DataType] {
        &self.generics
    }

    /// The qualifier resolved at construction.
    pub fn qualifier(&self) -> DataQualifier {
        self.qualifier
    }

    /// Whether a value of `other` fits where this type is expected.
    ///
    /// Mirrors nominal assignability: identical raw shapes are assignable,
    /// `Any` accepts everything, and the abstract `Number` accepts the
    /// whole numeric family. An unparameterized container accepts any
    /// parameterization of the same container.
    pub fn is_assignable_from(&self, other: &DataType) -> bool {
        if matches!(self.raw, RawType::Any) {
            return true;
        }
        if matches!(self.raw, RawType::Number) && other.raw.is_numeric() {
            return true;
        }
        if self.raw != other.raw {
            return false;
        }
        if self.generics.is_empty() {
            return true;
        }
        self.generics.len() == other.generics.len()
            && self
                .generics
                .iter()
                .zip(other.generics.iter())
                .all(|(a, b)| a.is_assignable_from(b))
    }

    /// Whether `value` is an instance of this type.
    pub fn is_instance(&self, value: &Value) -> bool {
        match self.qualifier {
            DataQualifier::Void => matches!(value, Value::Null),
            DataQualifier::Boolean => matches!(value, Value::Bool(_)),
            DataQualifier::Integer | DataQualifier::Long => matches!(value, Value::Integer(_)),
            DataQualifier::Double => matches!(value, Value::Double(_)),
            DataQualifier::Decimal => matches!(value, Value::Decimal(_)),
            DataQualifier::Number => matches!(
                value,
                Value::Integer(_) | Value::Double(_) | Value::Decimal(_) | Value::Byte(_)
            ),
            DataQualifier::String => matches!(value, Value::String(_)),
            DataQualifier::Byte => matches!(value, Value::Byte(_) | Value::Bytes(_)),
            DataQualifier::Stream => matches!(value, Value::Bytes(_)),
            DataQualifier::Enum => match (&self.raw, value) {
                (RawType::Enum(e), Value::Enum(variant)) => e.has_variant(variant),
                _ => false,
            },
            DataQualifier::Date => matches!(value, Value::Date(_)),
            DataQualifier::DateTime => matches!(value, Value::DateTime(_)),
            DataQualifier::List => match value {
                Value::List(items) => match self.generics.first() {
                    Some(element) => items.iter().all(|i| element.is_instance(i)),
                    None => true,
                },
                _ => false,
            },
            DataQualifier::Map => matches!(value, Value::Map(_)),
            DataQualifier::Bean => match (&self.raw, value) {
                (RawType::Any, _) => true,
                (RawType::Bean(b), Value::Bean { name, .. }) => &b.name == name,
                _ => false,
            },
            DataQualifier::Operation => false,
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            raw: RawType,
            #[serde(default)]
            generics: Vec<DataType>,
        }

        let repr = Repr::deserialize(deserializer)?;
        DataType::of_parameterized(repr.raw, repr.generics).map_err(|e: ModelError| {
            D::Error::custom(format!("invalid data type: {}", e))
        })
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.generics.is_empty() {
            write!(f, "{}", self.raw)
        } else {
            let args: Vec<String> = self.generics.iter().map(|g| g.to_string()).collect();
            write!(f, "{}<{}>", self.raw, args.join(", "))
        }
    }
}
