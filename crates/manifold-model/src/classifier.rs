//! Ordered rule table mapping raw types to qualifiers.
//!
//! Rules are evaluated top to bottom and the first match wins. Several
//! rules overlap on purpose (`I64` satisfies both the INTEGER family rule
//! and the dedicated LONG rule; `F32`/`F64` satisfy both DOUBLE and the
//! numeric catch-all), so the order of this table is a contract, not an
//! implementation detail. Do not re-sort it.

use crate::datatype::RawType;
use crate::error::{ModelError, Result};
use crate::qualifier::DataQualifier;

/// A single classification rule: a predicate and the qualifier it yields.
pub struct QualifierRule {
    qualifier: DataQualifier,
    matches: fn(&RawType) -> bool,
}

impl QualifierRule {
    /// The qualifier this rule assigns.
    pub fn qualifier(&self) -> DataQualifier {
        self.qualifier
    }

    /// Whether this rule applies to `raw`.
    pub fn matches(&self, raw: &RawType) -> bool {
        (self.matches)(raw)
    }
}

fn is_void(raw: &RawType) -> bool {
    matches!(raw, RawType::Unit)
}

fn is_boolean(raw: &RawType) -> bool {
    matches!(raw, RawType::Bool)
}

// Single-character types classify as text.
fn is_string(raw: &RawType) -> bool {
    matches!(raw, RawType::String | RawType::Char)
}

fn is_integer(raw: &RawType) -> bool {
    matches!(raw, RawType::I16 | RawType::I32 | RawType::I64)
}

fn is_double(raw: &RawType) -> bool {
    matches!(raw, RawType::F32 | RawType::F64)
}

// Shadowed by the INTEGER rule above; kept to preserve the observed
// precedence table.
fn is_long(raw: &RawType) -> bool {
    matches!(raw, RawType::I64)
}

fn is_decimal(raw: &RawType) -> bool {
    matches!(raw, RawType::BigInt | RawType::BigDecimal)
}

fn is_number(raw: &RawType) -> bool {
    matches!(raw, RawType::Number)
}

fn is_byte(raw: &RawType) -> bool {
    matches!(raw, RawType::I8 | RawType::Bytes)
}

fn is_date(raw: &RawType) -> bool {
    matches!(raw, RawType::Date)
}

fn is_date_time(raw: &RawType) -> bool {
    matches!(raw, RawType::DateTime)
}

fn is_stream(raw: &RawType) -> bool {
    matches!(raw, RawType::Stream(_))
}

// Structural: the raw type itself declares its constants.
fn is_enum(raw: &RawType) -> bool {
    matches!(raw, RawType::Enum(_))
}

fn is_list(raw: &RawType) -> bool {
    matches!(raw, RawType::List | RawType::Set)
}

fn is_map(raw: &RawType) -> bool {
    matches!(raw, RawType::Map)
}

fn is_operation(raw: &RawType) -> bool {
    matches!(raw, RawType::Operation)
}

// Deliberate fallback for plain reference types, not an error-suppression
// path.
fn is_bean(raw: &RawType) -> bool {
    matches!(raw, RawType::Any | RawType::Bean(_))
}

static RULES: &[QualifierRule] = &[
    QualifierRule {
        qualifier: DataQualifier::Void,
        matches: is_void,
    },
    QualifierRule {
        qualifier: DataQualifier::Boolean,
        matches: is_boolean,
    },
    QualifierRule {
        qualifier: DataQualifier::String,
        matches: is_string,
    },
    QualifierRule {
        qualifier: DataQualifier::Integer,
        matches: is_integer,
    },
    QualifierRule {
        qualifier: DataQualifier::Double,
        matches: is_double,
    },
    QualifierRule {
        qualifier: DataQualifier::Long,
        matches: is_long,
    },
    QualifierRule {
        qualifier: DataQualifier::Decimal,
        matches: is_decimal,
    },
    QualifierRule {
        qualifier: DataQualifier::Number,
        matches: is_number,
    },
    QualifierRule {
        qualifier: DataQualifier::Byte,
        matches: is_byte,
    },
    QualifierRule {
        qualifier: DataQualifier::Date,
        matches: is_date,
    },
    QualifierRule {
        qualifier: DataQualifier::DateTime,
        matches: is_date_time,
    },
    QualifierRule {
        qualifier: DataQualifier::Stream,
        matches: is_stream,
    },
    QualifierRule {
        qualifier: DataQualifier::Enum,
        matches: is_enum,
    },
    QualifierRule {
        qualifier: DataQualifier::List,
        matches: is_list,
    },
    QualifierRule {
        qualifier: DataQualifier::Map,
        matches: is_map,
    },
    QualifierRule {
        qualifier: DataQualifier::Operation,
        matches: is_operation,
    },
    QualifierRule {
        qualifier: DataQualifier::Bean,
        matches: is_bean,
    },
];

/// The classification rules, in evaluation order.
pub fn rules() -> &'static [QualifierRule] {
    RULES
}

/// Classify a raw type into exactly one qualifier.
///
/// Total over every raw type the framework models; a type matching no rule
/// is a hard error, never a silently wrong qualifier.
pub fn classify(raw: &RawType) -> Result<DataQualifier> {
    RULES
        .iter()
        .find(|rule| rule.matches(raw))
        .map(|rule| rule.qualifier())
        .ok_or_else(|| ModelError::Unclassifiable {
            type_name: raw.name(),
        })
}
