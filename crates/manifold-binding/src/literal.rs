//! Qualifier-dispatched coercion of literal text.
//!
//! This is the simple half of value coercion: a single attribute string
//! against a target type. Structured input (lists, maps, beans) is handled
//! by the [`resolver`](crate::resolver); it funnels each leaf through
//! here.

use chrono::{DateTime, NaiveDateTime};

use manifold_model::{DataType, QualifierVisitor, RawType, Value};

use crate::error::{BindingError, Result};

/// Fixed pattern for DATE-qualified literals.
pub const DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";
/// Fixed pattern for DATE_TIME-qualified literals; the offset accepts
/// `Z` as well as numeric forms.
pub const DATE_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%#z";

/// Coerce a literal against the target type, dispatching on its qualifier.
///
/// Parse failures are explicit errors naming the offending literal and
/// the expected type or pattern; nothing falls back silently.
pub fn coerce_literal(text: &str, data_type: &DataType) -> Result<Value> {
    let mut coercion = LiteralCoercion { text, data_type };
    data_type.qualifier().accept(&mut coercion)
}

struct LiteralCoercion<'a> {
    text: &'a str,
    data_type: &'a DataType,
}

impl LiteralCoercion<'_> {
    fn unparseable(&self, expected: &str) -> BindingError {
        BindingError::UnparseableValue {
            value: self.text.to_string(),
            expected: expected.to_string(),
        }
    }
}

impl QualifierVisitor for LiteralCoercion<'_> {
    type Output = Result<Value>;

    fn on_void(&mut self) -> Self::Output {
        Ok(Value::Null)
    }

    fn on_boolean(&mut self) -> Self::Output {
        self.text
            .trim()
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|_| self.unparseable("boolean"))
    }

    fn on_integer(&mut self) -> Self::Output {
        self.text
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| self.unparseable("integer"))
    }

    fn on_long(&mut self) -> Self::Output {
        self.on_integer()
    }

    fn on_double(&mut self) -> Self::Output {
        self.text
            .trim()
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| self.unparseable("double"))
    }

    fn on_number(&mut self) -> Self::Output {
        let trimmed = self.text.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Ok(Value::Integer(i));
        }
        trimmed
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| self.unparseable("number"))
    }

    fn on_decimal(&mut self) -> Self::Output {
        let trimmed = self.text.trim();
        // Precision is preserved by keeping the literal text; the parse
        // only validates the shape.
        if trimmed.parse::<f64>().is_ok()
            && trimmed
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        {
            Ok(Value::Decimal(trimmed.to_string()))
        } else {
            Err(self.unparseable("decimal"))
        }
    }

    fn on_string(&mut self) -> Self::Output {
        Ok(Value::String(self.text.to_string()))
    }

    fn on_byte(&mut self) -> Self::Output {
        self.text
            .trim()
            .parse::<u8>()
            .map(Value::Byte)
            .map_err(|_| self.unparseable("byte"))
    }

    fn on_enum(&mut self) -> Self::Output {
        let trimmed = self.text.trim();
        match self.data_type.raw() {
            RawType::Enum(e) if e.has_variant(trimmed) => Ok(Value::Enum(trimmed.to_string())),
            RawType::Enum(e) => Err(BindingError::UnknownEnumVariant {
                value: trimmed.to_string(),
                expected: e.name.clone(),
            }),
            other => Err(BindingError::UnknownEnumVariant {
                value: trimmed.to_string(),
                expected: other.name(),
            }),
        }
    }

    fn on_date(&mut self) -> Self::Output {
        NaiveDateTime::parse_from_str(self.text.trim(), DATE_PATTERN)
            .map(Value::Date)
            .map_err(|_| BindingError::UnparseableDate {
                value: self.text.to_string(),
                pattern: DATE_PATTERN,
            })
    }

    fn on_date_time(&mut self) -> Self::Output {
        DateTime::parse_from_str(self.text.trim(), DATE_TIME_PATTERN)
            .map(Value::DateTime)
            .map_err(|_| BindingError::UnparseableDate {
                value: self.text.to_string(),
                pattern: DATE_TIME_PATTERN,
            })
    }

    // Structured qualifiers and anything a consumer does not recognize
    // degrade to the raw text.
    fn fallback(&mut self) -> Self::Output {
        Ok(Value::String(self.text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use manifold_model::EnumType;

    #[test]
    fn test_simple_scalars() {
        assert_eq!(
            coerce_literal("5", &DataType::i32()).unwrap(),
            Value::Integer(5)
        );
        assert_eq!(
            coerce_literal(" 2.5 ", &DataType::f64()).unwrap(),
            Value::Double(2.5)
        );
        assert_eq!(
            coerce_literal("true", &DataType::bool()).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            coerce_literal("hello", &DataType::string()).unwrap(),
            Value::String("hello".to_string())
        );
        assert_eq!(
            coerce_literal("200", &DataType::of(RawType::I8).unwrap()).unwrap(),
            Value::Byte(200)
        );
    }

    #[test]
    fn test_unparseable_scalar_is_explicit() {
        let err = coerce_literal("five", &DataType::i32()).unwrap_err();
        assert!(matches!(err, BindingError::UnparseableValue { .. }));
        assert!(err.to_string().contains("five"));
    }

    #[test]
    fn test_number_catch_all_prefers_integers() {
        let number = DataType::of(RawType::Number).unwrap();
        assert_eq!(coerce_literal("7", &number).unwrap(), Value::Integer(7));
        assert_eq!(coerce_literal("7.5", &number).unwrap(), Value::Double(7.5));
    }

    #[test]
    fn test_decimal_keeps_literal_text() {
        let decimal = DataType::of(RawType::BigDecimal).unwrap();
        assert_eq!(
            coerce_literal("123456789.000000001", &decimal).unwrap(),
            Value::Decimal("123456789.000000001".to_string())
        );
        assert!(coerce_literal("not-a-number", &decimal).is_err());
    }

    #[test]
    fn test_date_uses_fixed_pattern() {
        let date = DataType::of(RawType::Date).unwrap();
        let value = coerce_literal("2011-09-07T00:00:00", &date).unwrap();
        match value {
            Value::Date(d) => {
                assert_eq!((d.year(), d.month(), d.day()), (2011, 9, 7));
                assert_eq!(d.hour(), 0);
            }
            other => panic!("expected a date, got {:?}", other),
        }

        let err = coerce_literal("09/07/2011", &date).unwrap_err();
        match err {
            BindingError::UnparseableDate { pattern, value } => {
                assert_eq!(pattern, DATE_PATTERN);
                assert_eq!(value, "09/07/2011");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_date_time_accepts_zulu_and_numeric_offsets() {
        let date_time = DataType::of(RawType::DateTime).unwrap();
        let zulu = coerce_literal("2011-09-07T10:30:00Z", &date_time).unwrap();
        match zulu {
            Value::DateTime(dt) => assert_eq!(dt.offset().local_minus_utc(), 0),
            other => panic!("expected a date-time, got {:?}", other),
        }

        let offset = coerce_literal("2011-09-07T10:30:00+05:00", &date_time).unwrap();
        match offset {
            Value::DateTime(dt) => assert_eq!(dt.offset().local_minus_utc(), 5 * 3600),
            other => panic!("expected a date-time, got {:?}", other),
        }

        assert!(coerce_literal("2011-09-07T10:30:00", &date_time).is_err());
    }

    #[test]
    fn test_enum_membership() {
        let color = DataType::of(RawType::Enum(EnumType::new(
            "Color",
            vec!["RED".to_string(), "BLUE".to_string()],
        )))
        .unwrap();
        assert_eq!(
            coerce_literal("RED", &color).unwrap(),
            Value::Enum("RED".to_string())
        );
        let err = coerce_literal("GREEN", &color).unwrap_err();
        assert!(matches!(err, BindingError::UnknownEnumVariant { .. }));
    }

    #[test]
    fn test_structured_qualifiers_fall_back_to_text() {
        let any = DataType::any();
        assert_eq!(
            coerce_literal("opaque", &any).unwrap(),
            Value::String("opaque".to_string())
        );
    }
}
