//! Qualifier-driven double dispatch.
//!
//! Every component that behaves differently per qualifier implements
//! [`QualifierVisitor`] and lets [`DataQualifier::accept`] route to exactly
//! one method. The single exhaustive `match` over the qualifier set lives
//! in `accept`; callers never branch on the enum themselves. A visitor
//! overrides only the qualifiers it cares about — everything else lands in
//! [`QualifierVisitor::fallback`].

use crate::qualifier::DataQualifier;

/// One callback per qualifier, each defaulting to [`fallback`].
///
/// [`fallback`]: QualifierVisitor::fallback
pub trait QualifierVisitor {
    /// Result of a dispatch.
    type Output;

    fn on_void(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_boolean(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_number(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_integer(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_double(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_long(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_decimal(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_string(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_byte(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_stream(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_enum(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_date(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_date_time(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_bean(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_list(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_map(&mut self) -> Self::Output {
        self.fallback()
    }

    fn on_operation(&mut self) -> Self::Output {
        self.fallback()
    }

    /// Invoked by every callback the concrete visitor does not override.
    fn fallback(&mut self) -> Self::Output;
}

impl DataQualifier {
    /// Dispatch to exactly one visitor method for this qualifier.
    pub fn accept<V: QualifierVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            DataQualifier::Void => visitor.on_void(),
            DataQualifier::Boolean => visitor.on_boolean(),
            DataQualifier::Number => visitor.on_number(),
            DataQualifier::Integer => visitor.on_integer(),
            DataQualifier::Double => visitor.on_double(),
            DataQualifier::Long => visitor.on_long(),
            DataQualifier::Decimal => visitor.on_decimal(),
            DataQualifier::String => visitor.on_string(),
            DataQualifier::Byte => visitor.on_byte(),
            DataQualifier::Stream => visitor.on_stream(),
            DataQualifier::Enum => visitor.on_enum(),
            DataQualifier::Date => visitor.on_date(),
            DataQualifier::DateTime => visitor.on_date_time(),
            DataQualifier::Bean => visitor.on_bean(),
            DataQualifier::List => visitor.on_list(),
            DataQualifier::Map => visitor.on_map(),
            DataQualifier::Operation => visitor.on_operation(),
        }
    }
}
