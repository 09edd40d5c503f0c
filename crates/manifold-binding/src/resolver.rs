//! Qualifier-dispatched resolution of structured configuration input.
//!
//! The resolver walks a [`ConfigElement`] tree against the parameters of a
//! built description and produces [`BoundValue`]s: literals coerced to the
//! parameter's type, deferred references to other registered objects, or
//! inline runtime expressions. Dispatch runs through
//! [`QualifierVisitor`], so qualifier-specific behavior lives in one
//! visitor per concern rather than in conditional chains.

use manifold_model::{
    DataQualifier, DataType, ExtensionParameter, QualifierVisitor, RawType, Value,
};

use crate::element::{kebab_name, ConfigElement};
use crate::error::{BindingError, Result};
use crate::expression::ExpressionSyntax;
use crate::literal::coerce_literal;

/// A resolved configuration value, ready to bind.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// A literal coerced to the parameter's type
    Literal(Value),
    /// A deferred reference to another registered object, by name
    Reference(String),
    /// An inline runtime expression body
    Expression(String),
    /// Ordered sequence of resolved children
    List(Vec<BoundValue>),
    /// Unordered collection of resolved children
    Set(Vec<BoundValue>),
    /// Resolved key/value entries in document order
    Map(Vec<(BoundValue, BoundValue)>),
    /// A structured object with the fields that were actually present
    Bean {
        name: String,
        fields: Vec<(String, BoundValue)>,
    },
    /// Raw elements of a nested operation chain, deferred to the
    /// processor layer untouched
    ProcessorChain(Vec<ConfigElement>),
}

/// Resolves configuration elements against described parameters.
#[derive(Debug, Clone, Default)]
pub struct ValueResolver {
    syntax: ExpressionSyntax,
}

impl ValueResolver {
    /// Create a resolver with the default expression delimiters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with custom expression delimiters.
    pub fn with_syntax(syntax: ExpressionSyntax) -> Self {
        Self { syntax }
    }

    /// The expression delimiters in use.
    pub fn syntax(&self) -> &ExpressionSyntax {
        &self.syntax
    }

    /// Resolve one parameter against `element`.
    ///
    /// Returns `Ok(None)` when the parameter is optional, has no default
    /// and the input supplies nothing for it.
    pub fn resolve(
        &self,
        element: &ConfigElement,
        parameter: &ExtensionParameter,
    ) -> Result<Option<BoundValue>> {
        self.resolve_field(
            element,
            parameter.name(),
            parameter.data_type(),
            parameter.is_required(),
            parameter.default_value(),
        )
    }

    /// Resolve a full parameter set.
    ///
    /// Either every resolvable parameter binds or the first failure aborts
    /// the whole set; no partial binding is ever returned.
    pub fn resolve_parameters(
        &self,
        element: &ConfigElement,
        parameters: &[ExtensionParameter],
    ) -> Result<Vec<(String, BoundValue)>> {
        let mut bound = Vec::new();
        for parameter in parameters {
            if let Some(value) = self.resolve(element, parameter)? {
                bound.push((parameter.name().to_string(), value));
            }
        }
        Ok(bound)
    }

    fn resolve_field(
        &self,
        element: &ConfigElement,
        name: &str,
        data_type: &DataType,
        required: bool,
        default: Option<&Value>,
    ) -> Result<Option<BoundValue>> {
        let mut resolution = FieldResolution {
            resolver: self,
            element,
            name,
            data_type,
            required,
            default,
        };
        data_type.qualifier().accept(&mut resolution)
    }

    /// A `*-ref` attribute names another object unless it is
    /// delimiter-wrapped, in which case it is an inline expression.
    fn reference_or_expression(&self, text: &str) -> BoundValue {
        match self.syntax.unwrap_expression(text) {
            Some(body) => BoundValue::Expression(body.to_string()),
            None => BoundValue::Reference(text.trim().to_string()),
        }
    }

    fn literal_or_expression(
        &self,
        text: &str,
        name: &str,
        data_type: &DataType,
    ) -> Result<BoundValue> {
        if let Some(body) = self.syntax.unwrap_expression(text) {
            return Ok(BoundValue::Expression(body.to_string()));
        }
        coerce_literal(text, data_type)
            .map(BoundValue::Literal)
            .map_err(|e| e.for_field(name))
    }
}

/// Per-field visitor: simple qualifiers resolve from a single attribute,
/// structured ones walk child elements.
struct FieldResolution<'a> {
    resolver: &'a ValueResolver,
    element: &'a ConfigElement,
    name: &'a str,
    data_type: &'a DataType,
    required: bool,
    default: Option<&'a Value>,
}

impl FieldResolution<'_> {
    fn key(&self) -> String {
        kebab_name(self.name)
    }

    /// Nothing in the input supplies this field: fall back to the default,
    /// fail if it was required, stay silent otherwise.
    fn absent(&self) -> Result<Option<BoundValue>> {
        if let Some(default) = self.default {
            return Ok(Some(BoundValue::Literal(default.clone())));
        }
        if self.required {
            return Err(BindingError::MissingRequired {
                field: self.name.to_string(),
                expected: self.data_type.to_string(),
            });
        }
        Ok(None)
    }

    fn element_type(&self) -> DataType {
        self.data_type
            .generics()
            .first()
            .cloned()
            .unwrap_or_else(DataType::string)
    }

    fn key_type(&self) -> DataType {
        self.data_type
            .generics()
            .first()
            .cloned()
            .unwrap_or_else(DataType::string)
    }

    fn value_type(&self) -> DataType {
        self.data_type
            .generics()
            .get(1)
            .cloned()
            .unwrap_or_else(DataType::string)
    }

    fn resolve_list_child(&self, child: &ConfigElement, element_type: &DataType) -> Result<BoundValue> {
        if let Some(reference) = child.attribute("value-ref") {
            return Ok(self.resolver.reference_or_expression(reference));
        }
        match child.trimmed_text() {
            Some(text) => self
                .resolver
                .literal_or_expression(text, self.name, element_type),
            None => Err(BindingError::UnparseableValue {
                value: child.name.clone(),
                expected: element_type.to_string(),
            }
            .for_field(self.name)),
        }
    }

    fn resolve_map_entry(
        &self,
        child: &ConfigElement,
    ) -> Result<(BoundValue, BoundValue)> {
        let key = if let Some(key_text) = child.attribute("key") {
            self.resolver
                .literal_or_expression(key_text, self.name, &self.key_type())?
        } else if let Some(reference) = child.attribute("key-ref") {
            self.resolver.reference_or_expression(reference)
        } else {
            // The entry's own tag name doubles as its key.
            BoundValue::Literal(Value::String(child.name.clone()))
        };

        let value = if let Some(reference) = child.attribute("value-ref") {
            self.resolver.reference_or_expression(reference)
        } else if let Some(value_text) = child.attribute("value") {
            self.resolver
                .literal_or_expression(value_text, self.name, &self.value_type())?
        } else if let Some(text) = child.trimmed_text() {
            self.resolver
                .literal_or_expression(text, self.name, &self.value_type())?
        } else {
            return Err(BindingError::IncompleteMapEntry {
                entry: child.name.clone(),
            }
            .for_field(self.name));
        };

        Ok((key, value))
    }
}

impl QualifierVisitor for FieldResolution<'_> {
    type Output = Result<Option<BoundValue>>;

    fn on_list(&mut self) -> Self::Output {
        let element_type = self.element_type();
        // A sequence of operations is not resolved here; the raw elements
        // are handed to the processor layer as-is.
        if element_type.qualifier() == DataQualifier::Operation {
            return match self.element.child(&self.key()) {
                Some(chain) => Ok(Some(BoundValue::ProcessorChain(chain.children.clone()))),
                None => self.absent(),
            };
        }

        let Some(container) = self.element.child(&self.key()) else {
            return self.absent();
        };
        let mut items = Vec::with_capacity(container.children.len());
        for child in &container.children {
            items.push(self.resolve_list_child(child, &element_type)?);
        }
        Ok(Some(if matches!(self.data_type.raw(), RawType::Set) {
            BoundValue::Set(items)
        } else {
            BoundValue::List(items)
        }))
    }

    fn on_map(&mut self) -> Self::Output {
        let Some(container) = self.element.child(&self.key()) else {
            return self.absent();
        };
        let mut entries = Vec::with_capacity(container.children.len());
        for child in &container.children {
            entries.push(self.resolve_map_entry(child)?);
        }
        Ok(Some(BoundValue::Map(entries)))
    }

    fn on_bean(&mut self) -> Self::Output {
        let RawType::Bean(bean) = self.data_type.raw() else {
            // `Any` and other field-less object types have no structure to
            // walk; treat them like a simple attribute.
            return self.fallback();
        };

        let Some(scope) = self.element.child(&self.key()) else {
            return self.absent();
        };

        let mut fields = Vec::new();
        for field in &bean.fields {
            let resolved = self.resolver.resolve_field(
                scope,
                &field.name,
                &field.data_type,
                false,
                None,
            )?;
            if let Some(value) = resolved {
                fields.push((field.name.clone(), value));
            }
        }

        // A bean none of whose fields appeared contributes nothing, not an
        // empty object.
        if fields.is_empty() {
            return self.absent();
        }
        Ok(Some(BoundValue::Bean {
            name: bean.name.clone(),
            fields,
        }))
    }

    /// Simple qualifiers resolve from one attribute (or a text-only child
    /// element); this is also the open default for qualifiers a consumer
    /// does not treat specially.
    fn fallback(&mut self) -> Self::Output {
        let key = self.key();
        if let Some(reference) = self.element.attribute(&format!("{key}-ref")) {
            return Ok(Some(self.resolver.reference_or_expression(reference)));
        }
        if let Some(text) = self.element.attribute(&key) {
            return self
                .resolver
                .literal_or_expression(text, self.name, self.data_type)
                .map(Some);
        }
        if let Some(text) = self.element.child(&key).and_then(|c| c.trimmed_text()) {
            return self
                .resolver
                .literal_or_expression(text, self.name, self.data_type)
                .map(Some);
        }
        self.absent()
    }
}
