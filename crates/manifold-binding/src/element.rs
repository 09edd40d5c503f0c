//! Neutral structured-configuration tree.
//!
//! The framework never parses XML itself; the hosting config layer hands
//! it this tree. Attributes keep their document order, child elements keep
//! theirs. The tree is serde-deserializable so adapters (and tests) can
//! feed it from JSON documents.

use serde::{Deserialize, Serialize};

/// One element of a configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigElement {
    /// Element tag name
    pub name: String,
    /// Attributes in document order
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    #[serde(default)]
    pub children: Vec<ConfigElement>,
    /// Text content, if any
    #[serde(default)]
    pub text: Option<String>,
}

impl ConfigElement {
    /// Create an element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: ConfigElement) -> Self {
        self.children.push(child);
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&ConfigElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text content, if non-empty.
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Normalize a camelCase identifier to the delimiter form used for
/// attribute and element names: `maxRetries` becomes `max-retries`.
pub fn kebab_name(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
