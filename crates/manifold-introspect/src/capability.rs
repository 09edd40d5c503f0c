//! Capability extraction.
//!
//! Extractors inspect a manifest and may contribute one opaque capability
//! value each. Every registered extractor runs against every manifest,
//! independently and in no guaranteed order; an extractor never observes
//! another's contribution. A manifest that no extractor recognizes simply
//! gains no capabilities.

use std::sync::Arc;

use once_cell::sync::Lazy;

use manifold_model::{Capability, ExtensionBuilder};

use crate::manifest::ExtensionManifest;

/// Inspects manifests for a marker it understands.
pub trait CapabilityExtractor: Send + Sync {
    /// The capability this manifest carries, if the extractor recognizes
    /// its marker.
    fn extract(&self, manifest: &ExtensionManifest) -> Option<Capability>;
}

/// XML namespace support, attached to extensions that declare an
/// [`XmlSupport`](crate::manifest::XmlSupport) marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlCapability {
    pub namespace: String,
    pub schema_location: String,
}

/// Built-in extractor for the XML-support marker.
pub struct XmlSupportExtractor;

impl CapabilityExtractor for XmlSupportExtractor {
    fn extract(&self, manifest: &ExtensionManifest) -> Option<Capability> {
        manifest.xml.as_ref().map(|xml| {
            Arc::new(XmlCapability {
                namespace: xml.namespace.clone(),
                schema_location: xml.schema_location.clone(),
            }) as Capability
        })
    }
}

/// A fixed set of extractors, run as a unit.
pub struct ExtractorSet {
    extractors: Vec<Box<dyn CapabilityExtractor>>,
}

impl ExtractorSet {
    /// A set with no extractors.
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// A set over the given extractors.
    pub fn with(extractors: Vec<Box<dyn CapabilityExtractor>>) -> Self {
        Self { extractors }
    }

    /// Number of extractors in the set.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Whether the set has no extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Run every extractor against `manifest`, attaching each contribution
    /// to the builder. No extractor short-circuits the others.
    pub fn extract_into(
        &self,
        manifest: &ExtensionManifest,
        mut builder: ExtensionBuilder,
    ) -> ExtensionBuilder {
        for extractor in &self.extractors {
            if let Some(capability) = extractor.extract(manifest) {
                builder = builder.with_opaque_capability(capability);
            }
        }
        builder
    }
}

// The default set is populated exactly once per process; there is no
// per-lookup locking and no re-scan.
static DEFAULT_EXTRACTORS: Lazy<ExtractorSet> =
    Lazy::new(|| ExtractorSet::with(vec![Box::new(XmlSupportExtractor)]));

/// The process-wide default extractor set.
pub fn default_extractors() -> &'static ExtractorSet {
    &DEFAULT_EXTRACTORS
}
