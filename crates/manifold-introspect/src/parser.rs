//! Manifest-to-description pipeline.
//!
//! Walks a manifest through the builder protocol and returns the built,
//! immutable extension. Every invariant check lives in the builders; this
//! module only translates: optional fields become non-required
//! parameters, verbatim default text is coerced against the declared type
//! before the builder sees it, operation aliases override declared
//! identifiers, and capability extractors run once the structure is
//! staged.

use tracing::debug;

use manifold_binding::coerce_literal;
use manifold_model::{
    Extension, ExtensionBuilder, ExtensionConfigurationBuilder, ExtensionOperationBuilder,
    ExtensionParameterBuilder,
};

use crate::capability::{default_extractors, ExtractorSet};
use crate::error::Result;
use crate::manifest::{ExtensionManifest, OperationManifest, ParameterManifest};

/// Build an extension from its manifest, using the default extractor set.
pub fn parse_manifest(manifest: &ExtensionManifest) -> Result<Extension> {
    parse_manifest_with(manifest, default_extractors())
}

/// Build an extension from its manifest with an explicit extractor set.
pub fn parse_manifest_with(
    manifest: &ExtensionManifest,
    extractors: &ExtractorSet,
) -> Result<Extension> {
    let mut builder = ExtensionBuilder::new()
        .with_name(&manifest.name)
        .with_description(&manifest.description)
        .with_version(&manifest.version)
        .with_min_runtime_version(&manifest.min_runtime_version);

    for configuration in &manifest.configurations {
        let mut staged = ExtensionConfigurationBuilder::new()
            .with_name(&configuration.name)
            .with_description(&configuration.description);
        for parameter in &configuration.parameters {
            staged = staged.with_parameter(stage_parameter(parameter)?);
        }
        builder = builder.with_configuration(staged);
    }

    for operation in &manifest.operations {
        builder = builder.with_operation(stage_operation(operation)?);
    }

    builder = extractors.extract_into(manifest, builder);
    let extension = builder.build()?;
    debug!(
        extension = extension.name(),
        version = extension.version(),
        configurations = extension.configurations().len(),
        operations = extension.operations().len(),
        "parsed extension manifest"
    );
    Ok(extension)
}

fn stage_parameter(manifest: &ParameterManifest) -> Result<ExtensionParameterBuilder> {
    let mut staged = ExtensionParameterBuilder::new()
        .with_name(&manifest.name)
        .with_description(&manifest.description)
        .with_data_type(manifest.data_type.clone())
        .with_required(!manifest.optional)
        .with_dynamic(manifest.dynamic);

    // The manifest carries defaults as verbatim literal text; coerce here
    // so the builder validates a typed value. A default on a required
    // parameter still reaches the builder and fails there.
    if let Some(text) = &manifest.default_value {
        let value = coerce_literal(text, &manifest.data_type)
            .map_err(|e| e.for_field(&manifest.name))?;
        staged = staged.with_default_value(value);
    }
    Ok(staged)
}

fn stage_operation(manifest: &OperationManifest) -> Result<ExtensionOperationBuilder> {
    // An explicit alias wins over the declared identifier.
    let name = manifest.alias.as_deref().unwrap_or(&manifest.name);
    let mut staged = ExtensionOperationBuilder::new()
        .with_name(name)
        .with_description(&manifest.description);
    for input in &manifest.inputs {
        staged = staged.with_input_type(input.clone());
    }
    if let Some(output) = &manifest.output {
        staged = staged.with_output_type(output.clone());
    }
    for parameter in &manifest.parameters {
        staged = staged.with_parameter(stage_parameter(parameter)?);
    }
    Ok(staged)
}
