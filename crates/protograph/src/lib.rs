//! Protograph - compile Markdown protocol state specifications into Graphviz diagrams.
//!
//! A specification is a Markdown document with YAML-like front matter and
//! pipe tables for entities, states, transitions and commands. This crate
//! ties the parser to the DOT exporter and the output writer.

pub mod config;
pub mod palette;

mod error;
mod export;

pub use protograph_core::{color, owner, record, semantic};

pub use error::ProtographError;
pub use export::{
    Error as ExportError, Exporter,
    dot::DotExporter,
    writer::{OutputReport, OutputWriter, RenderOutcome},
};

use std::path::Path;

use log::{debug, info, trace, warn};

use config::AppConfig;

/// Builder for parsing and rendering protocol state diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use protograph::{DiagramBuilder, config::AppConfig};
///
/// let source = "---\ndiagram: demo\n---\n";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let spec = builder.parse(source).expect("Failed to parse");
/// let dot = builder.render_dot(&spec).expect("Failed to render");
///
/// builder
///     .write(&spec, &dot, "out".as_ref(), "svg")
///     .expect("Failed to write");
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and validate a specification document.
    ///
    /// Validation warnings are logged; any error aborts with every
    /// diagnostic collected.
    ///
    /// # Errors
    ///
    /// Returns [`ProtographError::Format`] for malformed documents.
    pub fn parse(&self, source: &str) -> Result<semantic::DiagramSpec, ProtographError> {
        info!("Parsing specification");

        let spec = protograph_parser::parse(source)
            .map_err(|err| ProtographError::new_format_error(err, source))?;

        debug!(diagram = spec.diagram_id(); "Specification parsed successfully");
        trace!(spec:?; "Parsed specification");

        Ok(spec)
    }

    /// Parse and validate a specification read as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtographError::Format`] if the bytes are not UTF-8 or the
    /// document is malformed.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<semantic::DiagramSpec, ProtographError> {
        let source = protograph_parser::decode_source(bytes).map_err(|err| {
            ProtographError::new_format_error(err, String::from_utf8_lossy(bytes))
        })?;
        self.parse(source)
    }

    /// Validate a specification that was assembled in code.
    ///
    /// # Errors
    ///
    /// Returns [`ProtographError::Format`] if the specification has any
    /// error-level finding. The error carries no source text.
    pub fn validate(&self, spec: &semantic::DiagramSpec) -> Result<(), ProtographError> {
        let warnings = protograph_parser::validate(spec)
            .map_err(|err| ProtographError::new_format_error(err, ""))?;
        for warning in &warnings {
            warn!(diagnostic = warning.to_string(); "Specification warning");
        }
        Ok(())
    }

    /// Render a validated specification as a DOT graph description.
    ///
    /// # Errors
    ///
    /// Returns [`ProtographError::Export`] if rendering fails.
    pub fn render_dot(&self, spec: &semantic::DiagramSpec) -> Result<String, ProtographError> {
        info!(diagram = spec.diagram_id(); "Rendering graph description");
        let graph = DotExporter::new(self.config.render()).export(spec)?;
        Ok(graph)
    }

    /// Write a rendered graph under `out_dir` and ask the renderer for an image.
    ///
    /// # Errors
    ///
    /// Returns [`ProtographError::Export`] if the graph file cannot be written.
    /// A missing or failing renderer is reported in the [`OutputReport`].
    pub fn write(
        &self,
        spec: &semantic::DiagramSpec,
        graph: &str,
        out_dir: &Path,
        format: &str,
    ) -> Result<OutputReport, ProtographError> {
        let report = OutputWriter::new(self.config.output()).write(
            graph,
            out_dir,
            spec.diagram_id(),
            format,
        )?;
        Ok(report)
    }
}
