//! CLI logic for the protograph diagram tool.
//!
//! Reads a Markdown state specification, writes its DOT description into the
//! output directory and asks Graphviz for an image.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io, path::Path};

use log::{LevelFilter, info};

use protograph::{DiagramBuilder, OutputReport, ProtographError};

/// Exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for a missing spec file, I/O or configuration failure.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for a malformed specification.
pub const EXIT_FORMAT_ERROR: i32 = 2;

/// Run the protograph CLI application
///
/// The returned report tells whether an image was rendered; the writer has
/// already logged a missing or failing renderer.
///
/// # Errors
///
/// Returns `ProtographError` for:
/// - A missing spec file or other I/O errors
/// - Configuration loading errors
/// - Parse and validation errors
/// - Graph file write errors
pub fn run(args: &Args) -> Result<OutputReport, ProtographError> {
    info!(
        spec_path = args.spec,
        out_dir = args.out,
        format = args.format;
        "Processing specification"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let spec_path = Path::new(&args.spec);
    if !spec_path.is_file() {
        return Err(ProtographError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Spec not found: {}", spec_path.display()),
        )));
    }
    let source = fs::read(spec_path)?;

    let builder = DiagramBuilder::new(app_config);
    let spec = builder.parse_bytes(&source)?;
    let graph = builder.render_dot(&spec)?;
    let report = builder.write(&spec, &graph, Path::new(&args.out), &args.format)?;

    Ok(report)
}

/// Returns `true` when a logger running at `max_level` would drop errors, so
/// they have to be written to stderr directly.
pub fn report_to_stderr(max_level: LevelFilter) -> bool {
    max_level < LevelFilter::Error
}

/// Maps an error to the process exit status.
pub fn exit_code(err: &ProtographError) -> i32 {
    if err.is_format_error() {
        EXIT_FORMAT_ERROR
    } else {
        EXIT_FAILURE
    }
}
