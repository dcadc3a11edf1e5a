//! Command-line argument definitions for the protograph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the specification path, the output
//! directory and image format, configuration file selection, and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the protograph diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the Markdown state specification
    #[arg(long, default_value = "states_diagram/teensy_esp_router_states.md")]
    pub spec: String,

    /// Directory that receives the graph description and the rendered image
    #[arg(long, default_value = "states_diagram/output")]
    pub out: String,

    /// Image format passed to the renderer (svg, png, pdf, ...)
    #[arg(long, default_value = "svg")]
    pub format: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["protograph"]);

        assert_eq!(args.spec, "states_diagram/teensy_esp_router_states.md");
        assert_eq!(args.out, "states_diagram/output");
        assert_eq!(args.format, "svg");
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "protograph",
            "--spec",
            "router.md",
            "--out",
            "build",
            "--format",
            "png",
            "-c",
            "custom.toml",
        ]);

        assert_eq!(args.spec, "router.md");
        assert_eq!(args.out, "build");
        assert_eq!(args.format, "png");
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
    }
}
