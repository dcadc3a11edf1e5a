//! Configuration types for protograph diagram generation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and output settings.
//! - [`RenderConfig`] - Colors and graph attributes used by the DOT renderer.
//! - [`OutputConfig`] - File naming and the external renderer executable.
//!
//! # Example
//!
//! ```
//! # use protograph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().palette().unwrap().len(), 7);
//! assert_eq!(config.output().graph_extension(), "dot");
//! ```

use std::fmt;

use serde::Deserialize;

use protograph_core::color::Color;

/// Colors assigned to entities in first-seen order.
const DEFAULT_PALETTE: [&str; 7] = [
    "#5D8AA8", "#F28C28", "#4682B4", "#8F9779", "#B565A7", "#CD5C5C", "#729FCF",
];
const DEFAULT_ARM_COLOR: &str = "#F4C95D";
const DEFAULT_FALLBACK_COLOR: &str = "#dddddd";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, output: OutputConfig) -> Self {
        Self { render, output }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Graph layout direction passed to Graphviz as `rankdir`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum RankDir {
    #[serde(rename = "TB")]
    TopToBottom,
    #[default]
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RankDir::TopToBottom => "TB",
            RankDir::LeftToRight => "LR",
            RankDir::BottomToTop => "BT",
            RankDir::RightToLeft => "RL",
        })
    }
}

/// Settings for the DOT renderer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Entity colors, cycled in first-seen order.
    palette: Vec<Color>,

    /// Color of states owned by the `ARM` sentinel.
    arm_color: Color,

    /// Color of states whose owner is unknown or empty.
    fallback_color: Color,

    rankdir: RankDir,

    /// Font used for the graph and its nodes.
    font: String,

    /// Graphviz node shape.
    node_shape: String,
}

impl RenderConfig {
    /// Returns the entity palette.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured palette is empty.
    pub fn palette(&self) -> Result<&[Color], String> {
        if self.palette.is_empty() {
            return Err("Invalid palette in config: at least one color is required".to_string());
        }
        Ok(&self.palette)
    }

    pub fn arm_color(&self) -> &Color {
        &self.arm_color
    }

    pub fn fallback_color(&self) -> &Color {
        &self.fallback_color
    }

    pub fn rankdir(&self) -> RankDir {
        self.rankdir
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn node_shape(&self) -> &str {
        &self.node_shape
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let color = |text: &str| Color::new(text).expect("built-in colors are valid");
        Self {
            palette: DEFAULT_PALETTE.into_iter().map(color).collect(),
            arm_color: color(DEFAULT_ARM_COLOR),
            fallback_color: color(DEFAULT_FALLBACK_COLOR),
            rankdir: RankDir::default(),
            font: "Helvetica".to_string(),
            node_shape: "rectangle".to_string(),
        }
    }
}

/// Settings for the output writer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Extension of the graph description file.
    graph_extension: String,

    /// Renderer executable: a name searched on `PATH`, or a path.
    renderer: String,
}

impl OutputConfig {
    pub fn new(graph_extension: impl Into<String>, renderer: impl Into<String>) -> Self {
        Self {
            graph_extension: graph_extension.into(),
            renderer: renderer.into(),
        }
    }

    pub fn graph_extension(&self) -> &str {
        &self.graph_extension
    }

    pub fn renderer(&self) -> &str {
        &self.renderer
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new("dot", "dot")
    }
}
