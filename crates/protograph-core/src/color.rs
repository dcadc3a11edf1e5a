//! Color handling for protograph diagrams
//!
//! This module provides the [`Color`] type which validates color strings with
//! the `DynamicColor` parser from the color crate while keeping the text as
//! written, since Graphviz expects the original notation (e.g. `#5D8AA8`)
//! rather than a normalized CSS form.
//!
//! Only the notations Graphviz reads are accepted: `#RRGGBB`, `#RRGGBBAA` and
//! color names. CSS functions such as `rgb()` or `oklch()` are rejected.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use serde::Deserialize;

/// A validated color, stored as the text it was written with.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    text: String,
}

impl Color {
    /// Create a new `Color` from a hex (`#ff0000`, `#ff000080`) or named
    /// (`red`) color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use protograph_core::color::Color;
    ///
    /// let steel = Color::new("#4682B4").unwrap();
    /// assert_eq!(steel.as_str(), "#4682B4");
    /// assert!(Color::new("not-a-color").is_err());
    /// assert!(Color::new("rgb(70, 130, 180)").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let text = color_str.trim();
        if let Err(err) = DynamicColor::from_str(text) {
            return Err(format!("invalid color `{color_str}`: {err}"));
        }
        if !is_graphviz_notation(text) {
            return Err(format!(
                "unsupported color `{color_str}`: use `#RRGGBB`, `#RRGGBBAA` or a color name"
            ));
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    /// The color as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

fn is_graphviz_notation(text: &str) -> bool {
    match text.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => text.bytes().all(|b| b.is_ascii_alphabetic()),
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
