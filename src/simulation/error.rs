//! Error types for configuration loading and world construction.
//!
//! Only inputs from outside the process are recoverable. Map and search
//! invariant violations panic at the point of detection instead.

use std::path::PathBuf;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Errors raised while building a world from a text layout.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    /// Row `row` has a different width from row 0.
    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("layout is {width}x{height}, minimum is {min}x{min}")]
    TooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    /// A border tile is not a wall.
    #[error("border tile ({x}, {y}) is not a wall")]
    OpenBorder { x: usize, y: usize },

    #[error("home tile (1, 1) is a wall")]
    HomeBlocked,
}
