//! Error types for the fallible edges of the game (settings, rendering setup).
//!
//! The simulation itself never fails: invalid control actions are no-ops.

use thiserror::Error;

/// Errors that can occur outside the simulation core.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings JSON could not be parsed.
    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings file could not be read or written.
    #[error("Settings I/O failed for '{path}': {details}")]
    SettingsIo { path: String, details: String },

    /// No GPU adapter or device could be obtained for the canvas.
    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// A required page element is missing or has the wrong type.
    #[error("Page element '{0}' not found")]
    MissingElement(String),
}
