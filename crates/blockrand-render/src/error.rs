//! Error types for heatmap rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while drawing or saving a heatmap.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The grid has no rows or no columns to draw.
    #[error("allocation grid is empty")]
    EmptyGrid,

    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raster image could not be encoded.
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The drawing backend rejected an element.
    #[error("failed to draw heatmap: {0}")]
    Draw(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
