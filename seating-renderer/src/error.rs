//! Renderer and export error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering or exporting a chart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The scene could not be expressed as SVG.
    #[error("SVG generation failed: {0}")]
    Svg(String),

    /// Export refused: no drawing surface is available yet.
    #[error("No drawing surface available")]
    SurfaceMissing,

    /// Export refused: the surface has zero width or height.
    #[error("Surface has zero area: {0}x{1}")]
    SurfaceEmpty(u32, u32),

    /// Export refused: a drawable context could not be obtained.
    #[error("Failed to obtain drawing context: {0}")]
    Context(String),

    /// The scene rasterized to an empty capture.
    #[error("Rasterization produced an empty capture")]
    BlankCapture,

    /// Image encoding failed.
    #[error("Image encoding failed: {0}")]
    Encode(String),

    /// Document assembly failed.
    #[error("Document generation failed: {0}")]
    Document(String),

    /// File output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Whether this is an export precondition failure ("not ready yet"),
    /// as opposed to a capture or encoding failure ("ready but failed").
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::SurfaceMissing | Self::SurfaceEmpty(_, _) | Self::Context(_)
        )
    }
}
