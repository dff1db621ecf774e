//! # Seating Renderer
//!
//! Renders the seating chart and exports it as a document.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               seating-renderer                │
//! ├───────────────┬───────────────┬───────────────┤
//! │ Scene         │ Snapshot      │ Document      │
//! │ (SVG from the │ (resvg →      │ (printpdf:    │
//! │  shared       │  tiny-skia    │  scene page + │
//! │  layout)      │  pixmap)      │  roster pages)│
//! └───────────────┴───────────────┴───────────────┘
//! ```
//!
//! The scene stage is a pure function of chart state; the snapshot and
//! document stages fail independently so "not ready yet" and "ready but
//! capture failed" stay distinguishable.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod scene;
pub mod snapshot;

pub use error::{RenderError, RenderResult};
pub use export::{roster_lines, ChartExporter, ExportConfig, ExportFormat, RosterLine};
pub use scene::{SceneRenderer, Surface, Theme, GRID_SPACING};
pub use snapshot::Snapshot;
