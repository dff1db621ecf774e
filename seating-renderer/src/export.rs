//! Document export - the chart scene plus a guest roster, paginated.
//!
//! Export is staged: preconditions, raster capture (see
//! [`Snapshot`]), then document assembly. Any failure aborts before a
//! single byte reaches disk; partial documents are never saved.

use std::path::Path;

use printpdf::{BuiltinFont, ImageTransform, Mm, PdfDocument};
use seating_core::{Roster, SeatingChart};

use crate::error::{RenderError, RenderResult};
use crate::scene::SceneRenderer;
use crate::snapshot::Snapshot;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Multi-page PDF: scene on page one, roster on the pages after.
    Pdf,
    /// PNG snapshot of the scene only.
    Png,
    /// JPEG snapshot of the scene only.
    Jpeg,
    /// SVG scene description.
    Svg,
}

/// Configuration for document export. Defaults produce the landscape A4
/// layout of the planning dashboard's "Export PDF" action.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Document title, drawn on page one.
    pub title: String,
    /// Heading of the roster section.
    pub roster_heading: String,
    /// Page width in millimetres.
    pub page_width_mm: f32,
    /// Page height in millimetres.
    pub page_height_mm: f32,
    /// Page margin in millimetres; roster lines break to a new page at the
    /// bottom margin.
    pub margin_mm: f32,
    /// Scene image placement from the top-left corner, in millimetres.
    pub scene_origin_mm: (f32, f32),
    /// Scene image size on the page, in millimetres.
    pub scene_size_mm: (f32, f32),
    /// JPEG quality (1-100) for [`ExportFormat::Jpeg`].
    pub jpeg_quality: u8,
    /// Background for JPEG flattening.
    pub background: [u8; 3],
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Wedding Seating Chart".to_string(),
            roster_heading: "Guest List by Table".to_string(),
            // Landscape A4.
            page_width_mm: 297.0,
            page_height_mm: 210.0,
            margin_mm: 20.0,
            scene_origin_mm: (20.0, 30.0),
            scene_size_mm: (250.0, 180.0),
            jpeg_quality: 85,
            background: [255, 255, 255],
        }
    }
}

/// One line of the roster section, ready for document layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterLine {
    /// "Table {n}:" group heading.
    TableHeading(String),
    /// One guest, with a " (+1)" marker when applicable.
    GuestEntry(String),
    /// Vertical gap after a table group.
    Gap,
}

/// Build the roster lines for a chart: tables in stored order (not sorted
/// numerically), tables with no seated guests skipped.
#[must_use]
pub fn roster_lines(chart: &SeatingChart, roster: &Roster) -> Vec<RosterLine> {
    let mut lines = Vec::new();
    for table in &chart.tables {
        let seated = roster.at_table(table.number);
        if seated.is_empty() {
            continue;
        }
        lines.push(RosterLine::TableHeading(format!("Table {}:", table.number)));
        for guest in seated {
            let marker = if guest.plus_one { " (+1)" } else { "" };
            lines.push(RosterLine::GuestEntry(format!("- {}{marker}", guest.name)));
        }
        lines.push(RosterLine::Gap);
    }
    lines
}

/// Exports the chart scene and roster as a downloadable document.
#[derive(Debug, Clone, Default)]
pub struct ChartExporter {
    config: ExportConfig,
}

impl ChartExporter {
    /// Create an exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with the default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The exporter configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export the chart in the requested format.
    ///
    /// Preconditions, checked in order before any capture: a renderer (the
    /// drawing surface) exists, and its surface has nonzero area. Each
    /// failure is a distinct [`RenderError`] variant.
    ///
    /// # Errors
    ///
    /// Precondition failures ([`RenderError::is_precondition`]),
    /// [`RenderError::BlankCapture`] when rasterization yields nothing, or
    /// encoding/document errors. No output is produced on any failure.
    pub fn export(
        &self,
        renderer: Option<&SceneRenderer>,
        chart: &SeatingChart,
        roster: &Roster,
        format: ExportFormat,
    ) -> RenderResult<Vec<u8>> {
        let renderer = renderer.ok_or(RenderError::SurfaceMissing)?;
        let surface = renderer.surface();
        if !surface.has_area() {
            return Err(RenderError::SurfaceEmpty(surface.width, surface.height));
        }

        match format {
            ExportFormat::Svg => Ok(renderer.render_svg(chart, roster, None).into_bytes()),
            ExportFormat::Png => Snapshot::capture(renderer, chart, roster)?.to_png(),
            ExportFormat::Jpeg => Snapshot::capture(renderer, chart, roster)?
                .to_jpeg(self.config.jpeg_quality, self.config.background),
            ExportFormat::Pdf => self.render_pdf(renderer, chart, roster),
        }
    }

    /// Export and write to `path`. The file is only created after the
    /// whole document has been assembled.
    ///
    /// # Errors
    ///
    /// Same failures as [`ChartExporter::export`], plus
    /// [`RenderError::Io`] for the final write.
    pub fn export_to_file(
        &self,
        path: impl AsRef<Path>,
        renderer: Option<&SceneRenderer>,
        chart: &SeatingChart,
        roster: &Roster,
        format: ExportFormat,
    ) -> RenderResult<()> {
        let bytes = self.export(renderer, chart, roster, format)?;
        std::fs::write(path.as_ref(), bytes)?;
        tracing::info!("Exported seating chart to {}", path.as_ref().display());
        Ok(())
    }

    /// Assemble the PDF: page one carries the title and the rasterized
    /// scene, the pages after carry the roster.
    #[allow(clippy::cast_precision_loss)]
    fn render_pdf(
        &self,
        renderer: &SceneRenderer,
        chart: &SeatingChart,
        roster: &Roster,
    ) -> RenderResult<Vec<u8>> {
        let snapshot = Snapshot::capture(renderer, chart, roster)?;
        let png = snapshot.to_png()?;

        let page_w = Mm(self.config.page_width_mm);
        let page_h = Mm(self.config.page_height_mm);
        let (doc, page1, layer1) =
            PdfDocument::new(self.config.title.as_str(), page_w, page_h, "Layer 1");

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Document(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Document(e.to_string()))?;

        let layer = doc.get_page(page1).get_layer(layer1);
        layer.use_text(
            &self.config.title,
            20.0,
            Mm(self.config.margin_mm),
            Mm(self.config.page_height_mm - 20.0),
            &font_bold,
        );

        // printpdf places images at their pixel size for a given DPI;
        // scale to the configured physical size.
        let dynamic_image = printpdf::image_crate::load_from_memory(&png)
            .map_err(|e| RenderError::Document(format!("Failed to decode capture: {e}")))?;
        let pdf_image = printpdf::Image::from_dynamic_image(&dynamic_image);

        let dpi = 300.0;
        let (scene_w_mm, scene_h_mm) = self.config.scene_size_mm;
        let scale_x = scene_w_mm / (snapshot.width() as f32 / dpi * 25.4);
        let scale_y = scene_h_mm / (snapshot.height() as f32 / dpi * 25.4);
        let translate_y = self.config.page_height_mm - self.config.scene_origin_mm.1 - scene_h_mm;

        pdf_image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(self.config.scene_origin_mm.0)),
                translate_y: Some(Mm(translate_y)),
                dpi: Some(dpi),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                ..Default::default()
            },
        );

        self.write_roster_pages(&doc, chart, roster, &font, &font_bold);

        doc.save_to_bytes()
            .map_err(|e| RenderError::Document(format!("PDF save failed: {e}")))
    }

    /// Write the roster onto fresh pages, breaking to a new page whenever
    /// a line would cross the bottom margin.
    fn write_roster_pages(
        &self,
        doc: &printpdf::PdfDocumentReference,
        chart: &SeatingChart,
        roster: &Roster,
        font: &printpdf::IndirectFontRef,
        font_bold: &printpdf::IndirectFontRef,
    ) {
        let page_w = Mm(self.config.page_width_mm);
        let page_h = self.config.page_height_mm;
        let bottom_limit = page_h - self.config.margin_mm;

        let (page, layer_index) = doc.add_page(page_w, Mm(page_h), "Layer 1");
        let mut layer = doc.get_page(page).get_layer(layer_index);
        layer.use_text(
            &self.config.roster_heading,
            16.0,
            Mm(self.config.margin_mm),
            Mm(page_h - 20.0),
            font_bold,
        );

        // Distances from the top of the page, converted at each use_text.
        let mut y = 40.0;
        for line in roster_lines(chart, roster) {
            match line {
                RosterLine::TableHeading(text) => {
                    if y > bottom_limit {
                        let (page, layer_index) = doc.add_page(page_w, Mm(page_h), "Layer 1");
                        layer = doc.get_page(page).get_layer(layer_index);
                        y = self.config.margin_mm;
                    }
                    layer.use_text(&text, 12.0, Mm(self.config.margin_mm), Mm(page_h - y), font);
                    y += 10.0;
                }
                RosterLine::GuestEntry(text) => {
                    if y > bottom_limit {
                        let (page, layer_index) = doc.add_page(page_w, Mm(page_h), "Layer 1");
                        layer = doc.get_page(page).get_layer(layer_index);
                        y = self.config.margin_mm;
                    }
                    layer.use_text(
                        &text,
                        12.0,
                        Mm(self.config.margin_mm + 5.0),
                        Mm(page_h - y),
                        font,
                    );
                    y += 8.0;
                }
                RosterLine::Gap => y += 5.0,
            }
        }
    }
}
