//! Integration tests for chart export (seating-renderer).
//!
//! Tests export across formats, precondition refusal, roster pagination,
//! and edge cases.

use seating_core::{
    Guest, GuestId, Roster, RsvpStatus, SeatingChart, Table, TableId, TableShape,
};
use seating_renderer::{ChartExporter, ExportFormat, RenderError, SceneRenderer, Surface};

fn table(id: u32, number: u32, x: f32, y: f32) -> Table {
    Table {
        id: TableId::new(id),
        number,
        x,
        y,
        width: 100.0,
        height: 100.0,
        shape: if number % 2 == 0 {
            TableShape::Rectangular
        } else {
            TableShape::Round
        },
        capacity: 8,
    }
}

fn guest(id: u32, name: &str, table: Option<u32>, plus_one: bool) -> Guest {
    Guest {
        id: GuestId::new(id),
        name: name.to_string(),
        plus_one,
        rsvp_status: RsvpStatus::Confirmed,
        table_number: table,
    }
}

fn sample_chart() -> (SeatingChart, Roster) {
    let mut chart = SeatingChart::new();
    chart.tables.push(table(1, 1, 300.0, 150.0));
    chart.tables.push(table(2, 2, 550.0, 350.0));
    chart.unassigned_guests.push(guest(10, "Walk-in", None, false));
    let roster = Roster::new(vec![
        guest(1, "Ann", Some(1), false),
        guest(2, "Bo", Some(1), true),
        guest(3, "Cy", Some(2), false),
    ]);
    (chart, roster)
}

// ==========================================================================
// Format dispatch
// ==========================================================================

#[test]
fn test_all_formats_for_same_chart() {
    let (chart, roster) = sample_chart();
    let renderer = SceneRenderer::new(Surface::new(800, 600));
    let exporter = ChartExporter::with_defaults();

    let pdf = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Pdf)
        .expect("pdf");
    assert_eq!(&pdf[0..5], b"%PDF-");

    let png = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Png)
        .expect("png");
    assert_eq!(&png[0..4], &[137, 80, 78, 71]);

    let jpeg = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Jpeg)
        .expect("jpeg");
    assert_eq!(jpeg[0], 0xFF);
    assert_eq!(jpeg[1], 0xD8);

    let svg = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Svg)
        .expect("svg");
    let svg_str = String::from_utf8(svg).expect("utf8");
    assert!(svg_str.starts_with("<svg"));
    assert!(svg_str.contains("Table 1"));
}

// ==========================================================================
// Preconditions
// ==========================================================================

#[test]
fn test_missing_surface_refuses_export() {
    let (chart, roster) = sample_chart();
    let exporter = ChartExporter::with_defaults();

    let err = exporter
        .export(None, &chart, &roster, ExportFormat::Pdf)
        .expect_err("must refuse");
    assert!(matches!(err, RenderError::SurfaceMissing));
    assert!(err.is_precondition());
}

#[test]
fn test_zero_area_surface_refuses_export() {
    let (chart, roster) = sample_chart();
    let exporter = ChartExporter::with_defaults();

    for surface in [Surface::new(0, 600), Surface::new(800, 0), Surface::new(0, 0)] {
        let renderer = SceneRenderer::new(surface);
        let err = exporter
            .export(Some(&renderer), &chart, &roster, ExportFormat::Pdf)
            .expect_err("must refuse");
        assert!(matches!(err, RenderError::SurfaceEmpty(_, _)));
        assert!(err.is_precondition());
    }
}

#[test]
fn test_failed_export_writes_no_file() {
    let (chart, roster) = sample_chart();
    let exporter = ChartExporter::with_defaults();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.pdf");

    let renderer = SceneRenderer::new(Surface::new(0, 0));
    let result =
        exporter.export_to_file(&path, Some(&renderer), &chart, &roster, ExportFormat::Pdf);
    assert!(result.is_err());
    assert!(!path.exists(), "no partial document may be saved");
}

#[test]
fn test_export_to_file_writes_complete_document() {
    let (chart, roster) = sample_chart();
    let exporter = ChartExporter::with_defaults();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.pdf");

    let renderer = SceneRenderer::new(Surface::new(800, 600));
    exporter
        .export_to_file(&path, Some(&renderer), &chart, &roster, ExportFormat::Pdf)
        .expect("export");

    let bytes = std::fs::read(&path).expect("read back");
    assert_eq!(&bytes[0..5], b"%PDF-");
}

// ==========================================================================
// Roster pagination
// ==========================================================================

#[test]
fn test_long_roster_flows_onto_additional_pages() {
    let mut chart = SeatingChart::new();
    let mut guests = Vec::new();
    let mut id = 1;
    for number in 1..=12 {
        #[allow(clippy::cast_precision_loss)]
        chart
            .tables
            .push(table(number, number, 60.0 * number as f32, 300.0));
        for seat in 0..8 {
            guests.push(guest(id, &format!("Guest {number}-{seat}"), Some(number), seat % 3 == 0));
            id += 1;
        }
    }
    let roster = Roster::new(guests);

    let renderer = SceneRenderer::new(Surface::new(1200, 800));
    let exporter = ChartExporter::with_defaults();

    let short_pdf = {
        let (short_chart, short_roster) = sample_chart();
        exporter
            .export(Some(&renderer), &short_chart, &short_roster, ExportFormat::Pdf)
            .expect("short pdf")
    };
    let long_pdf = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Pdf)
        .expect("long pdf");

    assert_eq!(&long_pdf[0..5], b"%PDF-");
    // 96 roster lines cannot fit the single roster page the short chart
    // uses; the document must have grown by whole pages.
    assert!(
        long_pdf.len() > short_pdf.len(),
        "expected paginated roster ({} bytes) to exceed short roster ({} bytes)",
        long_pdf.len(),
        short_pdf.len()
    );
}

// ==========================================================================
// Edge cases
// ==========================================================================

#[test]
fn test_empty_chart_exports_cleanly() {
    let chart = SeatingChart::new();
    let roster = Roster::new(Vec::new());
    let renderer = SceneRenderer::new(Surface::new(400, 300));
    let exporter = ChartExporter::with_defaults();

    let pdf = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Pdf)
        .expect("pdf");
    assert_eq!(&pdf[0..5], b"%PDF-");

    let png = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Png)
        .expect("png");
    assert!(!png.is_empty());
}

#[test]
fn test_special_characters_in_guest_names() {
    let mut chart = SeatingChart::new();
    chart.tables.push(table(1, 1, 300.0, 150.0));
    chart
        .unassigned_guests
        .push(guest(1, "O'Brien <& family>", None, true));
    let roster = Roster::new(Vec::new());

    let renderer = SceneRenderer::new(Surface::new(800, 600));
    let exporter = ChartExporter::with_defaults();

    let svg = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Svg)
        .expect("svg");
    let svg_str = String::from_utf8(svg).expect("utf8");
    assert!(svg_str.contains("O&apos;Brien &lt;&amp; family&gt;"));

    // Rasterization still succeeds on the escaped scene.
    let png = exporter
        .export(Some(&renderer), &chart, &roster, ExportFormat::Png)
        .expect("png");
    assert_eq!(&png[0..4], &[137, 80, 78, 71]);
}
