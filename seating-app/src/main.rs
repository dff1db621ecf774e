//! # Seating Chart CLI
//!
//! Command-line composition root: owns the chart store and guest
//! directory, loads the seating view, and exports the arrangement as a
//! document.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seating_core::{ChartStore, Guest, GuestDirectory, SeatingChart, SeatingView};
use seating_renderer::{ChartExporter, ExportFormat, SceneRenderer, Surface};

/// Sample chart bundled with the binary.
const SAMPLE_CHART: &str = include_str!("../data/seating_chart.json");

/// Sample guest list bundled with the binary.
const SAMPLE_GUESTS: &str = include_str!("../data/guests.json");

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(author, version, about = "Arrange wedding seating and export it as a document")]
struct Args {
    /// Seating chart JSON file (bundled sample when omitted)
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Guest list JSON file (bundled sample when omitted)
    #[arg(long)]
    guests: Option<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = "wedding-seating-chart.pdf")]
    output: PathBuf,

    /// Export format
    #[arg(long, value_enum, default_value_t = FormatArg::Pdf)]
    format: FormatArg,

    /// Surface width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Add this many new tables before exporting
    #[arg(long, default_value_t = 0)]
    add_tables: u32,

    /// Directory where the chart store mirrors its state between runs
    #[arg(long, env = "SEATING_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

/// Export format CLI choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum FormatArg {
    /// Multi-page PDF with the roster.
    Pdf,
    /// PNG snapshot of the scene.
    Png,
    /// JPEG snapshot of the scene.
    Jpeg,
    /// SVG scene description.
    Svg,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Pdf => Self::Pdf,
            FormatArg::Png => Self::Png,
            FormatArg::Jpeg => Self::Jpeg,
            FormatArg::Svg => Self::Svg,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "seating_app=info,seating_core=info,seating_renderer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let chart = load_chart(args.chart.as_ref())?;
    let guests = load_guests(args.guests.as_ref())?;

    // The composition root owns both stores; the view only borrows them.
    let chart_store = match args.data_dir {
        Some(ref dir) => ChartStore::with_data_dir(chart, dir)
            .with_context(|| format!("failed to open chart store in {}", dir.display()))?,
        None => ChartStore::init(chart).context("invalid seating chart")?,
    };
    let directory = GuestDirectory::init(guests);

    let mut view = SeatingView::new(chart_store, directory);
    view.load().context("failed to load seating view")?;

    for _ in 0..args.add_tables {
        let id = view.add_table().context("failed to add table")?;
        tracing::info!("Added table {id}");
    }

    let chart = view.chart().context("no chart loaded")?;
    tracing::info!(
        "Loaded chart: {} tables, {} seated guests, {} unassigned",
        chart.table_count(),
        view.roster().seated_count(),
        chart.unassigned_guests.len(),
    );

    let renderer = SceneRenderer::new(Surface::new(args.width, args.height));
    let exporter = ChartExporter::with_defaults();
    exporter
        .export_to_file(
            &args.output,
            Some(&renderer),
            chart,
            view.roster(),
            args.format.into(),
        )
        .with_context(|| format!("failed to export {}", args.output.display()))?;

    println!("Exported seating chart to {}", args.output.display());
    Ok(())
}

/// Load the seating chart from a file, or the bundled sample.
fn load_chart(path: Option<&PathBuf>) -> anyhow::Result<SeatingChart> {
    let json = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read chart file {}", p.display()))?,
        None => SAMPLE_CHART.to_string(),
    };
    SeatingChart::from_json(&json).context("invalid chart JSON")
}

/// Load the guest list from a file, or the bundled sample.
fn load_guests(path: Option<&PathBuf>) -> anyhow::Result<Vec<Guest>> {
    let json = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read guest file {}", p.display()))?,
        None => SAMPLE_GUESTS.to_string(),
    };
    serde_json::from_str(&json).context("invalid guest JSON")
}
