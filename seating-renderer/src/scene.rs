//! Scene rendering - chart state to an SVG scene description.
//!
//! The renderer is a pure function of (chart, roster, drag state): repeated
//! calls with identical inputs produce identical output, and every card
//! position comes from the shared [`ChartLayout`] the hit-tester also
//! reads, so what is drawn is exactly what is clickable.

use std::fmt::Write;

use seating_core::{
    CardPlacement, ChartLayout, DragState, EntityRef, Guest, Roster, SeatingChart, Table,
    TableShape,
};

/// Spacing of the cosmetic background grid, in surface units.
pub const GRID_SPACING: f32 = 50.0;

/// The drawing surface the scene targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Surface {
    /// Create a surface descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the surface has drawable area.
    #[must_use]
    pub const fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Scene colors. Defaults match the venue-floor palette of the planning
/// dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Surface background.
    pub background: &'static str,
    /// Reference grid lines.
    pub grid_line: &'static str,
    /// Table fill.
    pub table_fill: &'static str,
    /// Fill of the table currently being dragged.
    pub table_drag_fill: &'static str,
    /// Table outline.
    pub table_stroke: &'static str,
    /// Table number label.
    pub label: &'static str,
    /// Seated guest card fill.
    pub assigned_fill: &'static str,
    /// Seated guest card outline.
    pub assigned_stroke: &'static str,
    /// Seated guest card text.
    pub assigned_text: &'static str,
    /// Unassigned guest card fill.
    pub unassigned_fill: &'static str,
    /// Unassigned guest card outline.
    pub unassigned_stroke: &'static str,
    /// Fill of the guest card currently being dragged.
    pub card_drag_fill: &'static str,
    /// Secondary text (plus-one marker on unassigned cards).
    pub muted: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#FAF9F7",
            grid_line: "#E5E7EB",
            table_fill: "#FFFFFF",
            table_drag_fill: "#E8B4B8",
            table_stroke: "#D4A574",
            label: "#374151",
            assigned_fill: "#7FB069",
            assigned_stroke: "#6ba05a",
            assigned_text: "#FFFFFF",
            unassigned_fill: "#F8E5D6",
            unassigned_stroke: "#D4A574",
            card_drag_fill: "#D4A574",
            muted: "#6B7280",
        }
    }
}

/// Renders the seating chart onto a surface as an SVG scene description.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    surface: Surface,
    theme: Theme,
}

impl SceneRenderer {
    /// Create a renderer for the given surface with the default theme.
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            theme: Theme::default(),
        }
    }

    /// Create a renderer with a custom theme.
    #[must_use]
    pub fn with_theme(surface: Surface, theme: Theme) -> Self {
        Self { surface, theme }
    }

    /// The target surface.
    #[must_use]
    pub const fn surface(&self) -> Surface {
        self.surface
    }

    /// Resize the target surface. The next render reflects the new size.
    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Render the chart to an SVG scene description.
    ///
    /// Paint order: background, reference grid, tables, guest cards. The
    /// drag target (table or card) is drawn with its highlight fill. An
    /// empty chart yields just background and grid.
    #[must_use]
    pub fn render_svg(
        &self,
        chart: &SeatingChart,
        roster: &Roster,
        drag: Option<&DragState>,
    ) -> String {
        let (width, height) = (self.surface.width, self.surface.height);
        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        );

        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            self.theme.background,
        );
        self.render_grid(&mut svg);

        let layout = ChartLayout::compute(chart, roster);
        for table in &chart.tables {
            self.render_table(&mut svg, table, drag);
        }
        for card in layout.cards() {
            if let Some(guest) = resolve_guest(card, chart, roster) {
                self.render_card(&mut svg, card, guest, drag);
            }
        }

        svg.push_str("</svg>");
        svg
    }

    /// Paint the fixed-spacing reference grid. Cosmetic only; the grid is
    /// never hit-testable.
    #[allow(clippy::cast_precision_loss)]
    fn render_grid(&self, svg: &mut String) {
        let (width, height) = (self.surface.width as f32, self.surface.height as f32);
        let mut x = 0.0;
        while x <= width {
            let _ = write!(
                svg,
                "<line x1=\"{x}\" y1=\"0\" x2=\"{x}\" y2=\"{height}\" stroke=\"{}\" stroke-width=\"1\"/>",
                self.theme.grid_line,
            );
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y <= height {
            let _ = write!(
                svg,
                "<line x1=\"0\" y1=\"{y}\" x2=\"{width}\" y2=\"{y}\" stroke=\"{}\" stroke-width=\"1\"/>",
                self.theme.grid_line,
            );
            y += GRID_SPACING;
        }
    }

    fn render_table(&self, svg: &mut String, table: &Table, drag: Option<&DragState>) {
        let dragged = drag.is_some_and(|d| d.target == EntityRef::Table(table.id));
        let fill = if dragged {
            self.theme.table_drag_fill
        } else {
            self.theme.table_fill
        };
        let stroke = self.theme.table_stroke;

        match table.shape {
            TableShape::Round => {
                let radius = table.width.min(table.height) / 2.0;
                let _ = write!(
                    svg,
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>",
                    table.x + radius,
                    table.y + radius,
                );
            }
            TableShape::Rectangular => {
                let _ = write!(
                    svg,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>",
                    table.x, table.y, table.width, table.height,
                );
            }
        }

        let center = table.center();
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" font-size=\"16\" font-weight=\"bold\" fill=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\">Table {}</text>",
            center.x,
            center.y + 5.0,
            self.theme.label,
            table.number,
        );
    }

    fn render_card(
        &self,
        svg: &mut String,
        card: &CardPlacement,
        guest: &Guest,
        drag: Option<&DragState>,
    ) {
        let dragged = drag.is_some_and(|d| d.target == EntityRef::Guest(card.guest));
        let assigned = card.is_assigned();
        let fill = if dragged {
            self.theme.card_drag_fill
        } else if assigned {
            self.theme.assigned_fill
        } else {
            self.theme.unassigned_fill
        };
        let stroke = if assigned {
            self.theme.assigned_stroke
        } else {
            self.theme.unassigned_stroke
        };
        let bounds = card.bounds;
        let _ = write!(
            svg,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"1\"/>",
            bounds.x, bounds.y, bounds.width, bounds.height,
        );

        let text_fill = if assigned {
            self.theme.assigned_text
        } else {
            self.theme.label
        };
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"{text_fill}\" font-family=\"sans-serif\">{}</text>",
            bounds.x + 8.0,
            bounds.y + 16.0,
            escape_xml(&guest.name),
        );

        if guest.plus_one {
            if assigned {
                let _ = write!(
                    svg,
                    "<text x=\"{}\" y=\"{}\" font-size=\"10\" fill=\"{}\" fill-opacity=\"0.8\" font-family=\"sans-serif\">+1</text>",
                    bounds.x + 8.0,
                    bounds.y + 32.0,
                    self.theme.assigned_text,
                );
            } else {
                let _ = write!(
                    svg,
                    "<text x=\"{}\" y=\"{}\" font-size=\"10\" fill=\"{}\" font-family=\"sans-serif\">+1</text>",
                    bounds.x + 8.0,
                    bounds.y + 32.0,
                    self.theme.muted,
                );
            }
        }
    }
}

/// Resolve the guest a card stands for: seated cards come from the roster,
/// unassigned cards from the chart's pool.
fn resolve_guest<'a>(
    card: &CardPlacement,
    chart: &'a SeatingChart,
    roster: &'a Roster,
) -> Option<&'a Guest> {
    if card.is_assigned() {
        roster.guest(card.guest)
    } else {
        chart.unassigned_guests.iter().find(|g| g.id == card.guest)
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use seating_core::{
        DragController, Guest, GuestId, Point, RsvpStatus, Table, TableId, TableShape,
    };

    fn sample_chart() -> SeatingChart {
        let mut chart = SeatingChart::new();
        chart.tables.push(Table {
            id: TableId::new(1),
            number: 1,
            x: 300.0,
            y: 200.0,
            width: 100.0,
            height: 100.0,
            shape: TableShape::Round,
            capacity: 8,
        });
        chart.tables.push(Table {
            id: TableId::new(2),
            number: 2,
            x: 550.0,
            y: 200.0,
            width: 120.0,
            height: 80.0,
            shape: TableShape::Rectangular,
            capacity: 6,
        });
        chart.unassigned_guests.push(Guest {
            id: GuestId::new(1),
            name: "Ann & Co".to_string(),
            plus_one: true,
            rsvp_status: RsvpStatus::Confirmed,
            table_number: None,
        });
        chart
    }

    fn sample_roster() -> Roster {
        Roster::new(vec![Guest {
            id: GuestId::new(2),
            name: "Bo".to_string(),
            plus_one: false,
            rsvp_status: RsvpStatus::Confirmed,
            table_number: Some(1),
        }])
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = SceneRenderer::new(Surface::default());
        let chart = sample_chart();
        let roster = sample_roster();
        let first = renderer.render_svg(&chart, &roster, None);
        let second = renderer.render_svg(&chart, &roster, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_chart_renders_background_and_grid_only() {
        let renderer = SceneRenderer::new(Surface::new(200, 100));
        let svg = renderer.render_svg(&SeatingChart::new(), &Roster::default(), None);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("#FAF9F7"));
        assert!(svg.contains("<line"));
        assert!(!svg.contains("<circle"));
        assert!(!svg.contains("Table"));
    }

    #[test]
    fn test_tables_drawn_by_shape_with_labels() {
        let renderer = SceneRenderer::new(Surface::default());
        let svg = renderer.render_svg(&sample_chart(), &sample_roster(), None);
        assert!(svg.contains("<circle cx=\"350\" cy=\"250\" r=\"50\""));
        assert!(svg.contains("<rect x=\"550\" y=\"200\""));
        assert!(svg.contains(">Table 1</text>"));
        assert!(svg.contains(">Table 2</text>"));
    }

    #[test]
    fn test_cards_distinguish_assigned_from_unassigned() {
        let renderer = SceneRenderer::new(Surface::default());
        let svg = renderer.render_svg(&sample_chart(), &sample_roster(), None);
        // Unassigned card with escaped name and plus-one marker.
        assert!(svg.contains("#F8E5D6"));
        assert!(svg.contains("Ann &amp; Co"));
        assert!(svg.contains(">+1</text>"));
        // Seated card.
        assert!(svg.contains("#7FB069"));
        assert!(svg.contains(">Bo</text>"));
    }

    #[test]
    fn test_drag_target_is_highlighted() {
        let chart = sample_chart();
        let roster = sample_roster();
        let mut controller = DragController::new();
        controller.pointer_down(Point::new(350.0, 250.0), &chart, &roster);
        let drag = controller.state().copied();

        let renderer = SceneRenderer::new(Surface::default());
        let svg = renderer.render_svg(&chart, &roster, drag.as_ref());
        assert!(svg.contains("#E8B4B8"), "dragged table uses highlight fill");

        let still = renderer.render_svg(&chart, &roster, None);
        assert!(!still.contains("#E8B4B8"));
    }
}
