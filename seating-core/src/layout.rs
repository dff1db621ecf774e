//! Shared placement of tables and guest cards.
//!
//! One layout pass produces every bounding box on the surface. The renderer
//! draws from it and the hit-tester reads from it; computing card positions
//! twice with diverging formulas is how clicks drift away from pixels, so
//! there is exactly one formula here.

use crate::chart::{GuestId, SeatingChart, Table, TableId};
use crate::geometry::{Point, Rect};
use crate::roster::Roster;

/// Guest card width in surface units.
pub const CARD_WIDTH: f32 = 120.0;

/// Guest card height in surface units.
pub const CARD_HEIGHT: f32 = 40.0;

/// Top and left margin of the unassigned-guest grid.
pub const GRID_MARGIN: f32 = 20.0;

/// Columns in the unassigned-guest grid.
pub const GRID_COLUMNS: usize = 3;

/// Horizontal stride between unassigned cards.
pub const CARD_STRIDE: f32 = 140.0;

/// Vertical stride between unassigned-grid rows.
pub const ROW_STRIDE: f32 = 60.0;

/// Distance from a table's edge to its ring of seated-guest cards.
pub const SEAT_RING_OFFSET: f32 = 40.0;

/// A positioned guest card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    /// The guest this card represents.
    pub guest: GuestId,
    /// Card bounding box on the surface.
    pub bounds: Rect,
    /// Table number when seated; `None` for the unassigned grid.
    pub table: Option<u32>,
}

impl CardPlacement {
    /// Whether this card belongs to a seated guest.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.table.is_some()
    }
}

/// Every bounding box on the chart surface for one (chart, roster) state.
#[derive(Debug, Clone, Default)]
pub struct ChartLayout {
    tables: Vec<(TableId, Rect)>,
    cards: Vec<CardPlacement>,
}

impl ChartLayout {
    /// Compute the layout for a chart and its confirmed-guest roster.
    ///
    /// Unassigned guests fill a three-column grid from the top-left;
    /// seated guests ring their table. Card order is unassigned first,
    /// then per-table in stored table order.
    #[must_use]
    pub fn compute(chart: &SeatingChart, roster: &Roster) -> Self {
        let tables = chart.tables.iter().map(|t| (t.id, t.bounds())).collect();

        let mut cards = Vec::with_capacity(chart.unassigned_guests.len() + roster.seated_count());
        for (index, guest) in chart.unassigned_guests.iter().enumerate() {
            cards.push(CardPlacement {
                guest: guest.id,
                bounds: grid_slot(index),
                table: None,
            });
        }
        for table in &chart.tables {
            let seated = roster.at_table(table.number);
            let ring = seat_ring(table, seated.len());
            for (guest, bounds) in seated.iter().zip(ring) {
                cards.push(CardPlacement {
                    guest: guest.id,
                    bounds,
                    table: Some(table.number),
                });
            }
        }

        Self { tables, cards }
    }

    /// Table bounding boxes, in stored order.
    #[must_use]
    pub fn tables(&self) -> &[(TableId, Rect)] {
        &self.tables
    }

    /// Guest card placements, unassigned grid first.
    #[must_use]
    pub fn cards(&self) -> &[CardPlacement] {
        &self.cards
    }

    /// The placement of a specific guest's card, if laid out.
    #[must_use]
    pub fn card(&self, guest: GuestId) -> Option<&CardPlacement> {
        self.cards.iter().find(|c| c.guest == guest)
    }
}

/// Grid slot of the unassigned guest card at `index`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_slot(index: usize) -> Rect {
    let column = (index % GRID_COLUMNS) as f32;
    let row = (index / GRID_COLUMNS) as f32;
    Rect::new(
        GRID_MARGIN + column * CARD_STRIDE,
        GRID_MARGIN + row * ROW_STRIDE,
        CARD_WIDTH,
        CARD_HEIGHT,
    )
}

/// Card rectangles ringing `table` for `count` seated guests.
///
/// Guest `i` of `n` sits at angle `i / n * 2π` on a circle centered on the
/// table, radius half the larger table dimension plus [`SEAT_RING_OFFSET`],
/// with the card centered on the ring point. `count == 0` yields no
/// rectangles and never evaluates the angle fraction.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn seat_ring(table: &Table, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let center = table.center();
    let radius = table.width.max(table.height) / 2.0 + SEAT_RING_OFFSET;
    (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
            ring_card(center, radius, angle)
        })
        .collect()
}

/// The card rectangle centered on a ring point at `angle`.
fn ring_card(center: Point, radius: f32, angle: f32) -> Rect {
    Rect::new(
        center.x + angle.cos() * radius - CARD_WIDTH / 2.0,
        center.y + angle.sin() * radius - CARD_HEIGHT / 2.0,
        CARD_WIDTH,
        CARD_HEIGHT,
    )
}
