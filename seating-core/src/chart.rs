//! Seating chart data model - tables, guests, and the chart aggregate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::geometry::{Point, Rect};

/// Position where newly added tables spawn.
const NEW_TABLE_POSITION: (f32, f32) = (200.0, 200.0);

/// Side length of a newly added table.
const NEW_TABLE_SIZE: f32 = 100.0;

/// Seating capacity of a newly added table.
const NEW_TABLE_CAPACITY: u32 = 8;

/// Unique identifier for a table.
///
/// Identity only; the assignment key guests reference is the table's display
/// [`number`](Table::number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(u32);

impl TableId {
    /// Create a table ID from a raw integer.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuestId(u32);

impl GuestId {
    /// Create a guest ID from a raw integer.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Table footprint shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    /// Round table, drawn as a circle inscribed in its bounding box.
    Round,
    /// Rectangular table, drawn as its bounding box.
    Rectangular,
}

/// A table placed on the seating surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Unique identity, stable across drags.
    pub id: TableId,
    /// Display number, unique per chart; the key guests are assigned to.
    pub number: u32,
    /// Left edge in surface coordinates.
    pub x: f32,
    /// Top edge in surface coordinates.
    pub y: f32,
    /// Width in surface units.
    pub width: f32,
    /// Height in surface units.
    pub height: f32,
    /// Footprint shape.
    pub shape: TableShape,
    /// Seating capacity.
    pub capacity: u32,
}

impl Table {
    /// Bounding box of the table.
    ///
    /// Round tables report their enclosing square; hit-testing uses this
    /// box, not a circular test.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Center of the table.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Check if a surface point is within this table's bounding box.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

/// RSVP status of a guest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsvpStatus {
    /// Attendance confirmed; eligible for seating.
    Confirmed,
    /// No response yet.
    #[default]
    Pending,
    /// Declined; never seated.
    Declined,
}

/// A guest, as far as seating is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    /// Unique identity.
    pub id: GuestId,
    /// Display name.
    pub name: String,
    /// Whether the guest brings a plus-one.
    #[serde(default)]
    pub plus_one: bool,
    /// RSVP status; only confirmed guests are seated.
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    /// Assigned table number; `None` means unassigned.
    #[serde(default)]
    pub table_number: Option<u32>,
}

impl Guest {
    /// Whether this guest has confirmed attendance.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.rsvp_status == RsvpStatus::Confirmed
    }
}

/// The seating chart aggregate: table placements plus the pool of
/// confirmed guests not yet assigned to a table.
///
/// Invariants, checked by [`SeatingChart::validate`]: table ids and numbers
/// are unique, and no guest in the unassigned pool carries a table number.
/// A guest appears in at most one of {unassigned pool, seated at a table}.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingChart {
    /// All tables, in creation order.
    pub tables: Vec<Table>,
    /// Confirmed guests awaiting a table, in list order.
    #[serde(default)]
    pub unassigned_guests: Vec<Guest>,
}

impl SeatingChart {
    /// Create an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new table and return its identity.
    ///
    /// The id and number are each one greater than the current maximum of
    /// that field (1 when the chart has no tables). The table spawns round,
    /// 100x100, capacity 8, at (200, 200).
    pub fn add_table(&mut self) -> TableId {
        let id = TableId::new(self.tables.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1);
        let number = self.tables.iter().map(|t| t.number).max().unwrap_or(0) + 1;
        self.tables.push(Table {
            id,
            number,
            x: NEW_TABLE_POSITION.0,
            y: NEW_TABLE_POSITION.1,
            width: NEW_TABLE_SIZE,
            height: NEW_TABLE_SIZE,
            shape: TableShape::Round,
            capacity: NEW_TABLE_CAPACITY,
        });
        id
    }

    /// Remove a table from the chart.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not found.
    pub fn remove_table(&mut self, id: TableId) -> ChartResult<Table> {
        let index = self
            .tables
            .iter()
            .position(|t| t.id == id)
            .ok_or(ChartError::TableNotFound(id))?;
        Ok(self.tables.remove(index))
    }

    /// Get a table by identity.
    #[must_use]
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a table by identity.
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    /// Get a table by display number.
    #[must_use]
    pub fn table_by_number(&self, number: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.number == number)
    }

    /// Number of tables in the chart.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Check if the chart has no tables and no unassigned guests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.unassigned_guests.is_empty()
    }

    /// Check the chart invariants.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate table ids or numbers, or when an
    /// unassigned guest still carries a table number.
    pub fn validate(&self) -> ChartResult<()> {
        let mut ids = HashSet::new();
        let mut numbers = HashSet::new();
        for table in &self.tables {
            if !ids.insert(table.id) {
                return Err(ChartError::DuplicateTableId(table.id));
            }
            if !numbers.insert(table.number) {
                return Err(ChartError::DuplicateTableNumber(table.number));
            }
        }
        for guest in &self.unassigned_guests {
            if let Some(number) = guest.table_number {
                return Err(ChartError::StrayAssignment(guest.id, number));
            }
        }
        Ok(())
    }

    /// Serialize the chart to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(ChartError::Serialization)
    }

    /// Deserialize a chart from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> ChartResult<Self> {
        serde_json::from_str(json).map_err(ChartError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: u32, number: u32) -> Table {
        Table {
            id: TableId::new(id),
            number,
            x: 100.0,
            y: 100.0,
            width: 100.0,
            height: 100.0,
            shape: TableShape::Round,
            capacity: 8,
        }
    }

    #[test]
    fn test_add_table_increments_max_id_and_number() {
        let mut chart = SeatingChart::new();
        chart.tables.push(table(3, 2));

        let id = chart.add_table();
        assert_eq!(id, TableId::new(4));
        let added = chart.table(id).expect("added table");
        assert_eq!(added.number, 3);
        assert_eq!(added.capacity, 8);
        assert_eq!(added.shape, TableShape::Round);
    }

    #[test]
    fn test_add_table_to_empty_chart_starts_at_one() {
        let mut chart = SeatingChart::new();
        let id = chart.add_table();
        assert_eq!(id, TableId::new(1));
        assert_eq!(chart.table(id).expect("table").number, 1);
    }

    #[test]
    fn test_add_table_skips_gaps_from_maximum() {
        let mut chart = SeatingChart::new();
        chart.tables.push(table(1, 1));
        chart.tables.push(table(7, 5));

        chart.add_table();
        let ids: Vec<u32> = chart.tables.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 7, 8]);
    }

    #[test]
    fn test_remove_table() {
        let mut chart = SeatingChart::new();
        chart.tables.push(table(1, 1));
        let removed = chart.remove_table(TableId::new(1)).expect("remove");
        assert_eq!(removed.number, 1);
        assert!(chart.is_empty());
        assert!(matches!(
            chart.remove_table(TableId::new(1)),
            Err(ChartError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut chart = SeatingChart::new();
        chart.tables.push(table(1, 1));
        chart.tables.push(table(1, 2));
        assert!(matches!(
            chart.validate(),
            Err(ChartError::DuplicateTableId(_))
        ));

        chart.tables[1].id = TableId::new(2);
        chart.tables[1].number = 1;
        assert!(matches!(
            chart.validate(),
            Err(ChartError::DuplicateTableNumber(1))
        ));
    }

    #[test]
    fn test_validate_rejects_stray_assignment() {
        let mut chart = SeatingChart::new();
        chart.unassigned_guests.push(Guest {
            id: GuestId::new(1),
            name: "Ann".to_string(),
            plus_one: false,
            rsvp_status: RsvpStatus::Confirmed,
            table_number: Some(2),
        });
        assert!(matches!(
            chart.validate(),
            Err(ChartError::StrayAssignment(_, 2))
        ));
    }

    #[test]
    fn test_round_trip_json() {
        let mut chart = SeatingChart::new();
        chart.add_table();
        let json = chart.to_json().expect("to json");
        assert!(json.contains("\"shape\":\"round\""));
        let parsed = SeatingChart::from_json(&json).expect("from json");
        assert_eq!(parsed.table_count(), 1);
    }

    #[test]
    fn test_table_contains_point_uses_bounding_box() {
        let t = table(1, 1);
        // Corner of the enclosing square, outside the inscribed circle.
        assert!(t.contains_point(Point::new(102.0, 102.0)));
        assert!(!t.contains_point(Point::new(99.0, 150.0)));
    }
}
