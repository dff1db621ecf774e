//! Planar primitives and pointer hit-testing.

use serde::{Deserialize, Serialize};

use crate::chart::{GuestId, TableId};
use crate::layout::ChartLayout;

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position (units from left).
    pub x: f32,
    /// Y position (units from top).
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in surface units.
    pub width: f32,
    /// Height in surface units.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether a point lies within this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Reference to a hit-testable chart entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EntityRef {
    /// A table, by identity.
    Table(TableId),
    /// A guest card, by guest identity.
    Guest(GuestId),
}

/// Find the entity under a pointer position, or `None` for empty surface.
///
/// Tables are tested before guest cards, so a table wins over any card that
/// overlaps it. Round tables hit on their enclosing square, not a true
/// circular test. The layout passed in is the same one the renderer draws
/// from, which keeps pointer targets aligned with pixels.
#[must_use]
pub fn hit_test(layout: &ChartLayout, point: Point) -> Option<EntityRef> {
    for (id, bounds) in layout.tables() {
        if bounds.contains(point) {
            return Some(EntityRef::Table(*id));
        }
    }
    layout
        .cards()
        .iter()
        .find(|card| card.bounds.contains(point))
        .map(|card| EntityRef::Guest(card.guest))
}
