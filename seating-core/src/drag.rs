//! Pointer-driven drag interaction.
//!
//! A three-state machine: Idle, Dragging, back to Idle on release. Tables
//! reposition live while dragged; guest cards drag visually and resolve to
//! a table assignment on release. Persistence is the caller's job - the
//! controller only says what the release means.

use crate::chart::{GuestId, SeatingChart};
use crate::geometry::{hit_test, EntityRef, Point};
use crate::layout::ChartLayout;
use crate::roster::Roster;

/// Transient state of an active drag. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// The entity being dragged.
    pub target: EntityRef,
    /// Pointer offset from the entity's top-left corner at grab time.
    pub offset: Point,
}

/// What a pointer release asks the owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Nothing to do (no drag active, or a guest card dropped on empty
    /// surface snaps back).
    None,
    /// A table finished moving; persist the whole chart.
    PersistChart,
    /// A guest card was dropped on a table; assign and persist.
    AssignGuest {
        /// The dropped guest.
        guest: GuestId,
        /// Display number of the table under the drop point.
        table_number: u32,
    },
}

/// The drag state machine.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: Option<DragState>,
}

impl DragController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// The active drag state, if any.
    #[must_use]
    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    /// Pointer down at `point`: begin a drag if an entity is hit.
    ///
    /// Returns the grabbed entity. A miss cancels nothing and grabs
    /// nothing; a pointer-down while already dragging is ignored.
    pub fn pointer_down(
        &mut self,
        point: Point,
        chart: &SeatingChart,
        roster: &Roster,
    ) -> Option<EntityRef> {
        if self.state.is_some() {
            return None;
        }
        let layout = ChartLayout::compute(chart, roster);
        let target = hit_test(&layout, point)?;
        let origin = match target {
            EntityRef::Table(id) => {
                let table = chart.table(id)?;
                Point::new(table.x, table.y)
            }
            EntityRef::Guest(id) => {
                let card = layout.card(id)?;
                Point::new(card.bounds.x, card.bounds.y)
            }
        };
        self.state = Some(DragState {
            target,
            offset: Point::new(point.x - origin.x, point.y - origin.y),
        });
        Some(target)
    }

    /// Pointer moved to `point`: update the dragged table in memory.
    ///
    /// Guest cards do not reflow mid-drag; their drop resolves on release.
    pub fn pointer_move(&mut self, point: Point, chart: &mut SeatingChart) {
        let Some(state) = self.state else {
            return;
        };
        if let EntityRef::Table(id) = state.target {
            if let Some(table) = chart.table_mut(id) {
                table.x = point.x - state.offset.x;
                table.y = point.y - state.offset.y;
            }
        }
    }

    /// Pointer released at `point`: end the drag and report its outcome.
    pub fn pointer_up(&mut self, point: Point, chart: &SeatingChart) -> ReleaseAction {
        match self.state.take() {
            None => ReleaseAction::None,
            Some(DragState {
                target: EntityRef::Table(_),
                ..
            }) => ReleaseAction::PersistChart,
            Some(DragState {
                target: EntityRef::Guest(guest),
                ..
            }) => chart
                .tables
                .iter()
                .find(|t| t.contains_point(point))
                .map_or(ReleaseAction::None, |t| ReleaseAction::AssignGuest {
                    guest,
                    table_number: t.number,
                }),
        }
    }

    /// Pointer left the surface: treated as a release with no drop target.
    pub fn pointer_leave(&mut self) -> ReleaseAction {
        match self.state.take() {
            Some(DragState {
                target: EntityRef::Table(_),
                ..
            }) => ReleaseAction::PersistChart,
            _ => ReleaseAction::None,
        }
    }
}
