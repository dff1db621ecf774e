//! The interactive seating view.
//!
//! Owns the loaded chart, the confirmed-guest roster, and the drag
//! controller, and mediates every mutation against the stores. Mirrors the
//! lifecycle of the on-screen view: load once on activation, mutate
//! optimistically during drags, persist whole-object on release.

use thiserror::Error;

use crate::chart::{SeatingChart, TableId};
use crate::drag::{DragController, DragState, ReleaseAction};
use crate::error::ChartError;
use crate::geometry::{EntityRef, Point};
use crate::roster::Roster;
use crate::store::{ChartStore, GuestDirectory, StoreError};

/// Errors surfaced by the view. All are recoverable; the view stays
/// interactive after any of them.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Chart or guest list could not be loaded; the view holds nothing.
    #[error("Failed to load seating data: {0}")]
    Load(#[source] StoreError),

    /// Write-back of the chart failed. In-memory state is kept as-is and
    /// the view is marked unsynced until a retry succeeds.
    #[error("Failed to save seating arrangement: {0}")]
    Persist(#[source] StoreError),

    /// A guest assignment could not be recorded.
    #[error("Failed to assign guest: {0}")]
    Assign(#[source] StoreError),

    /// A chart operation failed (unknown table, invariant breach).
    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// The seating chart view state.
#[derive(Debug)]
pub struct SeatingView {
    chart_store: ChartStore,
    guests: GuestDirectory,
    chart: Option<SeatingChart>,
    roster: Roster,
    controller: DragController,
    unsynced: bool,
}

impl SeatingView {
    /// Create a view over the given stores. Nothing is loaded yet.
    #[must_use]
    pub fn new(chart_store: ChartStore, guests: GuestDirectory) -> Self {
        Self {
            chart_store,
            guests,
            chart: None,
            roster: Roster::default(),
            controller: DragController::new(),
            unsynced: false,
        }
    }

    /// Load the chart and the confirmed-guest roster.
    ///
    /// Safe to call again as a retry after a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Load`] if the chart store has no chart; the
    /// view then renders nothing.
    pub fn load(&mut self) -> Result<(), ViewError> {
        let chart = self.chart_store.load().map_err(ViewError::Load)?;
        self.chart = Some(chart);
        self.roster = Roster::new(self.guests.load_confirmed());
        self.unsynced = false;
        Ok(())
    }

    /// The loaded chart, if any.
    #[must_use]
    pub fn chart(&self) -> Option<&SeatingChart> {
        self.chart.as_ref()
    }

    /// The confirmed-guest roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The active drag state, if a drag is in progress.
    #[must_use]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.controller.state()
    }

    /// Whether local state has changes the store has not accepted yet.
    #[must_use]
    pub fn is_unsynced(&self) -> bool {
        self.unsynced
    }

    /// Add a table and persist the chart.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Load`] when no chart is loaded, or
    /// [`ViewError::Persist`] when the write-back fails (the table stays in
    /// local state, marked unsynced).
    pub fn add_table(&mut self) -> Result<TableId, ViewError> {
        let chart = self
            .chart
            .as_mut()
            .ok_or_else(|| ViewError::Load(StoreError::NotFound))?;
        let id = chart.add_table();
        self.persist()?;
        Ok(id)
    }

    /// Remove a table; its seated guests return to the unassigned pool.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Load`] when no chart is loaded,
    /// [`ViewError::Chart`] for an unknown table, or
    /// [`ViewError::Persist`] when the write-back fails.
    pub fn remove_table(&mut self, id: TableId) -> Result<(), ViewError> {
        let chart = self
            .chart
            .as_mut()
            .ok_or_else(|| ViewError::Load(StoreError::NotFound))?;
        let table = chart.remove_table(id)?;
        let freed = self.guests.unassign_table(table.number);
        chart.unassigned_guests.extend(freed);
        self.roster = Roster::new(self.guests.load_confirmed());
        self.persist()
    }

    /// Pointer pressed at `point`; begins a drag when an entity is hit.
    pub fn pointer_down(&mut self, point: Point) -> Option<EntityRef> {
        let chart = self.chart.as_ref()?;
        self.controller.pointer_down(point, chart, &self.roster)
    }

    /// Pointer moved to `point`; updates the dragged table in memory only.
    pub fn pointer_move(&mut self, point: Point) {
        if let Some(chart) = self.chart.as_mut() {
            self.controller.pointer_move(point, chart);
        }
    }

    /// Pointer released at `point`; persists or assigns as the drag
    /// demands and clears drag state either way.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Persist`] or [`ViewError::Assign`]; in-memory
    /// positions are never rolled back.
    pub fn pointer_up(&mut self, point: Point) -> Result<(), ViewError> {
        let action = match self.chart.as_ref() {
            Some(chart) => self.controller.pointer_up(point, chart),
            None => ReleaseAction::None,
        };
        self.apply_release(action)
    }

    /// Pointer left the surface; treated as a release with no drop target.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SeatingView::pointer_up`].
    pub fn pointer_leave(&mut self) -> Result<(), ViewError> {
        let action = self.controller.pointer_leave();
        self.apply_release(action)
    }

    /// Retry a failed write-back. No-op when the view is in sync.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Persist`] if the store rejects the chart again.
    pub fn retry_sync(&mut self) -> Result<(), ViewError> {
        if self.unsynced {
            self.persist()
        } else {
            Ok(())
        }
    }

    fn apply_release(&mut self, action: ReleaseAction) -> Result<(), ViewError> {
        match action {
            ReleaseAction::None => Ok(()),
            ReleaseAction::PersistChart => self.persist(),
            ReleaseAction::AssignGuest {
                guest,
                table_number,
            } => {
                self.guests
                    .assign_guest_to_table(guest, table_number)
                    .map_err(ViewError::Assign)?;
                if let Some(chart) = self.chart.as_mut() {
                    chart.unassigned_guests.retain(|g| g.id != guest);
                }
                self.roster = Roster::new(self.guests.load_confirmed());
                self.persist()
            }
        }
    }

    /// Write the whole chart back to the store.
    ///
    /// On success the view adopts the stored copy. On failure local state
    /// is kept (not rolled back) and flagged unsynced for a later retry.
    fn persist(&mut self) -> Result<(), ViewError> {
        let Some(chart) = self.chart.as_ref() else {
            return Ok(());
        };
        match self.chart_store.replace(chart.clone()) {
            Ok(stored) => {
                self.chart = Some(stored);
                self.unsynced = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Chart write-back failed, keeping local state: {e}");
                self.unsynced = true;
                Err(ViewError::Persist(e))
            }
        }
    }
}
