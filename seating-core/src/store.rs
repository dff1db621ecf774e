//! Chart and guest storage.
//!
//! The stores are explicit objects owned by the composition root and handed
//! to the view by reference - never ambient module state. The chart store
//! persists by whole-object replace: the entire aggregate is validated and
//! swapped in, last write wins. An optional data directory mirrors the
//! stored chart to a JSON file, write-behind and best-effort.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::chart::{Guest, GuestId, SeatingChart};

/// Filename of the mirrored chart within the data directory.
const CHART_FILE: &str = "seating-chart.json";

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No chart has been initialized in the store.
    #[error("No seating chart found")]
    NotFound,
    /// The chart being written violates an invariant.
    #[error("Invalid seating chart: {0}")]
    Validation(String),
    /// The requested guest does not exist.
    #[error("Guest not found: {0}")]
    GuestNotFound(GuestId),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, Default)]
struct ChartSlot {
    chart: Option<SeatingChart>,
    revision: u64,
}

/// Store for the seating chart aggregate.
///
/// Lifecycle: seeded once via [`ChartStore::init`] (or
/// [`ChartStore::with_data_dir`]), read with [`ChartStore::load`], written
/// with [`ChartStore::replace`]. Reads hand out copies; the in-memory chart
/// is only ever swapped wholesale.
#[derive(Debug, Clone, Default)]
pub struct ChartStore {
    slot: Arc<RwLock<ChartSlot>>,
    /// Optional directory for the JSON mirror.
    data_dir: Option<PathBuf>,
}

impl ChartStore {
    /// Create an uninitialized store; [`ChartStore::load`] fails with
    /// [`StoreError::NotFound`] until a chart is written.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a store seeded with a chart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the seed violates chart
    /// invariants.
    pub fn init(seed: SeatingChart) -> Result<Self, StoreError> {
        seed.validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        Ok(Self {
            slot: Arc::new(RwLock::new(ChartSlot {
                chart: Some(seed),
                revision: 0,
            })),
            data_dir: None,
        })
    }

    /// Create a store with a JSON mirror in `data_dir`.
    ///
    /// When a mirrored chart already exists on disk it takes precedence
    /// over `seed`; otherwise the seed is used and mirrored. The directory
    /// is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created or an
    /// existing mirror cannot be read, [`StoreError::Serialization`] if an
    /// existing mirror cannot be parsed, or [`StoreError::Validation`] for
    /// an invalid seed.
    pub fn with_data_dir(seed: SeatingChart, data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        let path = data_dir.join(CHART_FILE);
        let chart = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            SeatingChart::from_json(&contents)
                .map_err(|e| StoreError::Serialization(e.to_string()))?
        } else {
            seed
        };
        chart
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        let store = Self {
            slot: Arc::new(RwLock::new(ChartSlot {
                chart: Some(chart.clone()),
                revision: 0,
            })),
            data_dir: Some(data_dir),
        };
        store.mirror(&chart);
        Ok(store)
    }

    /// Load a copy of the stored chart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the store was never initialized.
    pub fn load(&self) -> Result<SeatingChart, StoreError> {
        let slot = self
            .slot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slot.chart.clone().ok_or(StoreError::NotFound)
    }

    /// Replace the stored chart wholesale and return the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the chart violates an
    /// invariant; nothing is stored in that case.
    pub fn replace(&self, chart: SeatingChart) -> Result<SeatingChart, StoreError> {
        chart
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        {
            let mut slot = self
                .slot
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            slot.chart = Some(chart.clone());
            slot.revision += 1;
        }
        self.mirror(&chart);
        Ok(chart)
    }

    /// Number of successful writes since the store was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        let slot = self
            .slot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slot.revision
    }

    /// Write the chart to the JSON mirror, if configured.
    ///
    /// Mirror failures are logged and swallowed; the in-memory store stays
    /// authoritative.
    fn mirror(&self, chart: &SeatingChart) {
        let Some(ref data_dir) = self.data_dir else {
            return;
        };
        let json = match serde_json::to_string_pretty(chart) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("Failed to serialize chart for mirror: {e}");
                return;
            }
        };
        let path = data_dir.join(CHART_FILE);
        if let Err(e) = std::fs::write(&path, json) {
            tracing::warn!("Failed to mirror chart to {}: {e}", path.display());
        }
    }
}

/// Directory of all wedding guests, confirmed or not.
///
/// The seating core reads the confirmed subset and writes back table
/// assignments; everything else about guests belongs to the surrounding
/// application.
#[derive(Debug, Clone, Default)]
pub struct GuestDirectory {
    guests: Arc<RwLock<Vec<Guest>>>,
}

impl GuestDirectory {
    /// Create a directory seeded with guests.
    #[must_use]
    pub fn init(seed: Vec<Guest>) -> Self {
        Self {
            guests: Arc::new(RwLock::new(seed)),
        }
    }

    /// Guests with confirmed RSVP, in directory order.
    #[must_use]
    pub fn load_confirmed(&self) -> Vec<Guest> {
        let guests = self
            .guests
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guests.iter().filter(|g| g.is_confirmed()).cloned().collect()
    }

    /// Look up a guest by identity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GuestNotFound`] for an unknown id.
    pub fn guest(&self, id: GuestId) -> Result<Guest, StoreError> {
        let guests = self
            .guests
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guests
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(StoreError::GuestNotFound(id))
    }

    /// Assign a guest to a table number and return the updated guest.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GuestNotFound`] for an unknown id.
    pub fn assign_guest_to_table(
        &self,
        id: GuestId,
        table_number: u32,
    ) -> Result<Guest, StoreError> {
        let mut guests = self
            .guests
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let guest = guests
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StoreError::GuestNotFound(id))?;
        guest.table_number = Some(table_number);
        Ok(guest.clone())
    }

    /// Clear the assignment of every guest seated at `table_number` and
    /// return them, assignment already cleared.
    #[must_use = "the freed guests must rejoin the unassigned pool"]
    pub fn unassign_table(&self, table_number: u32) -> Vec<Guest> {
        let mut guests = self
            .guests
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut freed = Vec::new();
        for guest in &mut *guests {
            if guest.table_number == Some(table_number) {
                guest.table_number = None;
                freed.push(guest.clone());
            }
        }
        freed
    }
}
