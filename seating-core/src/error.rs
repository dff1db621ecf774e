//! Error types for chart operations.

use thiserror::Error;

use crate::chart::{GuestId, TableId};

/// Result type for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;

/// Errors that can occur while manipulating a seating chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Table not found in the chart.
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// Two tables share the same identity.
    #[error("Duplicate table id: {0}")]
    DuplicateTableId(TableId),

    /// Two tables share the same display number.
    #[error("Duplicate table number: {0}")]
    DuplicateTableNumber(u32),

    /// An unassigned guest still carries a table assignment.
    #[error("Unassigned guest {0} carries table number {1}")]
    StrayAssignment(GuestId, u32),

    /// Chart serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
