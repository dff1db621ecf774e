//! # Seating Core
//!
//! Core logic for the wedding seating chart: data model, shared layout,
//! hit-testing, drag interaction, and the chart/guest stores.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                seating-core                 │
//! ├──────────────────────┬──────────────────────┤
//! │  Chart Model         │  Layout Engine       │
//! │  - Tables            │  - Unassigned grid   │
//! │  - Guests            │  - Polar seat rings  │
//! │  - Invariants        │  - One source, both  │
//! │                      │    renderer & hits   │
//! ├──────────────────────┼──────────────────────┤
//! │  Drag Controller     │  Stores              │
//! │  - Idle ⇄ Dragging   │  - Whole-object      │
//! │  - Release actions   │    replace           │
//! │                      │  - Guest directory   │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Rendering and export live in `seating-renderer`, which consumes the
//! same [`layout::ChartLayout`] the hit-tester reads from.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod roster;
pub mod store;
pub mod view;

pub use chart::{Guest, GuestId, RsvpStatus, SeatingChart, Table, TableId, TableShape};
pub use drag::{DragController, DragState, ReleaseAction};
pub use error::{ChartError, ChartResult};
pub use geometry::{hit_test, EntityRef, Point, Rect};
pub use layout::{CardPlacement, ChartLayout};
pub use roster::Roster;
pub use store::{ChartStore, GuestDirectory, StoreError};
pub use view::{SeatingView, ViewError};

/// Seating core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
