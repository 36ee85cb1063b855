//! Grid placement engine for drag-and-drop inventories.
//!
//! - [`Grid`]: fixed-size occupancy map of [`ItemId`]s.
//! - [`Shape`]: normalized footprint of an item relative to its anchor.
//! - [`validate`]: placement legality for a shape at an anchor.
//! - [`DragSession`]: pickup → hover → drop/cancel state machine.
//!
//! Rendering, input translation and asset lookup live outside this crate;
//! they drive a [`DragSession`] and read back [`Grid`] occupancy.

pub mod cell;
pub mod drag;
pub mod error;
pub mod grid;
pub mod shape;
pub mod validator;

pub use cell::{Cell, ItemId};
pub use drag::{DragSession, DragState, Preview};
pub use error::{GridError, ShapeError};
pub use grid::{Grid, PlacedItem, Release};
pub use shape::Shape;
pub use validator::{validate, Validity};
