//! Placement and session error types.

use thiserror::Error;

use crate::cell::{Cell, ItemId};
use crate::drag::DragState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {cell} is outside the grid")]
    OutOfBounds { cell: Cell },

    #[error("cell {cell} is occupied by item {occupant}")]
    Occupied { cell: Cell, occupant: ItemId },

    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("cannot {op} while drag session is {state:?}")]
    InvalidState { op: &'static str, state: DragState },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no cells")]
    Empty,

    #[error("shape spans {span} cells on one axis, more than 65535")]
    TooLarge { span: i64 },
}
