//! Drag-and-drop session state machine.
//!
//! ```text
//! Idle --begin--> Dragging --drop(valid)--> Committed
//!                    |    \--drop(invalid)--> Cancelled
//!                    \--cancel-------------> Cancelled
//! Committed / Cancelled --reset--> Idle
//! ```
//!
//! The session never owns the grid: every call borrows it, so the host keeps
//! both on one thread. Hover updates only read the grid; `drop` is the single
//! mutating step and applies the move atomically through
//! [`Grid::try_occupy`].

use tracing::{debug, warn};

use crate::cell::{Cell, ItemId};
use crate::error::GridError;
use crate::grid::{Grid, PlacedItem};
use crate::shape::Shape;
use crate::validator::{validate, Validity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
    Committed,
    Cancelled,
}

impl DragState {
    /// Committed or Cancelled.
    pub fn is_terminal(self) -> bool {
        matches!(self, DragState::Committed | DragState::Cancelled)
    }
}

/// Highlight data for the hovered anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub anchor: Cell,
    /// Footprint at `anchor`; may include out-of-bounds cells.
    pub cells: Vec<Cell>,
    pub validity: Validity,
}

#[derive(Debug, Clone)]
struct Grab {
    item: ItemId,
    origin: Cell,
    shape: Shape,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    state: DragState,
    grab: Option<Grab>,
    preview: Option<Preview>,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DragSession {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            grab: None,
            preview: None,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Item picked up by the current (or last, until reset) session.
    pub fn item(&self) -> Option<ItemId> {
        self.grab.as_ref().map(|g| g.item)
    }

    /// Anchor the item had when it was picked up.
    pub fn origin(&self) -> Option<Cell> {
        self.grab.as_ref().map(|g| g.origin)
    }

    /// Footprint of the picked-up item.
    pub fn shape(&self) -> Option<&Shape> {
        self.grab.as_ref().map(|g| &g.shape)
    }

    /// Last hovered anchor.
    pub fn hover(&self) -> Option<Cell> {
        self.preview.as_ref().map(|p| p.anchor)
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Whether the last hovered anchor would accept the item.
    pub fn is_hover_valid(&self) -> bool {
        self.preview
            .as_ref()
            .is_some_and(|p| p.validity.is_valid())
    }

    /// Pick up `item`. Only allowed from `Idle`.
    pub fn begin(&mut self, grid: &Grid, item: ItemId) -> Result<(), GridError> {
        if self.state != DragState::Idle {
            return Err(self.reject("begin"));
        }
        let placed = grid.placement(item).ok_or(GridError::UnknownItem(item))?;

        self.grab = Some(Grab {
            item,
            origin: placed.anchor,
            shape: placed.shape.clone(),
        });
        self.preview = None;
        self.state = DragState::Dragging;

        debug!("Drag started: item {item} from {}", placed.anchor);
        Ok(())
    }

    /// Preview dropping at `anchor`. Never mutates the grid.
    pub fn update_hover(&mut self, grid: &Grid, anchor: Cell) -> Result<Validity, GridError> {
        let grab = self.grabbed("hover")?;
        let validity = validate(grid, &grab.shape, anchor, Some(grab.item));
        let cells = grab.shape.cells_at(anchor).flatten().collect();

        self.preview = Some(Preview {
            anchor,
            cells,
            validity,
        });
        Ok(validity)
    }

    /// Drop at `anchor`.
    ///
    /// A valid anchor moves the item and ends in `Committed`. Anything else
    /// ends in `Cancelled` with the grid untouched and the placement error
    /// returned.
    pub fn drop(&mut self, grid: &mut Grid, anchor: Cell) -> Result<PlacedItem, GridError> {
        let (item, shape) = {
            let grab = self.grabbed("drop")?;
            (grab.item, grab.shape.clone())
        };

        let outcome = if grid.placement(item).is_none() {
            Err(GridError::UnknownItem(item))
        } else {
            validate(grid, &shape, anchor, Some(item))
                .into_result()
                .and_then(|()| grid.try_occupy(anchor, &shape, item))
        };

        match outcome {
            Ok(()) => {
                self.state = DragState::Committed;
                self.preview = Some(Preview {
                    anchor,
                    cells: shape.cells_at(anchor).flatten().collect(),
                    validity: Validity::Valid,
                });
                debug!("Drag committed: item {item} to {anchor}");
                Ok(PlacedItem {
                    item,
                    anchor,
                    shape,
                })
            }
            Err(e) => {
                self.state = DragState::Cancelled;
                debug!("Drag cancelled: item {item} at {anchor}: {e}");
                Err(e)
            }
        }
    }

    /// Abort the drag. Grid is untouched.
    pub fn cancel(&mut self) -> Result<(), GridError> {
        self.grabbed("cancel")?;
        self.state = DragState::Cancelled;
        debug!("Drag cancelled by host");
        Ok(())
    }

    /// Return to `Idle` for the next pickup. Not allowed mid-drag.
    pub fn reset(&mut self) -> Result<(), GridError> {
        if self.state == DragState::Dragging {
            return Err(self.reject("reset"));
        }
        self.state = DragState::Idle;
        self.grab = None;
        self.preview = None;
        Ok(())
    }

    fn grabbed(&self, op: &'static str) -> Result<&Grab, GridError> {
        match (&self.state, &self.grab) {
            (DragState::Dragging, Some(grab)) => Ok(grab),
            _ => Err(self.reject(op)),
        }
    }

    fn reject(&self, op: &'static str) -> GridError {
        warn!("Rejected {op}: drag session is {:?}", self.state);
        GridError::InvalidState {
            op,
            state: self.state,
        }
    }
}
