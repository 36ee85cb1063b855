//! Placement legality.

use crate::cell::{Cell, ItemId};
use crate::error::GridError;
use crate::grid::Grid;
use crate::shape::Shape;

/// Verdict for placing a shape at an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    /// First footprint cell (in shape order) outside the grid.
    OutOfBounds { cell: Cell },
    /// First footprint cell (in shape order) held by another item.
    Occupied { cell: Cell, occupant: ItemId },
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    /// Convert a failed verdict into the matching [`GridError`].
    pub fn into_result(self) -> Result<(), GridError> {
        match self {
            Validity::Valid => Ok(()),
            Validity::OutOfBounds { cell } => Err(GridError::OutOfBounds { cell }),
            Validity::Occupied { cell, occupant } => Err(GridError::Occupied { cell, occupant }),
        }
    }
}

/// Decide whether `shape` anchored at `anchor` fits on `grid`.
///
/// Cells held by `moving` do not conflict. Bounds are checked over the whole
/// footprint before occupancy, so a footprint that is both out of bounds and
/// overlapping reports `OutOfBounds`.
pub fn validate(grid: &Grid, shape: &Shape, anchor: Cell, moving: Option<ItemId>) -> Validity {
    for (offset, target) in shape.offsets().iter().zip(shape.cells_at(anchor)) {
        match target {
            Some(cell) if grid.contains(cell) => {}
            Some(cell) => return Validity::OutOfBounds { cell },
            // coordinates overflowed; saturate for the report
            None => {
                let cell = Cell::new(
                    anchor.x.saturating_add(offset.x),
                    anchor.y.saturating_add(offset.y),
                );
                return Validity::OutOfBounds { cell };
            }
        }
    }

    for cell in shape.cells_at(anchor).flatten() {
        match grid.item_at(cell) {
            Some(occupant) if Some(occupant) != moving => {
                return Validity::Occupied { cell, occupant };
            }
            _ => {}
        }
    }

    Validity::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Shape {
        Shape::new([Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)]).unwrap()
    }

    #[test]
    fn empty_grid_accepts_in_bounds() {
        let grid = Grid::new(5, 5);
        assert_eq!(validate(&grid, &l_shape(), Cell::new(3, 3), None), Validity::Valid);
    }

    #[test]
    fn reports_first_out_of_bounds_cell() {
        let grid = Grid::new(5, 5);
        assert_eq!(
            validate(&grid, &l_shape(), Cell::new(4, 4), None),
            Validity::OutOfBounds {
                cell: Cell::new(5, 4)
            }
        );
        assert_eq!(
            validate(&grid, &l_shape(), Cell::new(10, 10), None),
            Validity::OutOfBounds {
                cell: Cell::new(10, 10)
            }
        );
    }

    #[test]
    fn bounds_take_precedence_over_occupancy() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::new(4, 0), &Shape::single(), ItemId(1)).unwrap();
        let bar = Shape::rect(2, 1).unwrap();
        assert!(matches!(
            validate(&grid, &bar, Cell::new(4, 0), None),
            Validity::OutOfBounds { .. }
        ));
    }

    #[test]
    fn own_cells_do_not_conflict() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::ORIGIN, &l_shape(), ItemId(1)).unwrap();

        assert_eq!(
            validate(&grid, &l_shape(), Cell::new(1, 0), None),
            Validity::Occupied {
                cell: Cell::new(1, 0),
                occupant: ItemId(1)
            }
        );
        assert_eq!(
            validate(&grid, &l_shape(), Cell::new(1, 0), Some(ItemId(1))),
            Validity::Valid
        );
    }

    #[test]
    fn other_items_still_conflict_while_moving() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::ORIGIN, &Shape::single(), ItemId(1)).unwrap();
        grid.try_occupy(Cell::new(2, 0), &Shape::single(), ItemId(2)).unwrap();
        let bar = Shape::rect(3, 1).unwrap();
        assert_eq!(
            validate(&grid, &bar, Cell::ORIGIN, Some(ItemId(1))),
            Validity::Occupied {
                cell: Cell::new(2, 0),
                occupant: ItemId(2)
            }
        );
    }

    #[test]
    fn overflowing_anchor_is_out_of_bounds() {
        let grid = Grid::new(5, 5);
        let bar = Shape::rect(2, 1).unwrap();
        assert!(matches!(
            validate(&grid, &bar, Cell::new(i32::MAX, 0), None),
            Validity::OutOfBounds { .. }
        ));
    }

    #[test]
    fn validation_is_pure() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::ORIGIN, &l_shape(), ItemId(1)).unwrap();
        let before = grid.clone();
        let _ = validate(&grid, &l_shape(), Cell::new(1, 1), None);
        let _ = validate(&grid, &l_shape(), Cell::new(9, 9), Some(ItemId(1)));
        assert_eq!(grid, before);
    }
}
