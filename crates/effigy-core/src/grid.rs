//! Fixed-size occupancy map.
//!
//! Every in-bounds cell holds at most one [`ItemId`]. All mutations go through
//! [`Grid::try_occupy`] and [`Grid::release`], which either apply fully or not
//! at all, so a caller never observes partial or duplicate occupancy.

use std::collections::HashMap;

use tracing::debug;

use crate::cell::{Cell, ItemId};
use crate::error::GridError;
use crate::shape::Shape;
use crate::validator::validate;

/// An item resting on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    pub item: ItemId,
    pub anchor: Cell,
    pub shape: Shape,
}

impl PlacedItem {
    /// Absolute cells covered by this item.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.shape.cells_at(self.anchor).flatten()
    }
}

/// Outcome of [`Grid::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The item was on the grid and its cells are now free.
    Released { cells: usize },
    /// The item was not on the grid; nothing changed.
    NoOpIgnored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Row-major, `width * height` entries.
    cells: Vec<Option<ItemId>>,
    placements: HashMap<ItemId, PlacedItem>,
    revision: u64,
}

impl Grid {
    /// Create an empty grid. A zero dimension makes every placement out of bounds.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            placements: HashMap::new(),
            revision: 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Whether `cell` lies in `[0, width) × [0, height)`.
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// The item occupying `cell`, if any. Out-of-bounds cells are empty.
    pub fn item_at(&self, cell: Cell) -> Option<ItemId> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    /// Placement record of `item`.
    pub fn placement(&self, item: ItemId) -> Option<&PlacedItem> {
        self.placements.get(&item)
    }

    /// All placed items, in no particular order.
    pub fn placements(&self) -> impl Iterator<Item = &PlacedItem> {
        self.placements.values()
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Bumped on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `shape` could be placed at `anchor`, treating cells held by
    /// `excluding` as free. Never mutates.
    pub fn is_free(&self, anchor: Cell, shape: &Shape, excluding: Option<ItemId>) -> bool {
        validate(self, shape, anchor, excluding).is_valid()
    }

    /// Place `item` with `shape` at `anchor`.
    ///
    /// Cells already held by `item` itself count as free. If `item` is already
    /// on the grid it is relocated: the old footprint is cleared and the new
    /// one filled in the same step. On failure nothing changes.
    pub fn try_occupy(&mut self, anchor: Cell, shape: &Shape, item: ItemId) -> Result<(), GridError> {
        validate(self, shape, anchor, Some(item)).into_result()?;

        let targets: Vec<usize> = shape
            .cells_at(anchor)
            .flatten()
            .filter_map(|c| self.index(c))
            .collect();

        if let Some(old) = self.placements.remove(&item) {
            self.clear_cells(&old);
        }
        for i in targets {
            self.cells[i] = Some(item);
        }
        self.placements.insert(
            item,
            PlacedItem {
                item,
                anchor,
                shape: shape.clone(),
            },
        );
        self.revision += 1;

        debug!("Placed item {item} at {anchor} ({} cells)", shape.len());
        Ok(())
    }

    /// Remove `item` from the grid.
    pub fn release(&mut self, item: ItemId) -> Release {
        let Some(old) = self.placements.remove(&item) else {
            return Release::NoOpIgnored;
        };
        let cells = self.clear_cells(&old);
        self.revision += 1;

        debug!("Released item {item} from {} ({cells} cells)", old.anchor);
        Release::Released { cells }
    }

    fn clear_cells(&mut self, placed: &PlacedItem) -> usize {
        let mut cleared = 0;
        for cell in placed.cells() {
            if let Some(i) = self.index(cell) {
                if self.cells[i] == Some(placed.item) {
                    self.cells[i] = None;
                    cleared += 1;
                }
            }
        }
        cleared
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let in_x = cell.x >= 0 && cell.x < self.width as i32;
        let in_y = cell.y >= 0 && cell.y < self.height as i32;
        (in_x && in_y).then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Shape {
        Shape::new([Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)]).unwrap()
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_empty());
        assert_eq!(grid.occupied_cells(), 0);
        assert_eq!(grid.revision(), 0);
    }

    #[test]
    fn occupy_marks_every_cell() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::new(2, 1), &l_shape(), ItemId(7)).unwrap();

        for cell in [Cell::new(2, 1), Cell::new(3, 1), Cell::new(2, 2)] {
            assert_eq!(grid.item_at(cell), Some(ItemId(7)));
        }
        assert_eq!(grid.item_at(Cell::new(3, 2)), None);
        assert_eq!(grid.occupied_cells(), 3);
        assert_eq!(grid.placement(ItemId(7)).unwrap().anchor, Cell::new(2, 1));
    }

    #[test]
    fn overlapping_item_is_rejected() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::new(0, 0), &l_shape(), ItemId(1)).unwrap();

        let err = grid.try_occupy(Cell::new(1, 0), &l_shape(), ItemId(2)).unwrap_err();
        assert_eq!(
            err,
            GridError::Occupied {
                cell: Cell::new(1, 0),
                occupant: ItemId(1)
            }
        );
        assert!(grid.placement(ItemId(2)).is_none());
    }

    #[test]
    fn never_wraps_or_clamps() {
        let mut grid = Grid::new(3, 3);
        let bar = Shape::rect(2, 1).unwrap();
        assert!(matches!(
            grid.try_occupy(Cell::new(2, 0), &bar, ItemId(1)),
            Err(GridError::OutOfBounds { cell }) if cell == Cell::new(3, 0)
        ));
        assert!(matches!(
            grid.try_occupy(Cell::new(-1, 0), &bar, ItemId(1)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(grid.is_empty());
        assert_eq!(grid.revision(), 0);
    }

    #[test]
    fn zero_sized_grid_rejects_everything() {
        let mut grid = Grid::new(0, 4);
        assert!(!grid.contains(Cell::ORIGIN));
        assert!(grid
            .try_occupy(Cell::ORIGIN, &Shape::single(), ItemId(1))
            .is_err());
    }

    #[test]
    fn reoccupy_relocates() {
        let mut grid = Grid::new(5, 5);
        let square = Shape::rect(2, 2).unwrap();
        grid.try_occupy(Cell::new(0, 0), &square, ItemId(1)).unwrap();
        // overlaps its own old footprint at (1,1)
        grid.try_occupy(Cell::new(1, 1), &square, ItemId(1)).unwrap();

        assert_eq!(grid.item_at(Cell::new(0, 0)), None);
        assert_eq!(grid.item_at(Cell::new(1, 1)), Some(ItemId(1)));
        assert_eq!(grid.item_at(Cell::new(2, 2)), Some(ItemId(1)));
        assert_eq!(grid.occupied_cells(), 4);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn release_frees_cells() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::new(0, 0), &l_shape(), ItemId(1)).unwrap();

        assert_eq!(grid.release(ItemId(1)), Release::Released { cells: 3 });
        assert!(grid.is_free(Cell::new(0, 0), &l_shape(), None));
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn release_absent_is_noop() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.release(ItemId(9)), Release::NoOpIgnored);
        assert_eq!(grid.revision(), 0);
    }

    #[test]
    fn is_free_honours_exclusion() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::new(0, 0), &l_shape(), ItemId(1)).unwrap();

        assert!(!grid.is_free(Cell::new(0, 0), &l_shape(), None));
        assert!(!grid.is_free(Cell::new(0, 0), &l_shape(), Some(ItemId(2))));
        assert!(grid.is_free(Cell::new(0, 0), &l_shape(), Some(ItemId(1))));
    }

    #[test]
    fn revision_counts_mutations() {
        let mut grid = Grid::new(5, 5);
        grid.try_occupy(Cell::ORIGIN, &Shape::single(), ItemId(1)).unwrap();
        grid.try_occupy(Cell::new(1, 0), &Shape::single(), ItemId(1)).unwrap();
        let _ = grid.try_occupy(Cell::new(9, 9), &Shape::single(), ItemId(1));
        grid.release(ItemId(1));
        assert_eq!(grid.revision(), 3);
    }
}
