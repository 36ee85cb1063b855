//! Item footprints.
//!
//! A [`Shape`] is the set of cells an item covers relative to its anchor.
//! Offsets are normalized on construction so that the smallest x and the
//! smallest y are both zero, then sorted row-major (y, then x) with
//! duplicates removed. Two shapes built from the same set of cells, in any
//! order or translation, compare equal.
//!
//! A bounding box may span at most `u16::MAX` cells on either axis, the
//! same range as a [`Grid`](crate::Grid) dimension.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::ShapeError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Shape {
    offsets: Vec<Cell>,
}

impl Shape {
    /// Build a shape from arbitrary offsets.
    pub fn new(offsets: impl IntoIterator<Item = Cell>) -> Result<Self, ShapeError> {
        let offsets: Vec<Cell> = offsets.into_iter().collect();
        if offsets.is_empty() {
            return Err(ShapeError::Empty);
        }
        Ok(Self {
            offsets: normalize(offsets)?,
        })
    }

    /// The 1×1 footprint.
    pub fn single() -> Self {
        Self {
            offsets: vec![Cell::ORIGIN],
        }
    }

    /// A filled `width` × `height` rectangle.
    pub fn rect(width: u16, height: u16) -> Result<Self, ShapeError> {
        let cells = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Cell::new(x, y)));
        Self::new(cells)
    }

    /// Normalized offsets in row-major order.
    pub fn offsets(&self) -> &[Cell] {
        &self.offsets
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false: construction rejects empty shapes.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Bounding box width.
    pub fn width(&self) -> u16 {
        self.offsets.iter().map(|c| c.x).max().map_or(0, |m| m as u16 + 1)
    }

    /// Bounding box height.
    pub fn height(&self) -> u16 {
        self.offsets.iter().map(|c| c.y).max().map_or(0, |m| m as u16 + 1)
    }

    /// Absolute cells covered when anchored at `anchor`.
    ///
    /// Yields `None` for a cell whose coordinates would overflow.
    pub fn cells_at(&self, anchor: Cell) -> impl Iterator<Item = Option<Cell>> + '_ {
        self.offsets.iter().map(move |&o| anchor.checked_offset(o))
    }

    /// Quarter turn clockwise (x right, y down).
    pub fn rotated_cw(&self) -> Self {
        // (x, y) -> (-y, x), shifted right by the old height
        let max_y = self.offsets.iter().map(|c| c.y).max().unwrap_or(0);
        let mut offsets: Vec<Cell> = self
            .offsets
            .iter()
            .map(|c| Cell::new(max_y - c.y, c.x))
            .collect();
        sort_row_major(&mut offsets);
        Self { offsets }
    }
}

/// Shift so the component-wise minimum is (0, 0), sort row-major, dedup.
fn normalize(mut offsets: Vec<Cell>) -> Result<Vec<Cell>, ShapeError> {
    let min_x = span_start(offsets.iter().map(|c| c.x))?;
    let min_y = span_start(offsets.iter().map(|c| c.y))?;

    for c in &mut offsets {
        c.x -= min_x;
        c.y -= min_y;
    }
    sort_row_major(&mut offsets);
    Ok(offsets)
}

/// Minimum of one axis, or `TooLarge` if the axis spans more than `u16::MAX` cells.
fn span_start(values: impl Iterator<Item = i32> + Clone) -> Result<i32, ShapeError> {
    let min = values.clone().min().unwrap_or(0);
    let max = values.max().unwrap_or(0);
    let span = i64::from(max) - i64::from(min) + 1;
    if span > i64::from(u16::MAX) {
        return Err(ShapeError::TooLarge { span });
    }
    Ok(min)
}

fn sort_row_major(offsets: &mut Vec<Cell>) {
    offsets.sort_by_key(|c| (c.y, c.x));
    offsets.dedup();
}

impl TryFrom<Vec<Cell>> for Shape {
    type Error = ShapeError;

    fn try_from(offsets: Vec<Cell>) -> Result<Self, Self::Error> {
        Self::new(offsets)
    }
}

impl From<Shape> for Vec<Cell> {
    fn from(shape: Shape) -> Self {
        shape.offsets
    }
}
