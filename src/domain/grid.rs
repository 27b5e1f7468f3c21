//! Grid geometry and cell calculations
//!
//! A grid splits a rectangular area into rows x cols cells. Base cell sizes
//! use integer floor division and the last row and column absorb whatever
//! remainder is left, so the cells tile the area exactly.
//!
//! Cell rectangles are local to the area: the top-left cell always starts at
//! (0, 0) regardless of where the area sits on the virtual desktop. The
//! companion tool places windows relative to the monitor index it is given.

use crate::domain::core::Rect;
use thiserror::Error;

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {rows}x{cols}")]
    InvalidDimensions { rows: u32, cols: u32 },
    #[error("cannot partition an empty area ({w}x{h})")]
    EmptyArea { w: i32, h: i32 },
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    InvalidCoordinates {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
}

/// Row/column position of a cell inside a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoords {
    pub row: u32,
    pub col: u32,
}

impl GridCoords {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// One cell of a monitor grid, in monitor-local DPI-normalized pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub monitor_index: usize,
    pub rect: Rect,
}

/// A rows x cols partition of a rectangular area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    area: Rect,
    base_cell_width: i32,
    base_cell_height: i32,
}

impl Grid {
    /// Creates a new grid covering `area`
    ///
    /// # Example
    /// ```rust
    /// use grid_stress::domain::{core::Rect, grid::Grid};
    ///
    /// let grid = Grid::new(2, 2, Rect::new(0, 0, 1000, 800)).unwrap();
    /// assert_eq!(grid.base_cell_size(), (500, 400));
    /// ```
    pub fn new(rows: u32, cols: u32, area: Rect) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        if area.is_empty() {
            return Err(GridError::EmptyArea {
                w: area.w,
                h: area.h,
            });
        }

        // rows/cols beyond i32::MAX would make every base cell zero wide anyway
        let cols_i = i32::try_from(cols).unwrap_or(i32::MAX);
        let rows_i = i32::try_from(rows).unwrap_or(i32::MAX);

        Ok(Self {
            rows,
            cols,
            area,
            base_cell_width: area.w / cols_i,
            base_cell_height: area.h / rows_i,
        })
    }

    /// Returns the grid dimensions as (rows, cols)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Returns the area this grid partitions
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Returns the floor-divided cell size as (width, height)
    pub fn base_cell_size(&self) -> (i32, i32) {
        (self.base_cell_width, self.base_cell_height)
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the local rectangle for a cell
    ///
    /// Cells in the last column (row) stretch to the right (bottom) edge of
    /// the area.
    pub fn cell_rect(&self, coords: GridCoords) -> Result<Rect, GridError> {
        if coords.row >= self.rows || coords.col >= self.cols {
            return Err(GridError::InvalidCoordinates {
                row: coords.row,
                col: coords.col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let x = coords.col as i32 * self.base_cell_width;
        let y = coords.row as i32 * self.base_cell_height;

        let w = if coords.col + 1 < self.cols {
            self.base_cell_width
        } else {
            self.area.w - x
        };
        let h = if coords.row + 1 < self.rows {
            self.base_cell_height
        } else {
            self.area.h - y
        };

        Ok(Rect::new(x, y, w, h))
    }

    /// Iterates over all cell rectangles in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Rect> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| self.cell_rect(GridCoords::new(row, col)).ok())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_tiles_exactly(grid: &Grid) {
        let area = grid.area();
        let (rows, cols) = grid.dimensions();
        let cells: Vec<Rect> = grid.cells().collect();
        assert_eq!(cells.len(), grid.len());

        for row in 0..rows as usize {
            let width: i32 = cells[row * cols as usize..(row + 1) * cols as usize]
                .iter()
                .map(|c| c.w)
                .sum();
            assert_eq!(width, area.w, "row {row} width");
        }

        for col in 0..cols as usize {
            let height: i32 = (0..rows as usize)
                .map(|row| cells[row * cols as usize + col].h)
                .sum();
            assert_eq!(height, area.h, "column {col} height");
        }

        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert!(a.intersection(b).is_none(), "{a:?} overlaps {b:?}");
            }
        }

        let covered: i64 = cells.iter().map(Rect::area).sum();
        assert_eq!(covered, area.area());
    }

    #[test]
    fn two_by_two_even_area() {
        let grid = Grid::new(2, 2, Rect::new(0, 0, 1000, 800)).unwrap();
        let cells: Vec<Rect> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                Rect::new(0, 0, 500, 400),
                Rect::new(500, 0, 500, 400),
                Rect::new(0, 400, 500, 400),
                Rect::new(500, 400, 500, 400),
            ]
        );
    }

    #[test]
    fn last_row_and_column_absorb_remainder() {
        let grid = Grid::new(3, 4, Rect::new(0, 0, 1923, 1042)).unwrap();
        assert_eq!(grid.base_cell_size(), (480, 347));

        let last = grid.cell_rect(GridCoords::new(2, 3)).unwrap();
        assert_eq!(last, Rect::new(1440, 694, 483, 348));

        let inner = grid.cell_rect(GridCoords::new(1, 1)).unwrap();
        assert_eq!(inner, Rect::new(480, 347, 480, 347));
    }

    #[test]
    fn cells_are_local_to_the_area() {
        let grid = Grid::new(2, 2, Rect::new(-1536, 40, 1536, 824)).unwrap();
        let first = grid.cells().next().unwrap();
        assert_eq!(first, Rect::new(0, 0, 768, 412));
    }

    #[test]
    fn tiling_holds_for_many_shapes() {
        let areas = [
            Rect::new(0, 0, 1000, 800),
            Rect::new(0, 0, 1920, 1040),
            Rect::new(1920, 0, 2561, 1399),
            Rect::new(0, 0, 7, 5),
            Rect::new(0, 0, 3, 2),
        ];
        for area in areas {
            for rows in 1..=6 {
                for cols in 1..=6 {
                    let grid = Grid::new(rows, cols, area).unwrap();
                    assert_tiles_exactly(&grid);
                }
            }
        }
    }

    #[test]
    fn rejects_zero_dimensions() {
        let area = Rect::new(0, 0, 100, 100);
        assert_eq!(
            Grid::new(0, 2, area),
            Err(GridError::InvalidDimensions { rows: 0, cols: 2 })
        );
        assert_eq!(
            Grid::new(3, 0, area),
            Err(GridError::InvalidDimensions { rows: 3, cols: 0 })
        );
    }

    #[test]
    fn rejects_empty_area() {
        let result = Grid::new(2, 2, Rect::new(0, 0, 0, 100));
        assert!(matches!(result, Err(GridError::EmptyArea { .. })));
    }

    #[test]
    fn cell_rect_invalid_coordinates() {
        let grid = Grid::new(3, 2, Rect::new(0, 0, 1920, 1080)).unwrap();
        assert!(matches!(
            grid.cell_rect(GridCoords::new(3, 0)),
            Err(GridError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            grid.cell_rect(GridCoords::new(0, 2)),
            Err(GridError::InvalidCoordinates { .. })
        ));
    }
}
