use crate::consts;
use thiserror::Error;

/// A position on the grid, in cells, relative to the top-left corner.
///
/// Coordinates are signed so that a head which has just left the board can
/// still be represented.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }
}

/// Dimensions of the playing field in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GridSize {
    width: u16,
    height: u16,
}

impl GridSize {
    /// Create a grid of `width` × `height` cells.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the grid cannot contain the initial snake.
    pub fn new(width: u16, height: u16) -> Result<GridSize, GridError> {
        let grid = GridSize { width, height };
        if consts::INITIAL_SNAKE.iter().all(|&c| grid.contains(c)) {
            Ok(grid)
        } else {
            Err(GridError::TooSmall { width, height })
        }
    }

    /// Derive the grid from a board measured in pixels, dividing by the size
    /// of a single cell.  Leftover pixels are dropped.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `cell_px` is zero, if the resulting grid does not fit
    /// in `u16`, or if it is too small for the initial snake.
    pub fn from_board(width_px: u32, height_px: u32, cell_px: u32) -> Result<GridSize, GridError> {
        if cell_px == 0 {
            return Err(GridError::ZeroCellSize);
        }
        let width = u16::try_from(width_px / cell_px).map_err(|_| GridError::TooLarge)?;
        let height = u16::try_from(height_px / cell_px).map_err(|_| GridError::TooLarge)?;
        GridSize::new(width, height)
    }

    pub fn width(self) -> u16 {
        self.width
    }

    pub fn height(self) -> u16 {
        self.height
    }

    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Is `cell` inside `[0, width) × [0, height)`?
    pub fn contains(self, cell: Cell) -> bool {
        (0..i32::from(self.width)).contains(&cell.x) && (0..i32::from(self.height)).contains(&cell.y)
    }

    /// Iterate over every cell of the grid in row-major order
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

impl Default for GridSize {
    fn default() -> GridSize {
        GridSize {
            width: 20,
            height: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    #[error("cell size must be nonzero")]
    ZeroCellSize,
    #[error("board is too large")]
    TooLarge,
    #[error("a {width}×{height} grid is too small for the starting snake")]
    TooSmall { width: u16, height: u16 },
}
