use std::collections::HashSet;

use crate::snake::Cell;

/// Answers whether a grid cell is solid.
pub trait WallQuery {
    fn is_wall(&self, cell: Cell) -> bool;
}

/// Static wall layout for one board.
///
/// Cells outside the board are always reported as walls, so a head that
/// leaves the board counts as a crash even on layouts without a border.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Level {
    width: u16,
    height: u16,
    walls: HashSet<Cell>,
}

impl Level {
    /// A board enclosed by a one-cell wall on every edge.
    #[must_use]
    pub fn bordered(width: u16, height: u16) -> Self {
        let (w, h) = (i32::from(width), i32::from(height));
        let border = (0..w)
            .flat_map(|col| [Cell::new(col, 0), Cell::new(col, h - 1)])
            .chain((0..h).flat_map(|row| [Cell::new(0, row), Cell::new(w - 1, row)]));

        Self::with_walls(width, height, border)
    }

    /// A board with exactly the given wall cells. Cells outside the board are ignored.
    #[must_use]
    pub fn with_walls(width: u16, height: u16, walls: impl IntoIterator<Item = Cell>) -> Self {
        let mut level = Self {
            width,
            height,
            walls: HashSet::new(),
        };
        level.walls = walls
            .into_iter()
            .filter(|cell| level.contains(*cell))
            .collect();
        level
    }

    /// Returns true when `cell` lies on the board.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && cell.col < i32::from(self.width)
            && cell.row < i32::from(self.height)
    }

    /// Iterates over all wall cells on the board.
    pub fn wall_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.walls.iter().copied()
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }
}

impl WallQuery for Level {
    fn is_wall(&self, cell: Cell) -> bool {
        !self.contains(cell) || self.walls.contains(&cell)
    }
}
