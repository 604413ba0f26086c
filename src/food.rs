use std::collections::HashSet;

use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::geometry::{Bounded, Rect};
use crate::snake::Position;

/// Random samples tried before falling back to scanning for free cells.
pub const MAX_RELOCATE_ATTEMPTS: usize = 256;

/// Playable area for food: a pixel-space board with a one-cell wall margin.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    pub width_px: i32,
    pub height_px: i32,
    pub cell_size: i32,
}

impl Board {
    /// Iterates over the top-left corners of every interior cell.
    pub fn interior(self) -> impl Iterator<Item = Position> {
        let Self {
            width_px,
            height_px,
            cell_size,
        } = self;
        let step = usize::try_from(cell_size).unwrap_or(1).max(1);

        (cell_size..height_px - cell_size)
            .step_by(step)
            .flat_map(move |y| {
                (cell_size..width_px - cell_size)
                    .step_by(step)
                    .map(move |x| Position::new(x, y))
            })
    }

    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Option<Position> {
        let columns = (self.width_px / self.cell_size) - 2;
        let rows = (self.height_px / self.cell_size) - 2;
        if columns <= 0 || rows <= 0 {
            return None;
        }

        let col = rng.gen_range(1..=columns);
        let row = rng.gen_range(1..=rows);
        Some(Position::new(col * self.cell_size, row * self.cell_size))
    }
}

/// Food relocation failures.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum FoodError {
    #[error("no free cell left on the board")]
    BoardFull,
}

/// The apple currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    position: Position,
    size: i32,
}

impl Bounded for Food {
    fn rect(&self) -> Rect {
        self.position.rect(self.size)
    }
}

impl Food {
    #[must_use]
    pub fn new(position: Position, size: i32) -> Self {
        Self { position, size }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the food to a random interior cell that overlaps nothing in `avoid`.
    ///
    /// Tries [`MAX_RELOCATE_ATTEMPTS`] random samples, then picks uniformly from
    /// the remaining free cells. Leaves the food in place and returns
    /// [`FoodError::BoardFull`] when no free cell exists.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        avoid: &[Position],
        board: Board,
    ) -> Result<Position, FoodError> {
        // Grid-aligned cells of equal size overlap exactly when they coincide.
        let occupied: HashSet<Position> = avoid.iter().copied().collect();
        let is_free = |candidate: Position| !occupied.contains(&candidate);

        for _ in 0..MAX_RELOCATE_ATTEMPTS {
            let Some(candidate) = board.sample(rng) else {
                return Err(FoodError::BoardFull);
            };
            if is_free(candidate) {
                self.position = candidate;
                return Ok(candidate);
            }
        }

        let free: Vec<Position> = board.interior().filter(|cell| is_free(*cell)).collect();
        debug!(
            "food sampling exhausted after {MAX_RELOCATE_ATTEMPTS} tries, {} free cells remain",
            free.len()
        );
        if free.is_empty() {
            return Err(FoodError::BoardFull);
        }

        let candidate = free[rng.gen_range(0..free.len())];
        self.position = candidate;
        Ok(candidate)
    }
}
