use crate::direction::Direction;
use crate::geometry::{overlaps, Bounded, Rect};

/// Board position in pixel units, always aligned to the cell grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one cell away in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * cell_size,
            y: self.y + dy * cell_size,
        }
    }

    /// Converts to grid coordinates.
    #[must_use]
    pub fn cell(self, cell_size: i32) -> Cell {
        Cell {
            col: self.x.div_euclid(cell_size),
            row: self.y.div_euclid(cell_size),
        }
    }

    /// Rectangle covering the cell whose top-left corner is this position.
    #[must_use]
    pub fn rect(self, cell_size: i32) -> Rect {
        Rect::cell(self.x, self.y, cell_size)
    }
}

/// Grid coordinates (column, row) of one board cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Top-left pixel position of this cell.
    #[must_use]
    pub fn position(self, cell_size: i32) -> Position {
        Position {
            x: self.col * cell_size,
            y: self.row * cell_size,
        }
    }
}

/// One body section of the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub position: Position,
    pub is_head: bool,
    size: i32,
}

impl Bounded for Segment {
    fn rect(&self) -> Rect {
        self.position.rect(self.size)
    }
}

/// Mutable snake state: body from head to tail, facing, and queued growth.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: Vec<Segment>,
    direction: Direction,
    pending_growth: u32,
    cell_size: i32,
}

impl Snake {
    /// Creates a straight snake of `length` segments with its tail trailing
    /// away from `direction`.
    #[must_use]
    pub fn new(head: Position, length: usize, direction: Direction, cell_size: i32) -> Self {
        let length = length.max(1);
        let mut positions = Vec::with_capacity(length);
        let mut position = head;
        for _ in 0..length {
            positions.push(position);
            position = position.stepped(direction.opposite(), cell_size);
        }

        Self::from_positions(positions, direction, cell_size)
    }

    /// Creates a snake from explicit body positions (first is head).
    ///
    /// # Panics
    ///
    /// Panics when `positions` is empty.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>, direction: Direction, cell_size: i32) -> Self {
        assert!(!positions.is_empty(), "snake needs at least one segment");

        let segments = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| Segment {
                position,
                is_head: index == 0,
                size: cell_size,
            })
            .collect();

        Self {
            segments,
            direction,
            pending_growth: 0,
            cell_size,
        }
    }

    /// Queues `n` more segments, added one per movement step.
    pub fn grow(&mut self, n: u32) {
        self.pending_growth = self.pending_growth.saturating_add(n);
    }

    /// Moves the snake one cell in `direction`.
    ///
    /// Every trailing segment takes the previous position of the segment ahead
    /// of it. One pending growth, if any, appends a segment at the old tail.
    pub fn advance(&mut self, direction: Direction) {
        self.direction = direction;

        let previous: Vec<Position> = self.positions().collect();
        let new_head = previous[0].stepped(direction, self.cell_size);

        for (index, segment) in self.segments.iter_mut().enumerate() {
            segment.position = if index == 0 {
                new_head
            } else {
                previous[index - 1]
            };
        }

        if self.pending_growth > 0 {
            let old_tail = previous[previous.len() - 1];
            self.segments.push(Segment {
                position: old_tail,
                is_head: false,
                size: self.cell_size,
            });
            self.pending_growth -= 1;
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head_position(&self) -> Position {
        self.head().position
    }

    fn head(&self) -> &Segment {
        let head = self
            .segments
            .first()
            .expect("snake body must always contain at least one segment");
        debug_assert!(head.is_head);
        head
    }

    /// Returns true if any non-head segment overlaps the head.
    #[must_use]
    pub fn self_collision(&self) -> bool {
        let head = self.head();
        self.segments
            .iter()
            .skip(1)
            .any(|segment| overlaps(segment, head))
    }

    /// Returns true if any segment overlaps the cell at `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        let probe = position.rect(self.cell_size);
        self.segments.iter().any(|segment| overlaps(segment, &probe))
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a live snake; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    #[must_use]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Iterates over segment positions from head to tail.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|segment| segment.position)
    }
}
