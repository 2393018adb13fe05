use std::fmt;
use std::time::Duration;

use Direction::*;

/// Number of cells along each axis of the board.
pub const CELL_COUNT: i32 = 25;

/// Terminal columns taken by one cell. Glyphs are about twice as tall as
/// they are wide, so two columns by one row is close to a square.
pub const CELL_WIDTH: u16 = 2;
pub const CELL_HEIGHT: u16 = 1;

/// Gap between the edge of the play surface and the grid.
pub const MARGIN_X: u16 = 2;
pub const MARGIN_Y: u16 = 2;

pub const BOARD_WIDTH: u16 = 2 * MARGIN_X + CELL_WIDTH * CELL_COUNT as u16;
pub const BOARD_HEIGHT: u16 = 2 * MARGIN_Y + CELL_HEIGHT * CELL_COUNT as u16;

pub const INITIAL_BODY: [Coords; 3] = [Coords::new(6, 9), Coords::new(5, 9), Coords::new(4, 9)];
pub const INITIAL_DIRECTION: Direction = Right;

/// Time between two logic ticks.
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(200);

/// Target duration of one rendered frame (60 fps).
pub const FRAME_DURATION: Duration = Duration::from_micros(16_667);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub const fn new(x: i32, y: i32) -> Self {
        Coords { x, y }
    }

    /// The neighbouring cell in `direction`. May leave the grid.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Coords::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..CELL_COUNT).contains(&self.x) && (0..CELL_COUNT).contains(&self.y)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Linear scan, no ordering or uniqueness assumed.
pub fn contains<'a, I>(pos: Coords, cells: I) -> bool
where
    I: IntoIterator<Item = &'a Coords>,
{
    cells.into_iter().any(|c| *c == pos)
}
