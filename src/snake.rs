use std::collections::VecDeque;

use crate::grid::{Coords, Direction, INITIAL_BODY, INITIAL_DIRECTION};

/// Cells touched by one step, so a caller can undo the tail removal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Moved {
    pub new_head: Coords,
    pub old_tail: Coords,
}

pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
}

impl Snake {
    pub fn new() -> Self {
        Snake::with_body(INITIAL_BODY.iter().copied(), INITIAL_DIRECTION)
    }

    /// Builds a snake from an explicit body, head first.
    pub fn with_body<I>(body: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = Coords>,
    {
        Snake { body: body.into_iter().collect(), direction }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Advances one cell: the head is pushed and the tail dropped.
    pub fn move_step(&mut self) -> Moved {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        let old_tail = self.body.pop_back().unwrap_or(new_head);

        Moved { new_head, old_tail }
    }

    /// No reversal check here; callers gate the input.
    pub fn set_direction(&mut self, new_direction: Direction) {
        self.direction = new_direction;
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Puts back the tail dropped by the last move, making this move a growth.
    pub fn grow(&mut self, old_tail: Coords) {
        self.body.push_back(old_tail);
    }

    pub fn reset(&mut self) {
        self.body.clear();
        self.body.extend(INITIAL_BODY.iter().copied());
        self.direction = INITIAL_DIRECTION;
    }
}
