use log::info;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::food::Food;
use crate::grid::{contains, Coords, Direction, CELL_COUNT, INITIAL_BODY};
use crate::snake::{Moved, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Itself,
}

/// What a logic tick did, so the frontend knows which sound to play.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Paused,
    Moved,
    Ate { food: Coords },
    GameOver(Collision),
}

pub struct Game<R = ThreadRng> {
    rng: R,
    snake: Snake,
    food: Food,
    paused: bool,
    input_locked: bool,
}

impl Game<ThreadRng> {
    pub fn new() -> Self {
        Game::new_with_rng(rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    pub fn new_with_rng(mut rng: R) -> Self {
        let snake = Snake::new();
        let food = Food::new(snake.body(), &mut rng);
        Game { rng, snake, food, paused: true, input_locked: false }
    }

    /// Direction change from the input layer. Refuses a 180° turn and any
    /// second change before the next tick. An accepted change unpauses.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.input_locked || direction == self.snake.get_direction().opposite() {
            return false;
        }

        self.snake.set_direction(direction);
        self.paused = false;
        self.input_locked = true;
        true
    }

    pub fn update(&mut self) -> TickOutcome {
        self.input_locked = false;
        if self.paused {
            return TickOutcome::Paused;
        }

        let moved = self.snake.move_step();

        let mut outcome = TickOutcome::Moved;
        if let Some(food) = self.check_food(moved) {
            outcome = TickOutcome::Ate { food };
        }
        if let Some(collision) = self.check_edges().or_else(|| self.check_body()) {
            self.game_over(collision);
            outcome = TickOutcome::GameOver(collision);
        }
        outcome
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> usize {
        self.snake.len() - INITIAL_BODY.len()
    }

    /// Grows within the eating tick, so the wall and body checks see the
    /// grown body.
    fn check_food(&mut self, moved: Moved) -> Option<Coords> {
        let eaten = self.food.position();
        if moved.new_head != eaten {
            return None;
        }

        info!("Food found at {}", eaten);
        self.snake.grow(moved.old_tail);
        let next = self.food.reposition(self.snake.body(), &mut self.rng);
        info!("New food created at {}", next);
        Some(eaten)
    }

    fn check_edges(&self) -> Option<Collision> {
        let head = self.snake.head();
        if head.x == -1 || head.x == CELL_COUNT || head.y == -1 || head.y == CELL_COUNT {
            Some(Collision::Wall)
        } else {
            None
        }
    }

    fn check_body(&self) -> Option<Collision> {
        let head = self.snake.head();
        if contains(head, self.snake.body().iter().skip(1)) {
            Some(Collision::Itself)
        } else {
            None
        }
    }

    fn game_over(&mut self, collision: Collision) {
        match collision {
            Collision::Wall => info!("Game over due to snake's collision with walls, score {}", self.score()),
            Collision::Itself => info!("Game over due to snake's collision with itself, score {}", self.score()),
        }

        self.snake.reset();
        self.food.reposition(self.snake.body(), &mut self.rng);
        self.paused = true;
    }
}
