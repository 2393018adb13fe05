use std::thread::sleep;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::error;

use crate::game::{Game, TickOutcome};
use crate::grid::{
    Direction::{self, *},
    BOARD_HEIGHT, BOARD_WIDTH, CELL_COUNT, CELL_HEIGHT, CELL_WIDTH, FRAME_DURATION, MARGIN_X, MARGIN_Y,
    UPDATE_INTERVAL,
};
use crate::term::{Sound, TermManager};
use crate::timer::Interval;

const TITLE: &str = "RETRO SNAKE";
const START_HINT: &str = "Press an arrow key or WASD to start";

const SNAKE_GLYPH: &str = "██";
const FOOD_GLYPH: &str = "()";

/// Owns everything with a process lifetime: the terminal, the game and the
/// logic clock.
pub struct App {
    term: TermManager,
    game: Game,
    ticker: Interval,
}

impl App {
    pub fn new() -> Result<Self> {
        let term = TermManager::new()?;
        Ok(App { term, game: Game::new(), ticker: Interval::new(UPDATE_INTERVAL, Instant::now()) })
    }

    /// Runs until the player closes the game. The terminal is restored even
    /// if the loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.game_loop();

        if let Err(err) = self.term.restore() {
            error!("Failed to restore terminal: {:#}", err);
        }

        result
    }

    fn game_loop(&mut self) -> Result<()> {
        loop {
            let frame_start = Instant::now();

            if self.handle_input()? {
                return Ok(());
            }

            if self.ticker.ready(Instant::now()) {
                self.tick()?;
            }

            self.draw()?;

            if let Some(rest) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
                sleep(rest);
            }
        }
    }

    /// Returns true when the player asked to quit.
    fn handle_input(&mut self) -> Result<bool> {
        for key_ev in self.term.read_key_events_queue()? {
            if is_close(&key_ev) {
                return Ok(true);
            }
            if let Some(dir) = direction_for(key_ev.code) {
                // The game's latch drops anything after the first accepted turn.
                self.game.steer(dir);
            }
        }

        Ok(false)
    }

    fn tick(&mut self) -> Result<()> {
        match self.game.update() {
            TickOutcome::Ate { .. } => self.term.play(Sound::Eat),
            TickOutcome::GameOver(_) => self.term.play(Sound::Collision),
            TickOutcome::Moved | TickOutcome::Paused => Ok(()),
        }
    }

    fn draw(&mut self) -> Result<()> {
        let grid_width = CELL_WIDTH * CELL_COUNT as u16;
        let grid_height = CELL_HEIGHT * CELL_COUNT as u16;
        let bottom = BOARD_HEIGHT - 1;

        self.term.clear_background();
        self.term.draw_rect_lines((MARGIN_X - 1, MARGIN_Y - 1), grid_width + 2, grid_height + 2);
        self.term.draw_text((MARGIN_X - 1, 0), TITLE);
        self.term.draw_text((MARGIN_X - 1, bottom), &format!("SCORE: {}", self.game.score()));
        if self.game.is_paused() {
            let hint_x = BOARD_WIDTH - MARGIN_X + 1 - START_HINT.chars().count() as u16;
            self.term.draw_text((hint_x, bottom), START_HINT);
        }

        self.term.draw_cell(self.game.food().position(), FOOD_GLYPH);
        for segment in self.game.snake().body() {
            self.term.draw_cell(*segment, SNAKE_GLYPH);
        }

        self.term.end_frame()
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Right),
        _ => None,
    }
}

fn is_close(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
            | KeyEvent { code: KeyCode::Esc, .. }
            | KeyEvent { code: KeyCode::Char('q'), .. }
    )
}
