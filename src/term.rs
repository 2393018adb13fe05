use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::grid::{Coords, BOARD_HEIGHT, BOARD_WIDTH, CELL_HEIGHT, CELL_WIDTH, MARGIN_X, MARGIN_Y};

pub type TermPos = (u16, u16);

const BACKGROUND: Color = Color::Rgb { r: 173, g: 204, b: 96 };
const FOREGROUND: Color = Color::Rgb { r: 43, g: 51, b: 24 };

const BELL: char = '\x07';

const WINDOW_TITLE: &str = "Retro Snake Game";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sound {
    Eat,
    Collision,
}

impl Sound {
    /// The terminal has a single beep, so clips differ only in how many times it rings.
    fn rings(self) -> usize {
        match self {
            Sound::Eat => 1,
            Sound::Collision => 2,
        }
    }
}

/// Off-screen character grid the size of the board.
#[derive(Clone)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl Frame {
    pub fn new(width: u16, height: u16, fill: char) -> Self {
        Frame { width, height, cells: vec![fill; width as usize * height as usize] }
    }

    pub fn fill(&mut self, ch: char) {
        for cell in self.cells.iter_mut() {
            *cell = ch;
        }
    }

    /// Writes outside the frame are dropped.
    pub fn put(&mut self, pos: TermPos, ch: char) {
        if pos.0 < self.width && pos.1 < self.height {
            self.cells[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        }
    }

    pub fn text(&mut self, pos: TermPos, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put((pos.0.saturating_add(i as u16), pos.1), ch);
        }
    }

    /// Cells of `self` that differ from `shown`, which must have the same size.
    pub fn changes<'a>(&'a self, shown: &'a Frame) -> impl Iterator<Item = (TermPos, char)> + 'a {
        let width = self.width as usize;
        self.cells
            .iter()
            .zip(shown.cells.iter())
            .enumerate()
            .filter(|(_, (new, old))| new != old)
            .map(move |(i, (new, _))| (((i % width) as u16, (i / width) as u16), *new))
    }
}

pub struct TermManager {
    origin: TermPos,
    stdout: Stdout,
    screen: Frame,
    frame: Frame,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        if width < BOARD_WIDTH || height < BOARD_HEIGHT {
            bail!(
                "Terminal is {}x{}, the board needs at least {}x{}",
                width,
                height,
                BOARD_WIDTH,
                BOARD_HEIGHT
            );
        }

        let origin = centered(width, height);
        // The NUL fill differs from every drawable glyph, so the first frame is painted in full.
        let screen = Frame::new(BOARD_WIDTH, BOARD_HEIGHT, '\0');
        let frame = Frame::new(BOARD_WIDTH, BOARD_HEIGHT, ' ');
        Ok(TermManager { origin, stdout: stdout(), screen, frame })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, terminal::SetTitle(WINDOW_TITLE))
            .context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            SetBackgroundColor(BACKGROUND),
            SetForegroundColor(FOREGROUND),
            terminal::Clear(ClearType::All)
        )
        .context("Error preparing the screen")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking)
            .context("Error resetting cursor and colors")?;
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen")?;
        Ok(())
    }

    /// Drains pending key presses without blocking. A resize re-centres the
    /// board and repaints it on the next frame.
    pub fn read_key_events_queue(&mut self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).context("Error polling input")? {
            match read().context("Error reading input")? {
                Event::Key(ev) => events.push(ev),
                Event::Resize(width, height) => self.resize(width, height)?,
                _ => {}
            }
        }

        Ok(events)
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.origin = centered(width, height);
        self.screen.fill('\0');
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing after resize")?;
        Ok(())
    }

    pub fn clear_background(&mut self) {
        self.frame.fill(' ');
    }

    pub fn draw_text(&mut self, pos: TermPos, text: &str) {
        self.frame.text(pos, text);
    }

    pub fn draw_rect_lines(&mut self, top_left: TermPos, width: u16, height: u16) {
        let (x0, y0) = top_left;
        let (x1, y1) = (x0 + width - 1, y0 + height - 1);

        for x in x0 + 1..x1 {
            self.frame.put((x, y0), '─');
            self.frame.put((x, y1), '─');
        }
        for y in y0 + 1..y1 {
            self.frame.put((x0, y), '│');
            self.frame.put((x1, y), '│');
        }

        self.frame.put((x0, y0), '┌');
        self.frame.put((x1, y0), '┐');
        self.frame.put((x0, y1), '└');
        self.frame.put((x1, y1), '┘');
    }

    /// Fills one grid cell with `glyph`, one char per terminal column.
    pub fn draw_cell(&mut self, cell: Coords, glyph: &str) {
        if !cell.in_bounds() {
            return;
        }

        let pos = (MARGIN_X + cell.x as u16 * CELL_WIDTH, MARGIN_Y + cell.y as u16 * CELL_HEIGHT);
        for row in 0..CELL_HEIGHT {
            self.frame.text((pos.0, pos.1 + row), glyph);
        }
    }

    pub fn play(&mut self, sound: Sound) -> Result<()> {
        for _ in 0..sound.rings() {
            queue!(self.stdout, Print(BELL)).context("Error playing sound")?;
        }
        Ok(())
    }

    /// Writes the cells that changed since the last frame and flushes.
    pub fn end_frame(&mut self) -> Result<()> {
        let (ox, oy) = self.origin;
        let stdout = &mut self.stdout;
        for ((x, y), ch) in self.frame.changes(&self.screen) {
            queue!(stdout, cursor::MoveTo(ox + x, oy + y), Print(ch)).context("Error drawing frame")?;
        }

        self.screen.clone_from(&self.frame);
        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

/// Top-left corner that centres the board; pinned to the corner when the
/// terminal is too small.
fn centered(width: u16, height: u16) -> TermPos {
    (width.saturating_sub(BOARD_WIDTH) / 2, height.saturating_sub(BOARD_HEIGHT) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_frame_differs_everywhere_from_nul_screen() {
        let screen = Frame::new(4, 3, '\0');
        let frame = Frame::new(4, 3, ' ');
        assert_eq!(frame.changes(&screen).count(), 12);
    }

    #[test]
    fn changes_report_only_touched_cells() {
        let screen = Frame::new(5, 2, ' ');
        let mut frame = screen.clone();
        frame.put((1, 0), 'a');
        frame.put((4, 1), 'b');
        frame.put((2, 1), ' ');

        let changed: Vec<_> = frame.changes(&screen).collect();
        assert_eq!(changed, vec![((1, 0), 'a'), ((4, 1), 'b')]);
    }

    #[test]
    fn writes_outside_the_frame_are_dropped() {
        let mut frame = Frame::new(3, 3, ' ');
        frame.put((3, 0), 'x');
        frame.put((0, 3), 'x');
        frame.text((1, 1), "abc");

        assert_eq!(frame.cells[4], 'a');
        assert_eq!(frame.cells[5], 'b');
        assert!(frame.cells.iter().all(|&c| c != 'x' && c != 'c'));
    }

    #[test]
    fn invalidated_screen_repaints_unchanged_cells() {
        let mut frame = Frame::new(4, 2, ' ');
        frame.text((0, 0), "ab");
        let mut screen = frame.clone();
        assert_eq!(frame.changes(&screen).count(), 0);

        screen.fill('\0');
        assert_eq!(frame.changes(&screen).count(), 8);
    }

    #[test]
    fn board_is_centred_in_the_terminal() {
        assert_eq!(centered(BOARD_WIDTH, BOARD_HEIGHT), (0, 0));
        assert_eq!(centered(BOARD_WIDTH + 20, BOARD_HEIGHT + 7), (10, 3));
        assert_eq!(centered(10, 10), (0, 0));
    }

    #[test]
    fn fill_resets_every_cell() {
        let mut frame = Frame::new(2, 2, 'z');
        frame.fill(' ');
        assert!(frame.cells.iter().all(|&c| c == ' '));
    }

    #[test]
    fn collision_rings_louder_than_eating() {
        assert!(Sound::Collision.rings() > Sound::Eat.rings());
    }
}
