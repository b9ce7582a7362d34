//! Crossterm terminal backend
//!
//! The display keeps a `ScreenBuffer` and repaints only the cells each call
//! touches. Display and keyboard share stdout: the cursor is left where the
//! last print ended so line entry echoes after the "> " prompt.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveLeft, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use glam::IVec2;

use super::screen::{Dirty, ScreenBuffer};
use super::{Display, InputSource};
use crate::consts::{CHAR_HEIGHT, CHAR_WIDTH};
use crate::settings::Settings;

/// How long one keyboard poll waits before reporting "no key"
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Exit status after Ctrl-C/Esc
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Switch the terminal into raw mode on the alternate screen
pub fn enter() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let (cols, rows) = terminal::size()?;
    if cols < CHAR_WIDTH || rows < CHAR_HEIGHT {
        log::warn!(
            "Terminal is {}x{}, the game needs at least {}x{}",
            cols,
            rows,
            CHAR_WIDTH,
            CHAR_HEIGHT
        );
    }
    Ok(())
}

/// Undo `enter`
pub fn leave() -> io::Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

fn quit() -> ! {
    if let Err(e) = leave() {
        log::error!("Failed to restore terminal: {}", e);
    }
    log::info!("Interrupted, quitting");
    std::process::exit(INTERRUPTED_EXIT_CODE);
}

/// Display drawing block graphics with crossterm
pub struct TerminalDisplay {
    out: Stdout,
    screen: ScreenBuffer,
    settings: Settings,
    /// Output suspended; repainted in full when fast mode ends
    fast: bool,
}

impl TerminalDisplay {
    pub fn new(settings: Settings) -> Self {
        Self {
            out: io::stdout(),
            screen: ScreenBuffer::new(),
            settings,
            fast: false,
        }
    }

    fn draw(&mut self, dirty: Option<Dirty>) {
        let Some(dirty) = dirty else {
            return;
        };
        if self.fast {
            return;
        }
        if let Err(e) = self.queue_cells(dirty) {
            log::warn!("Terminal write failed: {}", e);
        }
    }

    fn queue_cells(&mut self, dirty: Dirty) -> io::Result<()> {
        for row in dirty.rows.0..=dirty.rows.1 {
            queue!(self.out, MoveTo(dirty.cols.0, row))?;
            for col in dirty.cols.0..=dirty.cols.1 {
                let glyph = self.screen.glyph(row, col);
                queue!(self.out, Print(glyph))?;
            }
        }
        Ok(())
    }

    fn redraw_all(&mut self) {
        self.draw(Some(Dirty {
            rows: (0, CHAR_HEIGHT - 1),
            cols: (0, CHAR_WIDTH - 1),
        }));
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            log::warn!("Terminal flush failed: {}", e);
        }
    }

    fn sleep(&self, millis: u64) {
        if millis > 0 {
            std::thread::sleep(Duration::from_millis(millis));
        }
    }
}

impl Display for TerminalDisplay {
    fn clear(&mut self) {
        self.screen.clear();
        if !self.fast {
            if let Err(e) = queue!(self.out, Clear(ClearType::All)) {
                log::warn!("Terminal clear failed: {}", e);
            }
        }
    }

    fn print_at(&mut self, row: u16, col: u16, text: &str) {
        let dirty = self.screen.print(row, col, text);
        self.draw(dirty);
    }

    fn plot(&mut self, pos: IVec2) {
        let dirty = self.screen.plot(pos);
        self.draw(dirty);
    }

    fn unplot(&mut self, pos: IVec2) {
        let dirty = self.screen.unplot(pos);
        self.draw(dirty);
    }

    fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let dirty = self.screen.clear_region(x, y, width, height);
        self.draw(dirty);
    }

    fn scroll_down(&mut self) {
        self.screen.scroll_down();
        self.redraw_all();
    }

    fn set_fast_mode(&mut self, fast: bool) {
        let resuming = self.fast && !fast;
        self.fast = fast;
        if resuming {
            self.redraw_all();
            self.flush();
        }
    }

    fn pause(&mut self, millis: u64) {
        self.flush();
        if !self.fast {
            self.sleep(self.settings.scaled_millis(millis));
        }
    }

    fn end_frame(&mut self) {
        self.flush();
        if !self.fast {
            self.sleep(self.settings.frame_millis());
        }
    }
}

/// Keyboard read through crossterm events
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    /// Next key press, or `None` after waiting `timeout`
    fn next_key(&mut self, timeout: Option<Duration>) -> Option<KeyEvent> {
        if let Err(e) = io::stdout().flush() {
            log::warn!("Terminal flush failed: {}", e);
        }
        loop {
            if let Some(timeout) = timeout {
                match event::poll(timeout) {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(e) => {
                        log::warn!("Keyboard poll failed: {}", e);
                        return None;
                    }
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if is_interrupt(&key) {
                        quit();
                    }
                    return Some(key);
                }
                Ok(_) => {
                    if timeout.is_some() {
                        return None;
                    }
                }
                Err(e) => {
                    log::warn!("Keyboard read failed: {}", e);
                    return None;
                }
            }
        }
    }

    fn echo(&mut self, text: &str, erase: bool) {
        let mut out = io::stdout();
        let result = if erase {
            queue!(out, MoveLeft(1), Print(' '), MoveLeft(1))
        } else {
            queue!(out, Print(text))
        };
        if let Err(e) = result.and_then(|_| out.flush()) {
            log::warn!("Terminal echo failed: {}", e);
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

impl InputSource for TerminalInput {
    fn poll_key(&mut self) -> Option<char> {
        match self.next_key(Some(POLL_INTERVAL))?.code {
            KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
            KeyCode::Enter => Some('\n'),
            _ => None,
        }
    }

    fn read_line(&mut self, max_len: usize) -> String {
        let mut line = String::new();
        if let Err(e) = execute!(io::stdout(), Show) {
            log::warn!("Could not show cursor: {}", e);
        }

        loop {
            let Some(key) = self.next_key(None) else {
                break;
            };
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        self.echo("", true);
                    }
                }
                KeyCode::Char(c) if line.chars().count() < max_len => {
                    line.push(c);
                    self.echo(c.encode_utf8(&mut [0; 4]), false);
                }
                _ => {}
            }
        }

        if let Err(e) = execute!(io::stdout(), Hide) {
            log::warn!("Could not hide cursor: {}", e);
        }
        line
    }
}
