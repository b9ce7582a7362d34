//! Headless collaborators
//!
//! A display that records every call, scripted keyboard input and a printer
//! that keeps its lines. Used by the tests and for running rounds without a
//! terminal.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::IVec2;

use super::screen::ScreenBuffer;
use super::{Display, InputSource, Printer};

/// One recorded display call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Print { row: u16, col: u16, text: String },
    Plot(IVec2),
    Unplot(IVec2),
    ClearRegion { x: i32, y: i32, width: i32, height: i32 },
    ScrollDown,
    FastMode(bool),
    Pause(u64),
    EndFrame,
}

/// Display that keeps a screen copy and a log of calls
#[derive(Debug, Clone, Default)]
pub struct HeadlessDisplay {
    screen: ScreenBuffer,
    ops: Vec<DisplayOp>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far
    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    /// Current contents of a text row
    pub fn text_at(&self, row: u16) -> String {
        self.screen.row_text(row)
    }

    pub fn is_plotted(&self, pos: IVec2) -> bool {
        self.screen.is_plotted(pos)
    }

    /// Whether any print call contained `needle`
    pub fn printed(&self, needle: &str) -> bool {
        self.ops.iter().any(|op| match op {
            DisplayOp::Print { text, .. } => text.contains(needle),
            _ => false,
        })
    }

    /// Sum of all pauses, in milliseconds
    pub fn total_pause(&self) -> u64 {
        self.ops
            .iter()
            .map(|op| match op {
                DisplayOp::Pause(ms) => *ms,
                _ => 0,
            })
            .sum()
    }
}

impl Display for HeadlessDisplay {
    fn clear(&mut self) {
        self.screen.clear();
        self.ops.push(DisplayOp::Clear);
    }

    fn print_at(&mut self, row: u16, col: u16, text: &str) {
        self.screen.print(row, col, text);
        self.ops.push(DisplayOp::Print {
            row,
            col,
            text: text.to_string(),
        });
    }

    fn plot(&mut self, pos: IVec2) {
        self.screen.plot(pos);
        self.ops.push(DisplayOp::Plot(pos));
    }

    fn unplot(&mut self, pos: IVec2) {
        self.screen.unplot(pos);
        self.ops.push(DisplayOp::Unplot(pos));
    }

    fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.screen.clear_region(x, y, width, height);
        self.ops.push(DisplayOp::ClearRegion {
            x,
            y,
            width,
            height,
        });
    }

    fn scroll_down(&mut self) {
        self.screen.scroll_down();
        self.ops.push(DisplayOp::ScrollDown);
    }

    fn set_fast_mode(&mut self, fast: bool) {
        self.ops.push(DisplayOp::FastMode(fast));
    }

    fn pause(&mut self, millis: u64) {
        self.ops.push(DisplayOp::Pause(millis));
    }

    fn end_frame(&mut self) {
        self.ops.push(DisplayOp::EndFrame);
    }
}

/// One scripted keyboard event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    Key(char),
    /// A poll that finds no key pressed
    Idle,
    Line(String),
}

/// Keyboard that replays a script.
///
/// Running off the end of the script, or asking for a key when a line is
/// next (or the other way round), panics with the position in the script so
/// a broken test fails instead of hanging.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<Scripted>,
    consumed: usize,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: char) -> Self {
        self.script.push_back(Scripted::Key(key));
        self
    }

    pub fn idle(mut self) -> Self {
        self.script.push_back(Scripted::Idle);
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.script.push_back(Scripted::Line(line.to_string()));
        self
    }

    /// Append a whole stroke: direction line, then force key
    pub fn stroke(self, direction: &str, force: char) -> Self {
        self.line(direction).key(force)
    }

    /// Whether the whole script has been used
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    fn next(&mut self, wanted: &str) -> Scripted {
        let Some(event) = self.script.pop_front() else {
            panic!("input script exhausted after {} events while waiting for a {}", self.consumed, wanted);
        };
        self.consumed += 1;
        event
    }
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> Option<char> {
        match self.next("key") {
            Scripted::Key(key) => Some(key),
            Scripted::Idle => None,
            Scripted::Line(line) => panic!(
                "input script event {} is line {:?}, expected a key",
                self.consumed, line
            ),
        }
    }

    fn read_line(&mut self, max_len: usize) -> String {
        match self.next("line") {
            Scripted::Line(line) => line.chars().take(max_len).collect(),
            other => panic!(
                "input script event {} is {:?}, expected a line",
                self.consumed, other
            ),
        }
    }
}

/// Printer that keeps what was printed, one entry per line
#[derive(Debug, Clone, Default)]
pub struct RecordingPrinter {
    lines: Rc<RefCell<Vec<String>>>,
    pending: String,
}

impl RecordingPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the printed lines that stays valid after the printer is boxed
    pub fn lines(&self) -> Rc<RefCell<Vec<String>>> {
        self.lines.clone()
    }
}

impl Printer for RecordingPrinter {
    fn print_center(&mut self, text: &str, newline: bool) -> std::io::Result<()> {
        self.pending.push_str(&super::printer::center(text));
        if newline {
            self.pending.push('\n');
        }
        while let Some(end) = self.pending.find('\n') {
            let line = self.pending[..end].to_string();
            self.pending.drain(..=end);
            self.lines.borrow_mut().push(line);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_replays_in_order() {
        let mut input = ScriptedInput::new().key('1').idle().line("12.5");

        assert_eq!(input.poll_key(), Some('1'));
        assert_eq!(input.poll_key(), None);
        assert_eq!(input.read_line(3), "12.");
        assert!(input.is_empty());
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_input_panics_when_exhausted() {
        let mut input = ScriptedInput::new();
        input.poll_key();
    }

    #[test]
    fn test_recording_display_logs_calls() {
        let mut display = HeadlessDisplay::new();
        display.print_at(1, 2, "hi");
        display.plot(IVec2::new(4, 4));
        display.pause(16);

        assert!(display.printed("hi"));
        assert!(display.is_plotted(IVec2::new(4, 4)));
        assert_eq!(display.total_pause(), 16);
        assert_eq!(display.ops().len(), 3);
    }
}
