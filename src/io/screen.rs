//! Character screen with 2x2 block graphics
//!
//! Each character cell holds either a text character or a block graphic made
//! of four plot units. Printing over graphics replaces them, and plotting
//! over text turns the cell back into a graphic, so a redraw order matters.

use glam::IVec2;

use crate::consts::{CHAR_HEIGHT, CHAR_WIDTH, PLOT_PER_CELL};

/// Quadrant glyphs indexed by mask (bit 0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right)
const QUADRANTS: [char; 16] = [
    ' ', '▘', '▝', '▀', '▖', '▌', '▞', '▛', '▗', '▚', '▐', '▜', '▄', '▙', '▟', '█',
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    text: Option<char>,
    mask: u8,
}

impl Cell {
    fn glyph(&self) -> char {
        self.text.unwrap_or(QUADRANTS[self.mask as usize])
    }
}

/// Inclusive range of cells touched by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dirty {
    pub rows: (u16, u16),
    pub cols: (u16, u16),
}

impl Dirty {
    fn cell(row: u16, col: u16) -> Self {
        Self {
            rows: (row, row),
            cols: (col, col),
        }
    }
}

/// In-memory copy of the screen
#[derive(Debug, Clone)]
pub struct ScreenBuffer {
    cells: Vec<Cell>,
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBuffer {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); CHAR_WIDTH as usize * CHAR_HEIGHT as usize],
        }
    }

    fn index(row: u16, col: u16) -> Option<usize> {
        (row < CHAR_HEIGHT && col < CHAR_WIDTH).then(|| row as usize * CHAR_WIDTH as usize + col as usize)
    }

    /// Cell and quadrant bit for a plot unit, if on screen
    fn locate(pos: IVec2) -> Option<(u16, u16, u8)> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let row = (pos.y / PLOT_PER_CELL) as u16;
        let col = (pos.x / PLOT_PER_CELL) as u16;
        Self::index(row, col)?;
        let bit = (pos.x % PLOT_PER_CELL) + 2 * (pos.y % PLOT_PER_CELL);
        Some((row, col, 1 << bit))
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Write text, clipped at the right edge
    pub fn print(&mut self, row: u16, col: u16, text: &str) -> Option<Dirty> {
        let mut last = None;
        for (offset, c) in text.chars().enumerate() {
            let col = col as usize + offset;
            let Some(i) = u16::try_from(col).ok().and_then(|col| Self::index(row, col)) else {
                break;
            };
            self.cells[i] = Cell {
                text: Some(c),
                mask: 0,
            };
            last = Some(col as u16);
        }
        last.map(|end| Dirty {
            rows: (row, row),
            cols: (col, end),
        })
    }

    pub fn plot(&mut self, pos: IVec2) -> Option<Dirty> {
        self.set_pixel(pos, true)
    }

    pub fn unplot(&mut self, pos: IVec2) -> Option<Dirty> {
        self.set_pixel(pos, false)
    }

    fn set_pixel(&mut self, pos: IVec2, on: bool) -> Option<Dirty> {
        let (row, col, bit) = Self::locate(pos)?;
        let i = Self::index(row, col)?;
        let cell = &mut self.cells[i];
        // Text under a plot is lost, the cell becomes a graphic
        if cell.text.take().is_some() {
            cell.mask = 0;
        }
        if on {
            cell.mask |= bit;
        } else {
            cell.mask &= !bit;
        }
        Some(Dirty::cell(row, col))
    }

    /// Clear plot units in a rectangle, blanking any text in the cells it touches
    pub fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32) -> Option<Dirty> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width - 1).min(CHAR_WIDTH as i32 * PLOT_PER_CELL - 1);
        let y1 = (y + height - 1).min(CHAR_HEIGHT as i32 * PLOT_PER_CELL - 1);
        if x0 > x1 || y0 > y1 {
            return None;
        }

        for py in y0..=y1 {
            for px in x0..=x1 {
                if let Some((row, col, bit)) = Self::locate(IVec2::new(px, py)) {
                    if let Some(i) = Self::index(row, col) {
                        let cell = &mut self.cells[i];
                        cell.text = None;
                        cell.mask &= !bit;
                    }
                }
            }
        }

        Some(Dirty {
            rows: ((y0 / PLOT_PER_CELL) as u16, (y1 / PLOT_PER_CELL) as u16),
            cols: ((x0 / PLOT_PER_CELL) as u16, (x1 / PLOT_PER_CELL) as u16),
        })
    }

    /// Move every line down one row; the top row becomes blank
    pub fn scroll_down(&mut self) {
        let width = CHAR_WIDTH as usize;
        let len = self.cells.len();
        self.cells.copy_within(0..len - width, width);
        self.cells[..width].fill(Cell::default());
    }

    /// Glyph shown at a cell
    pub fn glyph(&self, row: u16, col: u16) -> char {
        Self::index(row, col).map_or(' ', |i| self.cells[i].glyph())
    }

    /// Text of a whole row, graphics shown as quadrant glyphs
    pub fn row_text(&self, row: u16) -> String {
        (0..CHAR_WIDTH).map(|col| self.glyph(row, col)).collect()
    }

    /// Whether a plot unit is set
    pub fn is_plotted(&self, pos: IVec2) -> bool {
        Self::locate(pos)
            .and_then(|(row, col, bit)| Self::index(row, col).map(|i| (i, bit)))
            .is_some_and(|(i, bit)| self.cells[i].text.is_none() && self.cells[i].mask & bit != 0)
    }
}
