//! Character-cell display capability, modelled on an HD44780-style 16×2 LCD.
//!
//! Bytes `0..GLYPH_SLOTS` written with [`CharDisplay::write`] select custom
//! glyphs uploaded through [`CharDisplay::create_char`]; every other byte is
//! an ASCII character.

use heapless::String;

/// Columns on the display.
pub const COLS: usize = 16;

/// Rows on the display.
pub const ROWS: usize = 2;

/// Number of custom glyph slots.
pub const GLYPH_SLOTS: usize = 8;

/// A 5×8 custom character: one byte per row, the low five bits are pixels
/// (bit 4 is the leftmost column).
pub type Glyph = [u8; 8];

/// What a screen should show, cell by cell.
pub trait CharDisplay {
    /// Blank every cell and home the cursor.
    fn clear(&mut self);

    /// Move the cursor. Columns past the right edge swallow writes; rows
    /// past the bottom are clamped to the last row.
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Put one byte at the cursor and advance it.
    fn write(&mut self, byte: u8);

    /// Write `text` starting at the cursor. Non-ASCII characters show as `?`.
    fn print(&mut self, text: &str) {
        for c in text.chars() {
            self.write(if c.is_ascii() { c as u8 } else { b'?' });
        }
    }

    /// Upload a custom glyph into `index` (`0..GLYPH_SLOTS`); other indices
    /// are ignored.
    fn create_char(&mut self, index: u8, bitmap: &Glyph);
}

impl<D: CharDisplay + ?Sized> CharDisplay for &mut D {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        (**self).set_cursor(col, row);
    }

    fn write(&mut self, byte: u8) {
        (**self).write(byte);
    }

    fn print(&mut self, text: &str) {
        (**self).print(text);
    }

    fn create_char(&mut self, index: u8, bitmap: &Glyph) {
        (**self).create_char(index, bitmap);
    }
}

/// Contents of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cell {
    Blank,
    Char(u8),
    Glyph(u8),
}

impl Cell {
    const fn from_byte(byte: u8) -> Self {
        if (byte as usize) < GLYPH_SLOTS {
            Self::Glyph(byte)
        } else if byte == b' ' {
            Self::Blank
        } else {
            Self::Char(byte)
        }
    }
}

/// In-memory character screen: cells, cursor, and glyph table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    cells: [[Cell; COLS]; ROWS],
    glyphs: [Glyph; GLYPH_SLOTS],
    col: u8,
    row: u8,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            cells: [[Cell::Blank; COLS]; ROWS],
            glyphs: [[0; 8]; GLYPH_SLOTS],
            col: 0,
            row: 0,
        }
    }

    /// Cell at `col`, `row`; out-of-range positions read as blank.
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(Cell::Blank)
    }

    pub fn glyph(&self, index: u8) -> Glyph {
        self.glyphs
            .get(index as usize)
            .copied()
            .unwrap_or([0; 8])
    }

    pub const fn cursor(&self) -> (u8, u8) {
        (self.col, self.row)
    }

    /// Row as text, with custom glyphs shown as `*`.
    pub fn text(&self, row: usize) -> String<COLS> {
        let mut line = String::new();
        for col in 0..COLS {
            let c = match self.cell(col, row) {
                Cell::Blank => ' ',
                Cell::Char(b) => b as char,
                Cell::Glyph(_) => '*',
            };
            // Capacity is exactly COLS.
            let _ = line.push(c);
        }
        line
    }

    /// `true` when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(|c| *c == Cell::Blank)
    }
}

impl CharDisplay for Frame {
    fn clear(&mut self) {
        self.cells = [[Cell::Blank; COLS]; ROWS];
        self.col = 0;
        self.row = 0;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col;
        self.row = row.min(ROWS as u8 - 1);
    }

    fn write(&mut self, byte: u8) {
        if let Some(cell) = self.cells[self.row as usize].get_mut(self.col as usize) {
            *cell = Cell::from_byte(byte);
        }
        self.col = self.col.saturating_add(1);
    }

    fn create_char(&mut self, index: u8, bitmap: &Glyph) {
        if let Some(slot) = self.glyphs.get_mut(index as usize) {
            *slot = *bitmap;
        }
    }
}
