//! 16×2 character LCD emulated on a pixel panel with `embedded-graphics`.
//!
//! Drawing calls only touch a shadow [`Frame`]. [`CellGrid::flush`] then
//! repaints just the cells whose content changed since the last flush, so a
//! game that clears and redraws everything each tick does not flicker.

use embedded_graphics::{
    mono_font::{
        MonoFont,
        MonoTextStyle,
        ascii::FONT_10X20,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
    text::{
        Baseline,
        Text,
    },
};

use crate::lcd::{
    COLS,
    Cell,
    CharDisplay,
    Frame,
    Glyph,
    ROWS,
};

/// Pixel geometry and colours of the emulated LCD.
#[derive(Clone, Copy)]
pub struct GridStyle {
    /// Top-left corner of cell (0, 0).
    pub origin: Point,
    /// Size of one character cell, including spacing.
    pub pitch: Size,
    /// Edge length of one glyph pixel.
    pub dot: u32,
    pub font: &'static MonoFont<'static>,
    pub foreground: Rgb565,
    pub background: Rgb565,
}

impl GridStyle {
    /// Fills the width of the badge's 320×170 panel, vertically centred.
    pub fn badge() -> Self {
        Self {
            origin: Point::new(0, 45),
            pitch: Size::new(20, 40),
            dot: 3,
            font: &FONT_10X20,
            foreground: Rgb565::WHITE,
            background: Rgb565::CSS_MEDIUM_BLUE,
        }
    }

    pub const fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub const fn with_colors(mut self, foreground: Rgb565, background: Rgb565) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    /// Pixel area covered by the whole grid.
    pub const fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            self.origin,
            Size::new(self.pitch.width * COLS as u32, self.pitch.height * ROWS as u32),
        )
    }

    fn cell_origin(&self, col: usize, row: usize) -> Point {
        self.origin
            + Point::new(
                (col as u32 * self.pitch.width) as i32,
                (row as u32 * self.pitch.height) as i32,
            )
    }

    /// Offset that centres `inner` inside one cell.
    fn centre(&self, inner: Size) -> Point {
        Point::new(
            (self.pitch.width.saturating_sub(inner.width) / 2) as i32,
            (self.pitch.height.saturating_sub(inner.height) / 2) as i32,
        )
    }
}

impl Default for GridStyle {
    fn default() -> Self {
        Self::badge()
    }
}

/// A [`CharDisplay`] painted onto any `Rgb565` draw target.
pub struct CellGrid<D> {
    target: D,
    style: GridStyle,
    shadow: Frame,
    /// What the panel currently shows; `None` means unknown and due a repaint.
    shown: [[Option<Cell>; COLS]; ROWS],
}

impl<D> CellGrid<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(target: D, style: GridStyle) -> Self {
        Self {
            target,
            style,
            shadow: Frame::new(),
            shown: [[None; COLS]; ROWS],
        }
    }

    /// Contents that the next flush will put on the panel.
    pub const fn frame(&self) -> &Frame {
        &self.shadow
    }

    pub const fn style(&self) -> &GridStyle {
        &self.style
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn release(self) -> D {
        self.target
    }

    /// Forget what the panel shows so the next flush repaints every cell.
    pub fn invalidate(&mut self) {
        self.shown = [[None; COLS]; ROWS];
    }

    /// Number of cells the next flush would repaint.
    pub fn pending(&self) -> usize {
        (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| (col, row)))
            .filter(|&(col, row)| self.shown[row][col] != Some(self.shadow.cell(col, row)))
            .count()
    }

    /// Paint every changed cell.
    ///
    /// On error the remaining cells stay pending and are retried next flush.
    pub fn flush(&mut self) -> Result<(), D::Error> {
        for row in 0..ROWS {
            for col in 0..COLS {
                let cell = self.shadow.cell(col, row);
                if self.shown[row][col] == Some(cell) {
                    continue;
                }
                self.paint(col, row, cell)?;
                self.shown[row][col] = Some(cell);
            }
        }
        Ok(())
    }

    fn paint(&mut self, col: usize, row: usize, cell: Cell) -> Result<(), D::Error> {
        let top_left = self.style.cell_origin(col, row);
        Rectangle::new(top_left, self.style.pitch)
            .into_styled(PrimitiveStyle::with_fill(self.style.background))
            .draw(&mut self.target)?;

        match cell {
            Cell::Blank => {}
            Cell::Char(byte) => {
                let mut buf = [0u8; 4];
                let text = char::from(byte).encode_utf8(&mut buf);
                let font = self.style.font;
                let at = top_left + self.style.centre(font.character_size);
                Text::with_baseline(
                    text,
                    at,
                    MonoTextStyle::new(font, self.style.foreground),
                    Baseline::Top,
                )
                .draw(&mut self.target)?;
            }
            Cell::Glyph(index) => {
                let bitmap = self.shadow.glyph(index);
                self.paint_glyph(top_left, &bitmap)?;
            }
        }
        Ok(())
    }

    fn paint_glyph(&mut self, top_left: Point, bitmap: &Glyph) -> Result<(), D::Error> {
        let dot = self.style.dot;
        let at = top_left + self.style.centre(Size::new(5 * dot, 8 * dot));
        let ink = PrimitiveStyle::with_fill(self.style.foreground);
        for (y, bits) in bitmap.iter().enumerate() {
            for x in 0..5u32 {
                if bits & (0x10 >> x) == 0 {
                    continue;
                }
                Rectangle::new(
                    at + Point::new((x * dot) as i32, (y as u32 * dot) as i32),
                    Size::new(dot, dot),
                )
                .into_styled(ink)
                .draw(&mut self.target)?;
            }
        }
        Ok(())
    }
}

impl<D> CharDisplay for CellGrid<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self) {
        self.shadow.clear();
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.shadow.set_cursor(col, row);
    }

    fn write(&mut self, byte: u8) {
        self.shadow.write(byte);
    }

    fn create_char(&mut self, index: u8, bitmap: &Glyph) {
        if self.shadow.glyph(index) == *bitmap {
            return;
        }
        self.shadow.create_char(index, bitmap);
        // Like the real controller, cells already showing the slot change too.
        for row in self.shown.iter_mut() {
            for shown in row.iter_mut() {
                if *shown == Some(Cell::Glyph(index)) {
                    *shown = None;
                }
            }
        }
    }
}
