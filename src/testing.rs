//! Simulated hardware for engine tests.

use core::cell::Cell;

use crate::{
    clock::{
        Clock,
        Millis,
    },
    input::Button,
    lcd::{
        CharDisplay,
        Frame,
        Glyph,
    },
};

/// Manually advanced millisecond clock.
#[derive(Default)]
pub(crate) struct SimClock {
    now: Cell<Millis>,
}

impl SimClock {
    pub(crate) fn at(now: Millis) -> Self {
        Self { now: Cell::new(now) }
    }

    pub(crate) fn advance(&self, ms: Millis) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

/// Button whose level the test flips through a shared cell.
#[derive(Clone, Copy)]
pub(crate) struct FakeButton<'a>(pub(crate) &'a Cell<bool>);

impl Button for FakeButton<'_> {
    fn is_pressed(&mut self) -> bool {
        self.0.get()
    }
}

/// [`Frame`] that also counts the calls made on it.
#[derive(Default)]
pub(crate) struct RecordingLcd {
    pub(crate) frame: Frame,
    pub(crate) clears: usize,
    pub(crate) glyph_uploads: usize,
    pub(crate) writes: usize,
}

impl RecordingLcd {
    pub(crate) fn row(&self, row: usize) -> heapless::String<{ crate::lcd::COLS }> {
        self.frame.text(row)
    }
}

impl CharDisplay for RecordingLcd {
    fn clear(&mut self) {
        self.clears += 1;
        self.frame.clear();
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.frame.set_cursor(col, row);
    }

    fn write(&mut self, byte: u8) {
        self.writes += 1;
        self.frame.write(byte);
    }

    fn create_char(&mut self, index: u8, bitmap: &Glyph) {
        self.glyph_uploads += 1;
        self.frame.create_char(index, bitmap);
    }
}
