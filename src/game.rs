//! The contract every game offers to whatever drives the main loop.

use crate::lcd::CharDisplay;

/// A cooperative, tick-driven game.
///
/// The driver calls [`run`](Game::run) once per loop iteration. Each call
/// samples the clock and buttons, advances the state machine and returns
/// promptly; nothing inside a game ever waits. Several games can share one
/// display because it is lent to each call rather than owned.
pub trait Game {
    /// Upload glyphs and show the opening screen. Safe to call again, e.g.
    /// when a menu switches back to this game.
    fn setup<D: CharDisplay>(&mut self, display: &mut D);

    /// Advance one tick.
    fn run<D: CharDisplay>(&mut self, display: &mut D);

    /// Whether a round has finished and the driver may offer a way back to
    /// game selection.
    fn is_complete(&self) -> bool {
        false
    }
}
