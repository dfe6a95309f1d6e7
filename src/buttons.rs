//! Badge buttons wired up as game controls.
//!
//! All four are active low with the internal pull-up and are read as raw
//! levels, once per game tick.

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use crate::{
    ButtonResources,
    input::PinButton,
};

/// A badge button: pressed while its pin reads low.
pub type BadgeButton = PinButton<Input<'static>>;

/// The buttons the games use.
pub struct Controls {
    /// Runner jump (D-pad up).
    pub jump: BadgeButton,
    /// Reaction duel, left-hand player (D-pad left).
    pub player_one: BadgeButton,
    /// Reaction duel, right-hand player (A).
    pub player_two: BadgeButton,
    /// Switch to the other game (Start).
    pub next_game: BadgeButton,
}

impl From<ButtonResources<'static>> for Controls {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            jump: PinButton::active_low(Input::new(res.up, pull_up)),
            player_one: PinButton::active_low(Input::new(res.left, pull_up)),
            player_two: PinButton::active_low(Input::new(res.a, pull_up)),
            next_game: PinButton::active_low(Input::new(res.start, pull_up)),
        }
    }
}
