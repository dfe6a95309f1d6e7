//! Two-player reflex duel.
//!
//! Either player starts a round from the waiting screen. After a random
//! hold the screen shows GO and the first fresh press wins; the time from GO
//! to that press is the reaction time. Pressing before GO is a false start
//! and hands the round to the other player.
//!
//! Buttons are consumed as presses (see [`PressLatch`]): holding a button
//! from one phase into the next never counts as a new press. When both
//! players press on the same tick, player one is evaluated first and wins.

use core::fmt::Write as _;

use heapless::String;

use crate::{
    clock::{
        Clock,
        Millis,
        elapsed,
    },
    game::Game,
    input::{
        Button,
        PressLatch,
    },
    lcd::{
        COLS,
        CharDisplay,
        Glyph,
    },
    rng::Rng,
};

const P1: Glyph = [
    0b10000, 0b11000, 0b10100, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000,
];
const P2: Glyph = [
    0b00001, 0b00011, 0b00101, 0b00001, 0b00001, 0b00001, 0b00001, 0b00001,
];

/// Timing knobs for [`Reaction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReactionConfig {
    /// Shortest random hold before GO.
    pub min_go_delay_ms: Millis,
    /// Longest random hold before GO.
    pub max_go_delay_ms: Millis,
    /// One countdown dot appears per this many milliseconds.
    pub countdown_dot_ms: Millis,
    /// How long the result ignores presses before a new round can start.
    pub result_hold_ms: Millis,
    pub seed: u32,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            min_go_delay_ms: 1_000,
            max_go_delay_ms: 4_000,
            countdown_dot_ms: 250,
            result_hold_ms: 1_000,
            seed: 0x2026_D15B,
        }
    }
}

impl ReactionConfig {
    /// Set the random GO delay range; the bounds may come in either order.
    #[must_use]
    pub const fn with_go_delay_ms(mut self, a: Millis, b: Millis) -> Self {
        self.min_go_delay_ms = a;
        self.max_go_delay_ms = b;
        let (min, max) = self.go_delay_range();
        self.min_go_delay_ms = min;
        self.max_go_delay_ms = max;
        self
    }

    #[must_use]
    pub const fn with_countdown_dot_ms(mut self, countdown_dot_ms: Millis) -> Self {
        self.countdown_dot_ms = countdown_dot_ms;
        self
    }

    #[must_use]
    pub const fn with_result_hold_ms(mut self, result_hold_ms: Millis) -> Self {
        self.result_hold_ms = result_hold_ms;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// The GO delay bounds, smallest first.
    pub const fn go_delay_range(&self) -> (Millis, Millis) {
        if self.min_go_delay_ms <= self.max_go_delay_ms {
            (self.min_go_delay_ms, self.max_go_delay_ms)
        } else {
            (self.max_go_delay_ms, self.min_go_delay_ms)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Player {
    One,
    Two,
}

impl Player {
    const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    const fn glyph(self) -> u8 {
        self.index() as u8
    }

    const fn label(self) -> &'static str {
        match self {
            Self::One => "P1",
            Self::Two => "P2",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Outcome {
    Reacted { winner: Player, reaction_ms: Millis },
    FalseStart { fouled: Player },
    DoubleFalseStart,
}

impl Outcome {
    const fn winner(self) -> Option<Player> {
        match self {
            Self::Reacted { winner, .. } => Some(winner),
            Self::FalseStart { fouled } => Some(fouled.other()),
            Self::DoubleFalseStart => None,
        }
    }

    const fn reaction_ms(self) -> Option<Millis> {
        match self {
            Self::Reacted { reaction_ms, .. } => Some(reaction_ms),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum ReactionState {
    Waiting,
    Countdown,
    Go,
    Finished,
}

/// The reaction duel, generic over the two player buttons and the clock.
pub struct Reaction<B, C> {
    buttons: [B; 2],
    latches: [PressLatch; 2],
    clock: C,
    config: ReactionConfig,
    rng: Rng,

    state: ReactionState,
    /// When the current state was entered.
    entered_at: Millis,
    go_delay_ms: Millis,
    go_at: Millis,
    outcome: Option<Outcome>,
    /// The current state's screen still has to be drawn.
    dirty: bool,
    dots_shown: usize,
}

impl<B: Button, C: Clock> Reaction<B, C> {
    pub fn new(player_one: B, player_two: B, clock: C, config: ReactionConfig) -> Self {
        let now = clock.now_ms();
        Self {
            buttons: [player_one, player_two],
            latches: [PressLatch::new(); 2],
            clock,
            config,
            rng: Rng::new(config.seed),
            state: ReactionState::Waiting,
            entered_at: now,
            go_delay_ms: 0,
            go_at: 0,
            outcome: None,
            dirty: true,
            dots_shown: 0,
        }
    }

    fn reset_game(&mut self, now: Millis) {
        self.state = ReactionState::Waiting;
        self.entered_at = now;
        self.go_delay_ms = 0;
        self.go_at = 0;
        self.outcome = None;
        self.dirty = true;
        self.dots_shown = 0;
        for latch in &mut self.latches {
            latch.hold();
        }
        info!("reaction: waiting for players");
    }

    /// Sample both buttons; `true` marks a fresh press.
    fn poll_presses(&mut self) -> [bool; 2] {
        let mut presses = [false; 2];
        for ((button, latch), pressed) in self
            .buttons
            .iter_mut()
            .zip(self.latches.iter_mut())
            .zip(presses.iter_mut())
        {
            *pressed = latch.poll(button.is_pressed());
        }
        presses
    }

    fn enter(&mut self, state: ReactionState, now: Millis) {
        debug!("reaction: {:?} -> {:?} at {}", self.state, state, now);
        self.state = state;
        self.entered_at = now;
        self.dirty = true;
    }

    fn state_waiting(&mut self, presses: [bool; 2], now: Millis) {
        if presses.iter().any(|p| *p) {
            self.rng.stir(now);
            let (min, max) = self.config.go_delay_range();
            self.go_delay_ms = self.rng.between(min, max);
            self.dots_shown = 0;
            debug!("reaction: GO after {} ms", self.go_delay_ms);
            self.enter(ReactionState::Countdown, now);
        }
    }

    fn state_countdown(&mut self, presses: [bool; 2], now: Millis) {
        let outcome = match presses {
            [true, true] => Some(Outcome::DoubleFalseStart),
            [true, false] => Some(Outcome::FalseStart { fouled: Player::One }),
            [false, true] => Some(Outcome::FalseStart { fouled: Player::Two }),
            [false, false] => None,
        };
        if let Some(outcome) = outcome {
            info!("reaction: false start, {:?}", outcome);
            self.finish(outcome, now);
            return;
        }

        if elapsed(now, self.entered_at) >= self.go_delay_ms {
            self.go_at = now;
            info!("reaction: GO at {}", now);
            self.enter(ReactionState::Go, now);
        }
    }

    fn state_go(&mut self, presses: [bool; 2], now: Millis) {
        let winner = if presses[Player::One.index()] {
            Player::One
        } else if presses[Player::Two.index()] {
            Player::Two
        } else {
            return;
        };
        let reaction_ms = elapsed(now, self.go_at);
        info!("reaction: {:?} wins in {} ms", winner, reaction_ms);
        self.finish(Outcome::Reacted { winner, reaction_ms }, now);
    }

    fn state_finished(&mut self, presses: [bool; 2], now: Millis) {
        if elapsed(now, self.entered_at) < self.config.result_hold_ms {
            return;
        }
        if presses.iter().any(|p| *p) {
            self.reset_game(now);
        }
    }

    fn finish(&mut self, outcome: Outcome, now: Millis) {
        debug!(
            "reaction: round over, winner {:?}, time {:?}",
            outcome.winner(),
            outcome.reaction_ms()
        );
        self.outcome = Some(outcome);
        self.enter(ReactionState::Finished, now);
    }

    fn draw<D: CharDisplay>(&mut self, display: &mut D, now: Millis) {
        if self.dirty {
            self.dirty = false;
            match self.state {
                ReactionState::Waiting => Self::draw_instructions(display),
                ReactionState::Countdown => {
                    display.clear();
                    display.set_cursor(2, 0);
                    display.print("Get ready...");
                }
                ReactionState::Go => {
                    display.clear();
                    display.set_cursor(5, 0);
                    display.print("GO!!!");
                    Self::draw_player_marks(display, 1);
                    display.set_cursor(5, 1);
                    display.print("PRESS");
                }
                ReactionState::Finished => self.draw_result(display),
            }
        }

        if self.state == ReactionState::Countdown {
            let step = self.config.countdown_dot_ms.max(1);
            let dots = ((elapsed(now, self.entered_at) / step) as usize).min(COLS);
            if self.dots_shown < dots {
                display.set_cursor(self.dots_shown as u8, 1);
                for _ in self.dots_shown..dots {
                    display.write(b'.');
                }
                self.dots_shown = dots;
            }
        }
    }

    fn draw_instructions<D: CharDisplay>(display: &mut D) {
        display.clear();
        display.set_cursor(1, 0);
        display.print("REACTION  DUEL");
        Self::draw_player_marks(display, 0);
        display.set_cursor(1, 1);
        display.print("Press to start");
    }

    fn draw_player_marks<D: CharDisplay>(display: &mut D, row: u8) {
        display.set_cursor(0, row);
        display.write(Player::One.glyph());
        display.set_cursor(COLS as u8 - 1, row);
        display.write(Player::Two.glyph());
    }

    fn draw_result<D: CharDisplay>(&self, display: &mut D) {
        display.clear();
        let Some(outcome) = self.outcome else {
            return;
        };

        match outcome.winner() {
            Some(winner) => {
                display.set_cursor(0, 0);
                display.write(winner.glyph());
                display.print(" ");
                display.print(winner.label());
                display.print(" WINS!");
            }
            None => {
                display.set_cursor(0, 0);
                display.print("Both too early!");
            }
        }

        let mut line: String<32> = String::new();
        match outcome {
            Outcome::Reacted { reaction_ms, .. } => write!(line, "Time: {} ms", reaction_ms),
            Outcome::FalseStart { fouled } => write!(line, "{} too early!", fouled.label()),
            Outcome::DoubleFalseStart => write!(line, "No winner"),
        }
        .ok();
        display.set_cursor(0, 1);
        display.print(&line);
    }
}

impl<B: Button, C: Clock> Game for Reaction<B, C> {
    fn setup<D: CharDisplay>(&mut self, display: &mut D) {
        display.create_char(Player::One.glyph(), &P1);
        display.create_char(Player::Two.glyph(), &P2);

        let now = self.clock.now_ms();
        self.reset_game(now);
        self.draw(display, now);
    }

    fn run<D: CharDisplay>(&mut self, display: &mut D) {
        let now = self.clock.now_ms();
        let presses = self.poll_presses();

        match self.state {
            ReactionState::Waiting => self.state_waiting(presses, now),
            ReactionState::Countdown => self.state_countdown(presses, now),
            ReactionState::Go => self.state_go(presses, now),
            ReactionState::Finished => self.state_finished(presses, now),
        }

        self.draw(display, now);
    }

    fn is_complete(&self) -> bool {
        self.state == ReactionState::Finished
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::{
        lcd::Cell as LcdCell,
        testing::{
            FakeButton,
            RecordingLcd,
            SimClock,
        },
    };

    #[derive(Default)]
    struct Rig {
        p1: Cell<bool>,
        p2: Cell<bool>,
        clock: SimClock,
        lcd: RecordingLcd,
    }

    type Duel<'a> = Reaction<FakeButton<'a>, &'a SimClock>;

    impl Rig {
        fn at(now: Millis) -> Self {
            Self {
                clock: SimClock::at(now),
                ..Self::default()
            }
        }
    }

    fn duel<'a>(
        p1: &'a Cell<bool>,
        p2: &'a Cell<bool>,
        clock: &'a SimClock,
        config: ReactionConfig,
    ) -> Duel<'a> {
        Reaction::new(FakeButton(p1), FakeButton(p2), clock, config)
    }

    fn tick(game: &mut Duel<'_>, clock: &SimClock, lcd: &mut RecordingLcd, ms: Millis) {
        clock.advance(ms);
        game.run(lcd);
    }

    /// Setup, player one starts the round and lets go, then wait out the delay.
    fn run_to_go(game: &mut Duel<'_>, p1: &Cell<bool>, clock: &SimClock, lcd: &mut RecordingLcd) {
        game.setup(lcd);
        tick(game, clock, lcd, 10);
        p1.set(true);
        tick(game, clock, lcd, 10);
        assert_eq!(game.state, ReactionState::Countdown);
        p1.set(false);
        tick(game, clock, lcd, 10);
        let remaining = game.go_delay_ms - 10;
        tick(game, clock, lcd, remaining);
        assert_eq!(game.state, ReactionState::Go);
    }

    #[test]
    fn setup_shows_instructions() {
        let mut rig = Rig::default();
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        game.setup(&mut rig.lcd);

        assert_eq!(rig.lcd.glyph_uploads, 2);
        assert_eq!(rig.lcd.frame.glyph(0), P1);
        assert_eq!(rig.lcd.frame.glyph(1), P2);
        assert_eq!(rig.lcd.row(0).as_str(), "*REACTION  DUEL*");
        assert_eq!(rig.lcd.row(1).as_str(), " Press to start ");
        assert!(!game.is_complete());
    }

    #[test]
    fn press_in_waiting_starts_countdown_not_go() {
        let mut rig = Rig::default();
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        game.setup(&mut rig.lcd);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);

        rig.p2.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        assert_eq!(game.state, ReactionState::Countdown);
        assert_eq!(rig.lcd.row(0).as_str(), "  Get ready...  ");

        // Holding on does not skip ahead.
        for _ in 0..50 {
            tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        }
        assert_eq!(game.state, ReactionState::Countdown);
        assert!(game.outcome.is_none());
    }

    #[test]
    fn button_held_through_setup_needs_a_release() {
        let mut rig = Rig::default();
        rig.p1.set(true);
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        game.setup(&mut rig.lcd);

        for _ in 0..5 {
            tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        }
        assert_eq!(game.state, ReactionState::Waiting);

        rig.p1.set(false);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        rig.p1.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        assert_eq!(game.state, ReactionState::Countdown);
    }

    #[test]
    fn go_delay_stays_in_range_and_is_honoured() {
        let mut rig = Rig::default();
        for seed in 1..40u32 {
            let config = ReactionConfig::default().with_seed(seed);
            let mut game = duel(&rig.p1, &rig.p2, &rig.clock, config);
            game.setup(&mut rig.lcd);
            tick(&mut game, &rig.clock, &mut rig.lcd, 10);
            rig.p1.set(true);
            tick(&mut game, &rig.clock, &mut rig.lcd, 10);
            rig.p1.set(false);

            let delay = game.go_delay_ms;
            assert!((1_000..=4_000).contains(&delay), "delay {delay}");

            tick(&mut game, &rig.clock, &mut rig.lcd, delay - 1);
            assert_eq!(game.state, ReactionState::Countdown);
            tick(&mut game, &rig.clock, &mut rig.lcd, 1);
            assert_eq!(game.state, ReactionState::Go);
            assert_eq!(game.go_at, rig.clock.now_ms());
        }
    }

    #[test]
    fn first_press_after_go_wins_with_reaction_time() {
        let mut rig = Rig::default();
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        run_to_go(&mut game, &rig.p1, &rig.clock, &mut rig.lcd);
        assert_eq!(rig.lcd.row(0).as_str(), "     GO!!!      ");
        assert_eq!(rig.lcd.frame.cell(0, 1), LcdCell::Glyph(0));
        assert_eq!(rig.lcd.frame.cell(15, 1), LcdCell::Glyph(1));

        tick(&mut game, &rig.clock, &mut rig.lcd, 100);
        assert_eq!(game.state, ReactionState::Go);

        rig.p2.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 80);
        let outcome = game.outcome.unwrap();
        assert_eq!(outcome.winner(), Some(Player::Two));
        assert_eq!(outcome.reaction_ms(), Some(180));
        assert!(game.is_complete());
        assert_eq!(rig.lcd.row(0).as_str(), "* P2 WINS!      ");
        assert_eq!(rig.lcd.row(1).as_str(), "Time: 180 ms    ");
    }

    #[test]
    fn simultaneous_press_goes_to_player_one() {
        let mut rig = Rig::default();
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        run_to_go(&mut game, &rig.p1, &rig.clock, &mut rig.lcd);

        rig.p1.set(true);
        rig.p2.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 200);
        let outcome = game.outcome.unwrap();
        assert_eq!(outcome.winner(), Some(Player::One));
        assert_eq!(outcome.reaction_ms(), Some(200));
    }

    #[test]
    fn button_held_into_go_does_not_win() {
        let mut rig = Rig::default();
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        game.setup(&mut rig.lcd);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);

        // Player one starts the round and never lets go.
        rig.p1.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        let delay = game.go_delay_ms;
        tick(&mut game, &rig.clock, &mut rig.lcd, delay);
        assert_eq!(game.state, ReactionState::Go);

        tick(&mut game, &rig.clock, &mut rig.lcd, 50);
        assert_eq!(game.state, ReactionState::Go);

        rig.p2.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 50);
        assert_eq!(game.outcome.unwrap().winner(), Some(Player::Two));
    }

    #[test]
    fn press_before_go_is_a_false_start() {
        let mut rig = Rig::default();
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        game.setup(&mut rig.lcd);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        rig.p1.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        rig.p1.set(false);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);

        rig.p1.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 300);
        let outcome = game.outcome.unwrap();
        assert_eq!(outcome, Outcome::FalseStart { fouled: Player::One });
        assert_eq!(outcome.winner(), Some(Player::Two));
        assert_eq!(outcome.reaction_ms(), None);
        assert!(game.is_complete());
        assert_eq!(rig.lcd.row(0).as_str(), "* P2 WINS!      ");
        assert_eq!(rig.lcd.row(1).as_str(), "P1 too early!   ");
    }

    #[test]
    fn both_jumping_the_gun_has_no_winner() {
        let mut rig = Rig::default();
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        game.setup(&mut rig.lcd);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        rig.p1.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        rig.p1.set(false);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);

        rig.p1.set(true);
        rig.p2.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        let outcome = game.outcome.unwrap();
        assert_eq!(outcome, Outcome::DoubleFalseStart);
        assert_eq!(outcome.winner(), None);
        assert_eq!(rig.lcd.row(0).as_str(), "Both too early! ");
        assert_eq!(rig.lcd.row(1).as_str(), "No winner       ");
    }

    #[test]
    fn countdown_dots_grow_without_clearing() {
        let mut rig = Rig::default();
        let config = ReactionConfig::default().with_go_delay_ms(4_000, 4_000);
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, config);
        game.setup(&mut rig.lcd);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        rig.p1.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        let clears = rig.lcd.clears;
        let writes = rig.lcd.writes;

        tick(&mut game, &rig.clock, &mut rig.lcd, 600);
        assert_eq!(rig.lcd.row(1).as_str(), "..              ");
        assert_eq!(rig.lcd.writes - writes, 2);
        tick(&mut game, &rig.clock, &mut rig.lcd, 150);
        assert_eq!(rig.lcd.row(1).as_str(), "...             ");
        assert_eq!(rig.lcd.writes - writes, 3);
        // A tick between dots writes nothing.
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        assert_eq!(rig.lcd.writes - writes, 3);
        tick(&mut game, &rig.clock, &mut rig.lcd, 2_990);
        assert_eq!(rig.lcd.row(1).as_str(), "............... ");
        assert_eq!(rig.lcd.writes - writes, 15);
        assert_eq!(rig.lcd.clears, clears);
    }

    /// Drives any game for `ticks` frames the way a main loop would and
    /// reports whether it finished.
    fn drive<G: Game>(
        game: &mut G,
        clock: &SimClock,
        lcd: &mut RecordingLcd,
        ticks: u32,
    ) -> bool {
        for _ in 0..ticks {
            clock.advance(10);
            game.run(lcd);
        }
        game.is_complete()
    }

    #[test]
    fn completion_is_visible_to_a_generic_driver() {
        let mut rig = Rig::default();
        let config = ReactionConfig::default().with_go_delay_ms(1_000, 1_000);
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, config);
        game.setup(&mut rig.lcd);
        assert!(!drive(&mut game, &rig.clock, &mut rig.lcd, 5));

        rig.p2.set(true);
        assert!(!drive(&mut game, &rig.clock, &mut rig.lcd, 1));
        rig.p2.set(false);
        assert!(!drive(&mut game, &rig.clock, &mut rig.lcd, 100));
        assert_eq!(game.state, ReactionState::Go);

        rig.p2.set(true);
        assert!(drive(&mut game, &rig.clock, &mut rig.lcd, 1));
        assert_eq!(game.outcome.and_then(|o| o.winner()), Some(Player::Two));
    }

    #[test]
    fn result_holds_then_any_fresh_press_resets() {
        let mut rig = Rig::default();
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, ReactionConfig::default());
        run_to_go(&mut game, &rig.p1, &rig.clock, &mut rig.lcd);
        rig.p1.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 150);
        assert!(game.is_complete());

        // A late press from the loser inside the hold window is swallowed.
        rig.p2.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 100);
        rig.p2.set(false);
        tick(&mut game, &rig.clock, &mut rig.lcd, 100);
        assert!(game.is_complete());

        // Still held from the win: nothing happens after the hold either.
        tick(&mut game, &rig.clock, &mut rig.lcd, 1_000);
        assert!(game.is_complete());

        rig.p2.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 10);
        assert_eq!(game.state, ReactionState::Waiting);
        assert!(!game.is_complete());
        assert!(game.outcome.is_none());
        assert_eq!(game.go_delay_ms, 0);
        assert_eq!(rig.lcd.row(1).as_str(), " Press to start ");
    }

    #[test]
    fn reaction_time_across_counter_wrap() {
        let mut rig = Rig::at(u32::MAX - 5_000);
        let config = ReactionConfig::default().with_go_delay_ms(4_975, 4_975);
        let mut game = duel(&rig.p1, &rig.p2, &rig.clock, config);
        run_to_go(&mut game, &rig.p1, &rig.clock, &mut rig.lcd);
        assert!(game.go_at > u32::MAX - 100);

        rig.p2.set(true);
        tick(&mut game, &rig.clock, &mut rig.lcd, 250);
        assert_eq!(game.outcome.unwrap().reaction_ms(), Some(250));
    }

    #[test]
    fn config_orders_delay_bounds() {
        let config = ReactionConfig::default().with_go_delay_ms(4_000, 1_000);
        assert_eq!(config.go_delay_range(), (1_000, 4_000));
        assert_eq!(config.min_go_delay_ms, 1_000);

        let raw = ReactionConfig {
            min_go_delay_ms: 3_000,
            max_go_delay_ms: 2_000,
            ..ReactionConfig::default()
        };
        assert_eq!(raw.go_delay_range(), (2_000, 3_000));
    }
}
