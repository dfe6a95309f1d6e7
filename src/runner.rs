//! Single-button runner: hop over an obstacle that scrolls in from the right.
//!
//! The player stands in column 1. The obstacle walks left along the bottom
//! row one column per move interval and respawns at the right edge after
//! leaving the screen. Being on the ground when it reaches column 1 ends the
//! round; while airborne the player cannot be hit.

use crate::{
    clock::{
        Clock,
        Millis,
        Throttle,
        elapsed,
    },
    game::Game,
    input::Button,
    lcd::{
        COLS,
        CharDisplay,
        Glyph,
    },
};

const PLAYER_GLYPH: u8 = 0;
const OBSTACLE_GLYPH: u8 = 1;

const PLAYER_COL: i8 = 1;
const SPAWN_COL: i8 = COLS as i8 - 1;
const AIR_ROW: u8 = 0;
const GROUND_ROW: u8 = 1;

const PLAYER: Glyph = [
    0b00111, 0b00101, 0b00111, 0b10110, 0b11111, 0b01110, 0b01010, 0b01010,
];
const OBSTACLE: Glyph = [
    0b00100, 0b00101, 0b10101, 0b10101, 0b11111, 0b00100, 0b00100, 0b00100,
];

/// Timing knobs for [`Runner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunnerConfig {
    /// How long one hop keeps the player in the air.
    pub jump_ms: Millis,
    /// Time between obstacle steps.
    pub move_interval_ms: Millis,
    /// Minimum gap between redraws of the game-over screen.
    pub game_over_refresh_ms: Millis,
    /// How long the title stays up after `setup`. Zero skips it.
    pub splash_ms: Millis,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            jump_ms: 300,
            move_interval_ms: 200,
            game_over_refresh_ms: 500,
            splash_ms: 1_000,
        }
    }
}

impl RunnerConfig {
    #[must_use]
    pub const fn with_jump_ms(mut self, jump_ms: Millis) -> Self {
        self.jump_ms = jump_ms;
        self
    }

    #[must_use]
    pub const fn with_move_interval_ms(mut self, move_interval_ms: Millis) -> Self {
        self.move_interval_ms = move_interval_ms;
        self
    }

    #[must_use]
    pub const fn with_game_over_refresh_ms(mut self, game_over_refresh_ms: Millis) -> Self {
        self.game_over_refresh_ms = game_over_refresh_ms;
        self
    }

    #[must_use]
    pub const fn with_splash_ms(mut self, splash_ms: Millis) -> Self {
        self.splash_ms = splash_ms;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum RunnerState {
    Playing,
    GameOver,
}

/// Column one step to the left, back at the spawn column once it leaves the
/// screen.
const fn step_obstacle(x: i8) -> i8 {
    if x - 1 < 0 { SPAWN_COL } else { x - 1 }
}

/// The runner game, generic over its jump button and clock.
pub struct Runner<B, C> {
    button: B,
    clock: C,
    config: RunnerConfig,

    state: RunnerState,
    jumping: bool,
    jump_start: Millis,
    obstacle_x: i8,
    last_move: Millis,
    game_over_redraw: Throttle,
    splash_since: Option<Millis>,
}

impl<B: Button, C: Clock> Runner<B, C> {
    pub fn new(button: B, clock: C, config: RunnerConfig) -> Self {
        let now = clock.now_ms();
        Self {
            button,
            clock,
            config,
            state: RunnerState::Playing,
            jumping: false,
            jump_start: 0,
            obstacle_x: SPAWN_COL,
            last_move: now,
            game_over_redraw: Throttle::new(config.game_over_refresh_ms),
            splash_since: None,
        }
    }

    fn reset_game<D: CharDisplay>(&mut self, display: &mut D, now: Millis) {
        self.state = RunnerState::Playing;
        self.jumping = false;
        self.obstacle_x = SPAWN_COL;
        self.jump_start = 0;
        self.last_move = now;
        display.clear();
        info!("runner: new round at {}", now);
    }

    fn handle_jump(&mut self, now: Millis) {
        if !self.jumping && self.button.is_pressed() {
            self.jumping = true;
            self.jump_start = now;
            trace!("runner: jump at {}", now);
        }

        if self.jumping && elapsed(now, self.jump_start) >= self.config.jump_ms {
            self.jumping = false;
        }
    }

    fn move_obstacle(&mut self, now: Millis) {
        if elapsed(now, self.last_move) >= self.config.move_interval_ms {
            self.obstacle_x = step_obstacle(self.obstacle_x);
            self.last_move = now;
        }
    }

    const fn collided(&self) -> bool {
        !self.jumping && self.obstacle_x == PLAYER_COL
    }

    fn draw<D: CharDisplay>(&self, display: &mut D) {
        display.clear();

        let row = if self.jumping { AIR_ROW } else { GROUND_ROW };
        display.set_cursor(PLAYER_COL as u8, row);
        display.write(PLAYER_GLYPH);

        if (0..COLS as i8).contains(&self.obstacle_x) {
            display.set_cursor(self.obstacle_x as u8, GROUND_ROW);
            display.write(OBSTACLE_GLYPH);
        }
    }

    fn draw_game_over<D: CharDisplay>(display: &mut D) {
        display.clear();
        display.set_cursor(3, 0);
        display.print("GAME OVER!");
        display.set_cursor(0, 1);
        display.print("Jump to restart");
    }
}

impl<B: Button, C: Clock> Game for Runner<B, C> {
    fn setup<D: CharDisplay>(&mut self, display: &mut D) {
        display.create_char(PLAYER_GLYPH, &PLAYER);
        display.create_char(OBSTACLE_GLYPH, &OBSTACLE);

        display.clear();
        display.set_cursor(0, 0);
        display.print("  LCD  RUNNER  ");
        display.set_cursor(0, 1);
        display.print(" Press to jump ");

        let now = self.clock.now_ms();
        if self.config.splash_ms == 0 {
            self.splash_since = None;
            self.reset_game(display, now);
        } else {
            self.splash_since = Some(now);
        }
    }

    fn run<D: CharDisplay>(&mut self, display: &mut D) {
        let now = self.clock.now_ms();

        if let Some(since) = self.splash_since {
            if elapsed(now, since) < self.config.splash_ms {
                return;
            }
            self.splash_since = None;
            self.reset_game(display, now);
        }

        match self.state {
            RunnerState::Playing => {
                self.handle_jump(now);
                self.move_obstacle(now);

                if self.collided() {
                    info!("runner: hit at column {}", self.obstacle_x);
                    self.state = RunnerState::GameOver;
                    Self::draw_game_over(display);
                    self.game_over_redraw.mark(now);
                } else {
                    self.draw(display);
                }
            }
            RunnerState::GameOver => {
                if self.game_over_redraw.ready(now) {
                    Self::draw_game_over(display);
                }

                if self.button.is_pressed() {
                    self.reset_game(display, now);
                }
            }
        }
    }
}
