//! # disobey2026-lcd-games
//!
//! Small non-blocking games for a 16×2 character LCD, driven by raw button
//! levels and a millisecond clock:
//! - **Runner**: one button, hop over the obstacle scrolling in from the right
//! - **Reaction duel**: two players wait for a random GO and race to press
//!
//! Every game is a tick-driven state machine behind the [`Game`] trait. The
//! driver calls [`Game::run`] once per loop iteration; a game never sleeps,
//! so several of them can share one loop with a menu or anything else.
//!
//! The engines only need the [`CharDisplay`], [`Button`] and [`Clock`]
//! capabilities and build on the host. With the `badge` feature the crate
//! also brings up the Disobey 2026 badge: the ST7789 panel shows an emulated
//! character LCD ([`CellGrid`]) and the badge buttons become game controls.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = disobey2026_lcd_games::init();
//! let resources = disobey2026_lcd_games::split_resources!(peripherals);
//!
//! let mut lcd: disobey2026_lcd_games::Lcd = resources.display.into();
//! let controls: disobey2026_lcd_games::Controls = resources.buttons.into();
//!
//! let mut runner = Runner::new(controls.jump, EmbassyClock, RunnerConfig::default());
//! runner.setup(&mut lcd);
//! loop {
//!     runner.run(&mut lcd);
//!     lcd.flush().ok();
//! }
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod clock;
mod game;
mod grid;
pub mod input;
pub mod lcd;
mod reaction;
mod rng;
mod runner;

#[cfg(feature = "badge")]
mod buttons;
#[cfg(feature = "badge")]
mod display;

#[cfg(test)]
mod testing;

#[cfg(feature = "badge")]
pub use buttons::{
    BadgeButton,
    Controls,
};
#[cfg(feature = "badge")]
pub use clock::EmbassyClock;
pub use clock::{
    Clock,
    Millis,
};
#[cfg(feature = "badge")]
pub use display::{
    Lcd,
    Panel,
};
pub use game::Game;
pub use grid::{
    CellGrid,
    GridStyle,
};
pub use input::{
    Button,
    PinButton,
    PressLatch,
};
pub use lcd::CharDisplay;
pub use reaction::{
    Reaction,
    ReactionConfig,
};
pub use runner::{
    Runner,
    RunnerConfig,
};

#[cfg(feature = "badge")]
use esp_hal::{
    assign_resources,
    clock::{
        Clock as _,
        CpuClock,
    },
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    rom,
};

// ── Pin / peripheral assignments ────────────────────────────────────────────

#[cfg(feature = "badge")]
assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        buttons: ButtonResources<'d> {
            up: GPIO11,
            left: GPIO21,
            a: GPIO13,
            start: GPIO12,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Step the ESP32-S3 CPU clock to `cpu_clock_speed`.
///
/// The hardware needs the PLL selected before the divider changes.
#[cfg(feature = "badge")]
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Initialise the badge and return the raw peripheral set.
///
/// Call once at the top of `main`, then [`split_resources!`] it into the
/// display, backlight and button groups.
#[cfg(feature = "badge")]
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

#[cfg(feature = "badge")]
impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

/// Backlight pin, switched on. Keep it alive for as long as the screen is used.
#[cfg(feature = "badge")]
impl<'a> From<BacklightResources<'a>> for Output<'a> {
    fn from(res: BacklightResources<'a>) -> Self {
        Output::new(res.led, Level::High, OutputConfig::default())
    }
}
