//! Runner and reaction duel on the badge's emulated 16×2 character LCD.
//!
//! Controls:
//! - Up: jump (runner)
//! - Left / A: player one / player two (reaction duel)
//! - Start: switch game
//!
//! One loop drives everything: the selected game gets one `run()` per frame,
//! then the character grid repaints whatever cells changed.

#![no_std]
#![no_main]

use defmt::{
    error,
    info,
};
#[allow(clippy::wildcard_imports)]
use disobey2026_lcd_games::*;
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Instant,
    Timer,
};
use esp_backtrace as _;
use esp_hal::{
    gpio::Output,
    timer::timg::TimerGroup,
};
use esp_println as _;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

// Frame tick
const TICK_MS: u64 = 20;

#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
enum Selected {
    Runner,
    Reaction,
}

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = disobey2026_lcd_games::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let _backlight: Output<'static> = resources.backlight.into();
    let mut lcd: Lcd<'static> = resources.display.into();
    let Controls {
        jump,
        player_one,
        player_two,
        mut next_game,
    } = resources.buttons.into();

    // Boot time differs run to run; good enough to vary the GO delays.
    let seed = Instant::now().as_ticks() as u32;
    let mut runner = Runner::new(jump, EmbassyClock, RunnerConfig::default());
    let mut reaction = Reaction::new(
        player_one,
        player_two,
        EmbassyClock,
        ReactionConfig::default().with_seed(seed),
    );

    let mut selected = Selected::Runner;
    runner.setup(&mut lcd);
    info!("arcade: starting with {}", selected);

    let mut menu = PressLatch::new();
    let mut duel_done = false;

    let tick = Duration::from_millis(TICK_MS);
    let mut next_frame = Instant::now() + tick;

    loop {
        if menu.poll(next_game.is_pressed()) {
            selected = match selected {
                Selected::Runner => {
                    reaction.setup(&mut lcd);
                    Selected::Reaction
                }
                Selected::Reaction => {
                    runner.setup(&mut lcd);
                    Selected::Runner
                }
            };
            info!("arcade: switched to {}", selected);
        }

        match selected {
            Selected::Runner => runner.run(&mut lcd),
            Selected::Reaction => {
                reaction.run(&mut lcd);
                let done = reaction.is_complete();
                if done && !duel_done {
                    info!("arcade: duel over, Start switches back to the runner");
                }
                duel_done = done;
            }
        }

        if lcd.flush().is_err() {
            error!("arcade: display flush failed");
        }

        Timer::at(next_frame).await;
        next_frame += tick;
    }
}
