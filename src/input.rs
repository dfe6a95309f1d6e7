//! Level-sampled button input.
//!
//! Buttons are read raw once per tick: no debouncing and no interrupts.
//! Games that need discrete presses layer a [`PressLatch`] on top.

use embedded_hal::digital::{
    Error as _,
    InputPin,
};

/// Anything that can report whether a button is currently held.
pub trait Button {
    fn is_pressed(&mut self) -> bool;
}

impl<B: Button + ?Sized> Button for &mut B {
    fn is_pressed(&mut self) -> bool {
        (**self).is_pressed()
    }
}

/// Electrical level that counts as "pressed".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// A [`Button`] on a GPIO input pin.
pub struct PinButton<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> PinButton<P> {
    pub const fn new(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Button that pulls the pin high when pressed.
    pub const fn active_high(pin: P) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    /// Button wired to ground with a pull-up, as on the badge.
    pub const fn active_low(pin: P) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Button for PinButton<P> {
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high == (self.active == ActiveLevel::High),
            Err(e) => {
                warn!("button read failed: {:?}", e.kind());
                false
            }
        }
    }
}

/// Turns level samples into discrete presses.
///
/// A press is reported once when the level goes asserted, and only if the
/// button was seen released since the previous press.
#[derive(Clone, Copy, Debug)]
pub struct PressLatch {
    armed: bool,
}

impl Default for PressLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl PressLatch {
    pub const fn new() -> Self {
        Self { armed: true }
    }

    /// Feed one level sample; returns `true` on a fresh press.
    pub const fn poll(&mut self, pressed: bool) -> bool {
        if !pressed {
            self.armed = true;
            return false;
        }
        let fresh = self.armed;
        self.armed = false;
        fresh
    }

    /// Require a release before the next press is reported.
    pub const fn hold(&mut self) {
        self.armed = false;
    }
}
