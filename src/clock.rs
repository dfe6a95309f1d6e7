//! Millisecond clock and the elapsed-time helpers every engine shares.
//!
//! Timestamps are `u32` milliseconds that wrap after ~49.7 days. Elapsed
//! time is always taken with wrapping subtraction, which stays correct
//! across a single wrap of the counter.

/// Milliseconds since boot.
pub type Millis = u32;

/// A monotonic, read-only millisecond counter.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Time from `since` to `now`.
#[inline]
#[must_use]
pub const fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// Rate limiter for idle redraws.
///
/// [`ready`](Throttle::ready) fires on the first call and afterwards at most
/// once per `period`.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    period: Millis,
    last: Option<Millis>,
}

impl Throttle {
    pub const fn new(period: Millis) -> Self {
        Self { period, last: None }
    }

    /// Returns `true` (and restarts the period) when a redraw is due.
    pub fn ready(&mut self, now: Millis) -> bool {
        match self.last {
            Some(last) if elapsed(now, last) < self.period => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Record a redraw that happened outside of [`ready`](Throttle::ready).
    pub const fn mark(&mut self, now: Millis) {
        self.last = Some(now);
    }
}

/// Clock backed by the embassy time driver (started by `esp-rtos`).
#[cfg(feature = "badge")]
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "badge")]
impl Clock for EmbassyClock {
    fn now_ms(&self) -> Millis {
        // Truncation is the documented wrap of the u32 counter.
        embassy_time::Instant::now().as_millis() as Millis
    }
}
