//! Pacing abstraction for the delay between animation steps.

use std::time::Duration;

/// Trait for abstracting how the driver waits between steps.
pub trait Pacer {
    /// Blocks for `delay`.
    fn pause(&mut self, delay: Duration);
}

/// Pacer backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, delay: Duration) {
        (**self).pause(delay)
    }
}
