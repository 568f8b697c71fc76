//! Concrete [`Effect`](crate::effect::Effect) implementations.
//!
//! - [`HsvCycleEffect`]: linear hue drift plus bounded S/V oscillation
//! - [`CombinedEffects`]: several effects applied in order to the same colors
//! - [`RandomEffect`]: independent random hue per color every step
//! - [`ChristmasEffect`]: synchronized fade with round-robin palette hues
//! - [`ChristmasRandomEffect`]: one shared fade, evenly spread random hues on each switch
//! - [`ChristmasAsyncEffect`]: desynchronized per-color fades with random hues
//! - [`SpreadResetEffect`]: re-homogenizes all colors into an even spread

mod christmas;
mod combined;
mod cycle;
mod random;
mod spread_reset;

pub use christmas::{ChristmasAsyncEffect, ChristmasEffect, ChristmasRandomEffect, DEFAULT_HUES};
pub use combined::CombinedEffects;
pub use cycle::HsvCycleEffect;
pub use random::RandomEffect;
pub use spread_reset::SpreadResetEffect;
