#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`HsvColor`**: The live, mutable color of one device (H in `[0, 1)`, S and V in `[0, 1]`)
//! - **`Color`**: An 8-bit RGBA output color, produced by `HsvColor::to_color`
//! - **`generate_spread_colors`**: Visually distinct starting colors from a golden-ratio hue walk
//! - **`Effect`**: A stateful per-step transform over all colors, with `step` and `reset`
//! - **`Schedule`**: An ordered list of (effect, step count, delay) entries, looped forever
//! - **`AnimationDriver`**: Owns the colors and steps the schedule, writing every device after each step
//! - **`LightDevice`**: Trait to implement for your RGB output hardware
//! - **`Pacer`**: Trait controlling the wait between steps
//!
//! Randomized effects draw from an injected `rand::RngCore`, so a seeded
//! generator gives fully reproducible animations.

pub mod colors;
pub mod config;
pub mod device;
pub mod driver;
pub mod effect;
pub mod effects;
pub mod pacing;
pub mod schedule;
pub mod spread;
pub mod types;

pub use colors::{Color, HsvColor, InvalidColorParameters};
pub use config::{AppConfig, ConfigLoadError, DeviceConfig, EffectConfig};
pub use device::{DeviceError, LightDevice, LogDevice, SysfsDevice, discover_sysfs_devices};
pub use driver::{AnimationDriver, AnimationError};
pub use effect::{Effect, EffectError};
pub use effects::{
    ChristmasAsyncEffect, ChristmasEffect, ChristmasRandomEffect, CombinedEffects, HsvCycleEffect,
    RandomEffect, SpreadResetEffect,
};
pub use pacing::{Pacer, SleepPacer};
pub use schedule::{Schedule, ScheduleBuilder, ScheduleEntry};
pub use spread::{GOLDEN_DISTANCE, SpreadDistance, generate_spread_colors};
pub use types::ConfigurationError;
