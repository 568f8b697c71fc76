//! Hue spreading for visually distinct initial colors.
//!
//! Colors are placed on the color wheel by repeatedly adding a fixed hue
//! distance, modulo one. With the golden-ratio distance the first `k` points
//! stay well separated for every `k`, so the device count does not need to be
//! known up front.

use serde::Deserialize;

use crate::colors::HsvColor;

/// Golden-ratio hue step, `2 / (1 + sqrt(5))`.
pub const GOLDEN_DISTANCE: f64 = 0.618_033_988_749_894_9;

/// Hue of the first color in a spread (a bright blue).
pub const SPREAD_BASE_HUE: f64 = 0.6;

/// Saturation of every spread color.
pub const SPREAD_SATURATION: f64 = 0.99;

/// Value of every spread color.
pub const SPREAD_VALUE: f64 = 0.7;

/// How far apart consecutive colors of a spread are on the color wheel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadDistance {
    /// [`GOLDEN_DISTANCE`].
    #[default]
    Golden,

    /// `1 / count`: colors split the wheel evenly.
    Even,

    /// A fixed hue distance.
    Fixed(f64),
}

impl SpreadDistance {
    /// Resolves the hue distance for a spread of `count` colors.
    pub fn resolve(self, count: usize) -> f64 {
        match self {
            SpreadDistance::Golden => GOLDEN_DISTANCE,
            SpreadDistance::Even if count == 0 => GOLDEN_DISTANCE,
            SpreadDistance::Even => 1.0 / count as f64,
            SpreadDistance::Fixed(distance) => distance,
        }
    }
}

/// Generates `count` colors spread around the wheel from [`SPREAD_BASE_HUE`].
///
/// Color `i` has hue `(0.6 + distance * i) mod 1`, saturation 0.99 and value 0.7.
/// `None` selects [`GOLDEN_DISTANCE`].
pub fn generate_spread_colors(count: usize, distance: Option<f64>) -> Vec<HsvColor> {
    let distance = distance.unwrap_or(GOLDEN_DISTANCE);
    (0..count)
        .map(|i| HsvColor::new(SPREAD_BASE_HUE + distance * i as f64, SPREAD_SATURATION, SPREAD_VALUE))
        .collect()
}
