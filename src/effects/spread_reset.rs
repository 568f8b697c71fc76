use rand::RngCore;

use crate::colors::HsvColor;
use crate::effect::{Effect, EffectError};
use crate::spread::generate_spread_colors;

/// Overwrites all colors with an even spread around the wheel.
///
/// The first color takes the head of a fresh spread; each following color
/// copies its predecessor's saturation and value and shifts the hue by
/// `1 / count`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadResetEffect;

impl Effect for SpreadResetEffect {
    fn name(&self) -> &'static str {
        "spread_reset"
    }

    fn step(&mut self, colors: &mut [HsvColor], _rng: &mut dyn RngCore) -> Result<(), EffectError> {
        let distance = match colors.len() {
            0 => return Ok(()),
            count => 1.0 / count as f64,
        };

        let spread = generate_spread_colors(colors.len(), Some(distance));
        colors[0] = spread[0];
        for i in 1..colors.len() {
            let previous = colors[i - 1];
            colors[i].set_hsv(previous.h + distance, previous.s, previous.v);
        }
        Ok(())
    }
}
