//! Animation driver: steps the schedule forever and writes every device.
//!
//! Provides [`AnimationDriver`], which exclusively owns the live color
//! sequence for the run and lends it to exactly one effect per step. Devices
//! and colors are matched by position.

use std::convert::Infallible;

use rand::RngCore;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::colors::{HsvColor, InvalidColorParameters};
use crate::device::{DeviceError, LightDevice};
use crate::effect::EffectError;
use crate::pacing::Pacer;
use crate::schedule::Schedule;
use crate::types::ConfigurationError;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum AnimationError {
    /// A color left the HSV domain.
    #[error("device {device} at step {step} of `{effect}`: {source}")]
    InvalidColorParameters {
        /// Index of the device whose color was invalid.
        device: usize,
        /// Effect that was active, or `"initial"` before the first step.
        effect: &'static str,
        /// Step number within the current entry (0 for the initial write).
        step: u32,
        /// Offending components.
        #[source]
        source: InvalidColorParameters,
    },

    /// Mismatched lengths between devices, colors, or effect state.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A device write failed.
    #[error("write to device `{name}` ({device}) at step {step} of `{effect}` failed")]
    Device {
        /// Index of the failing device.
        device: usize,
        /// Name reported by the device.
        name: String,
        /// Effect that was active, or `"initial"` before the first step.
        effect: &'static str,
        /// Step number within the current entry.
        step: u32,
        /// Underlying device error.
        #[source]
        source: DeviceError,
    },
}

/// Drives a set of devices through a looping [`Schedule`].
///
/// # Type Parameters
/// * `D` - Device implementation type
/// * `R` - Random source handed to effects
/// * `P` - Pacer used for the delay between steps
pub struct AnimationDriver<D: LightDevice, R: RngCore, P: Pacer> {
    devices: Vec<D>,
    colors: Vec<HsvColor>,
    schedule: Schedule,
    rng: R,
    pacer: P,
    cycles: u64,
}

impl<D: LightDevice, R: RngCore, P: Pacer> AnimationDriver<D, R, P> {
    /// Creates a driver.
    ///
    /// # Errors
    /// [`ConfigurationError::NoDevices`] for an empty device list, or
    /// [`ConfigurationError::DeviceColorMismatch`] if the lengths differ.
    pub fn new(
        devices: Vec<D>,
        colors: Vec<HsvColor>,
        schedule: Schedule,
        rng: R,
        pacer: P,
    ) -> Result<Self, ConfigurationError> {
        if devices.is_empty() {
            return Err(ConfigurationError::NoDevices);
        }
        if devices.len() != colors.len() {
            return Err(ConfigurationError::DeviceColorMismatch {
                devices: devices.len(),
                colors: colors.len(),
            });
        }

        Ok(Self {
            devices,
            colors,
            schedule,
            rng,
            pacer,
            cycles: 0,
        })
    }

    /// Writes the initial colors, then cycles through the schedule forever.
    ///
    /// Only returns on error.
    pub fn run(&mut self) -> Result<Infallible, AnimationError> {
        self.write_all("initial", 0)?;
        loop {
            self.run_cycle()?;
        }
    }

    /// Runs every schedule entry once, in order.
    pub fn run_cycle(&mut self) -> Result<(), AnimationError> {
        self.cycles += 1;
        info!(cycle = self.cycles, entries = self.schedule.len(), "starting cycle");
        for index in 0..self.schedule.len() {
            self.run_entry(index)?;
        }
        Ok(())
    }

    /// Runs one schedule entry: `steps` times step, write, pause; then reset the effect.
    ///
    /// Out-of-range indices are ignored.
    pub fn run_entry(&mut self, index: usize) -> Result<(), AnimationError> {
        let Self {
            devices,
            colors,
            schedule,
            rng,
            pacer,
            ..
        } = self;
        let Some(entry) = schedule.entry_mut(index) else {
            return Ok(());
        };

        let effect = entry.effect.name();
        debug!(index, effect, steps = entry.steps, delay = ?entry.delay, "running schedule entry");
        for step in 1..=entry.steps {
            entry.effect.step(colors, rng)?;
            write_colors(devices, colors, effect, step)?;
            trace!(effect, step, "step written");
            pacer.pause(entry.delay);
        }
        entry.effect.reset();
        Ok(())
    }

    /// Writes the current colors to every device.
    pub fn write_all(&mut self, effect: &'static str, step: u32) -> Result<(), AnimationError> {
        write_colors(&mut self.devices, &self.colors, effect, step)
    }

    /// Current live colors, one per device.
    pub fn colors(&self) -> &[HsvColor] {
        &self.colors
    }

    /// The devices being driven.
    pub fn devices(&self) -> &[D] {
        &self.devices
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the pacer.
    pub fn pacer(&self) -> &P {
        &self.pacer
    }
}

impl From<EffectError> for AnimationError {
    fn from(err: EffectError) -> Self {
        AnimationError::Configuration(err.into())
    }
}

fn write_colors<D: LightDevice>(
    devices: &mut [D],
    colors: &[HsvColor],
    effect: &'static str,
    step: u32,
) -> Result<(), AnimationError> {
    if devices.len() != colors.len() {
        return Err(ConfigurationError::DeviceColorMismatch {
            devices: devices.len(),
            colors: colors.len(),
        }
        .into());
    }

    for (index, (device, hsv)) in devices.iter_mut().zip(colors).enumerate() {
        let color = hsv
            .to_color()
            .map_err(|source| AnimationError::InvalidColorParameters {
                device: index,
                effect,
                step,
                source,
            })?;
        device.write(color).map_err(|source| AnimationError::Device {
            device: index,
            name: device.name().to_string(),
            effect,
            step,
            source,
        })?;
    }
    Ok(())
}
