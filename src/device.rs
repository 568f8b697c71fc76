//! RGB output devices and their discovery.
//!
//! [`LightDevice`] is the write seam used by the driver. [`SysfsDevice`]
//! drives a Linux LED class triple (`<name>:red`, `<name>:green`,
//! `<name>:blue`) by writing each channel's `brightness` file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::colors::Color;

/// Default sysfs directory holding LED class devices.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/leds";

const CHANNELS: [&str; 3] = ["red", "green", "blue"];

/// Errors raised by device discovery or writes.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Reading or writing a device file failed.
    #[error("{path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl DeviceError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DeviceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Trait for abstracting RGB output hardware.
pub trait LightDevice {
    /// Human-readable device name used in logs and errors.
    fn name(&self) -> &str;

    /// Writes `color` to the device.
    ///
    /// # Errors
    /// Any failure is reported; the caller decides whether it is fatal.
    fn write(&mut self, color: Color) -> Result<(), DeviceError>;
}

impl<D: LightDevice + ?Sized> LightDevice for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn write(&mut self, color: Color) -> Result<(), DeviceError> {
        (**self).write(color)
    }
}

/// An RGB device made of three sysfs LED class channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsDevice {
    root: PathBuf,
    name: String,
}

impl SysfsDevice {
    /// Creates a device for `<root>/<name>:{red,green,blue}`.
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    /// Path of one channel's directory.
    fn channel_dir(&self, channel: &str) -> PathBuf {
        self.root.join(format!("{}:{}", self.name, channel))
    }

    /// Path of one channel's `brightness` file.
    pub fn brightness_path(&self, channel: &str) -> PathBuf {
        self.channel_dir(channel).join("brightness")
    }
}

impl LightDevice for SysfsDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, color: Color) -> Result<(), DeviceError> {
        for (channel, level) in CHANNELS.into_iter().zip([color.red, color.green, color.blue]) {
            let path = self.brightness_path(channel);
            fs::write(&path, level.to_string()).map_err(|err| DeviceError::io(path, err))?;
        }
        trace!(device = %self.name, r = color.red, g = color.green, b = color.blue, "wrote color");
        Ok(())
    }
}

/// Finds every complete RGB triple under `root`.
///
/// An entry named `<name>:red` counts when `<name>:green` and `<name>:blue`
/// are directories too. Devices are sorted by name.
pub fn discover_sysfs_devices(root: impl AsRef<Path>) -> Result<Vec<SysfsDevice>, DeviceError> {
    let root = root.as_ref();
    let entries = fs::read_dir(root).map_err(|err| DeviceError::io(root, err))?;

    let mut devices = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| DeviceError::io(root, err))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str().and_then(|n| n.strip_suffix(":red")) else {
            continue;
        };

        let device = SysfsDevice::new(root, name);
        if device.channel_dir("green").is_dir() && device.channel_dir("blue").is_dir() {
            devices.push(device);
        } else {
            debug!(device = name, "skipping red channel without green and blue siblings");
        }
    }

    devices.sort_by(|a, b| a.name.cmp(&b.name));
    for device in &devices {
        info!(device = %device.name, root = %root.display(), "discovered RGB device");
    }
    Ok(devices)
}

/// A device that only logs the colors it receives.
///
/// Useful for dry runs on machines without LEDs.
#[derive(Debug, Clone, PartialEq)]
pub struct LogDevice {
    name: String,
    last: Option<Color>,
    writes: usize,
}

impl LogDevice {
    /// Creates a named log device.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last: None,
            writes: 0,
        }
    }

    /// Last color written, if any.
    pub fn last_color(&self) -> Option<Color> {
        self.last
    }

    /// Number of writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl LightDevice for LogDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, color: Color) -> Result<(), DeviceError> {
        debug!(device = %self.name, r = color.red, g = color.green, b = color.blue, "color");
        self.last = Some(color);
        self.writes += 1;
        Ok(())
    }
}
