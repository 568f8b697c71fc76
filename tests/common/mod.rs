//! Shared test infrastructure for rgb-ambient integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rgb_ambient::{Color, DeviceError, HsvColor, LightDevice, Pacer};

// ============================================================================
// Mock Device
// ============================================================================

/// Mock device that records every color written to it
pub struct MockDevice {
    name: String,
    history: Vec<Color>,
    fail_after: Option<usize>,
}

impl MockDevice {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            history: Vec::new(),
            fail_after: None,
        }
    }

    /// Device whose writes start failing after `writes` successful ones
    pub fn failing_after(name: &str, writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::new(name)
        }
    }

    pub fn history(&self) -> &[Color] {
        &self.history
    }

    pub fn last_color(&self) -> Option<Color> {
        self.history.last().copied()
    }
}

impl LightDevice for MockDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, color: Color) -> Result<(), DeviceError> {
        if self.fail_after.is_some_and(|limit| self.history.len() >= limit) {
            return Err(DeviceError::Io {
                path: PathBuf::from(format!("/mock/{}", self.name)),
                source: std::io::Error::other("device unplugged"),
            });
        }
        self.history.push(color);
        Ok(())
    }
}

/// Creates `count` mock devices named `d0`, `d1`, ...
pub fn mock_devices(count: usize) -> Vec<MockDevice> {
    (0..count).map(|i| MockDevice::new(&format!("d{i}"))).collect()
}

// ============================================================================
// Mock Pacer
// ============================================================================

/// Pacer that records requested delays instead of sleeping
#[derive(Default)]
pub struct RecordingPacer {
    pub delays: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) {
        self.delays.push(delay);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Compare two floats with an explicit tolerance
pub fn values_equal_epsilon(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Shortest distance between two hues on the color wheel
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(1.0);
    d.min(1.0 - d)
}

/// Compare two hues modulo 1 with tolerance
pub fn hues_equal(a: f64, b: f64) -> bool {
    hue_distance(a, b) < 1e-9
}

pub fn hues(colors: &[HsvColor]) -> Vec<f64> {
    colors.iter().map(|c| c.h).collect()
}

/// A fresh, empty directory under the OS temp dir
pub fn scratch_dir(label: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "rgb-ambient-{label}-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
