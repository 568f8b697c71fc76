//! The animation schedule: which effect runs, for how many steps, how fast.

use std::time::Duration;

use crate::effect::Effect;
use crate::types::ConfigurationError;

/// One phase of the animation cycle.
pub struct ScheduleEntry {
    /// Effect applied on every step of this phase.
    pub effect: Box<dyn Effect>,

    /// Number of steps to run. Zero skips the phase (the effect is still reset).
    pub steps: u32,

    /// Pause after each step.
    pub delay: Duration,
}

impl ScheduleEntry {
    /// Creates a schedule entry.
    #[inline]
    pub fn new(effect: Box<dyn Effect>, steps: u32, delay: Duration) -> Self {
        Self { effect, steps, delay }
    }
}

impl core::fmt::Debug for ScheduleEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScheduleEntry")
            .field("effect", &self.effect.name())
            .field("steps", &self.steps)
            .field("delay", &self.delay)
            .finish()
    }
}

/// A validated, non-empty list of schedule entries, run in order and then repeated.
#[derive(Debug)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates a new schedule builder.
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::new()
    }

    /// Number of entries in one cycle.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built schedule.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total steps in one cycle.
    pub fn steps_per_cycle(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.steps)).sum()
    }

    /// Returns a reference to the entry at the given index.
    pub fn get_entry(&self, index: usize) -> Option<&ScheduleEntry> {
        self.entries.get(index)
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut ScheduleEntry> {
        self.entries.get_mut(index)
    }
}

/// Builder for constructing validated schedules.
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    entries: Vec<ScheduleEntry>,
}

impl ScheduleBuilder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends an entry with the delay given as a [`Duration`].
    pub fn entry(mut self, effect: impl Effect + 'static, steps: u32, delay: Duration) -> Self {
        self.entries.push(ScheduleEntry::new(Box::new(effect), steps, delay));
        self
    }

    /// Appends an already boxed effect.
    pub fn boxed_entry(mut self, effect: Box<dyn Effect>, steps: u32, delay: Duration) -> Self {
        self.entries.push(ScheduleEntry::new(effect, steps, delay));
        self
    }

    /// Appends an entry with the delay given in seconds.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidDelay`] if `delay_secs` is negative or not finite.
    pub fn entry_secs(
        self,
        effect: Box<dyn Effect>,
        steps: u32,
        delay_secs: f64,
    ) -> Result<Self, ConfigurationError> {
        let delay = Duration::try_from_secs_f64(delay_secs)
            .map_err(|_| ConfigurationError::InvalidDelay(delay_secs))?;
        Ok(self.boxed_entry(effect, steps, delay))
    }

    /// Builds and validates the schedule.
    ///
    /// # Errors
    /// [`ConfigurationError::EmptySchedule`] if no entries were added.
    pub fn build(self) -> Result<Schedule, ConfigurationError> {
        if self.entries.is_empty() {
            return Err(ConfigurationError::EmptySchedule);
        }
        Ok(Schedule { entries: self.entries })
    }
}
