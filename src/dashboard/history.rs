//! Bounded pool volume history for the trend chart.

use chrono::Local;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::fmt::Debug;

/// Number of samples kept. Older samples are evicted first.
pub const HISTORY_CAPACITY: usize = 10;

/// Produces the clock label a new sample is stamped with.
pub trait TimeLabeler: Debug + Send + Sync {
    /// Label for the current instant.
    fn label(&self) -> String;
}

/// Local wall clock, minute resolution, 12-hour (`02:05 PM`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl TimeLabeler for LocalClock {
    fn label(&self) -> String {
        Local::now().format("%I:%M %p").to_string()
    }
}

/// One history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSample {
    pub time_label: String,
    pub success_volume: Decimal,
    pub fail_volume: Decimal,
}

/// Ordered, bounded buffer of volume samples.
///
/// Samples and labels are stored side by side and only ever change together,
/// so `samples().len() == labels().len() <= HISTORY_CAPACITY` always holds.
#[derive(Debug)]
pub struct VolumeHistoryStore {
    samples: VecDeque<VolumeSample>,
    labels: VecDeque<String>,
    labeler: Box<dyn TimeLabeler>,
}

impl VolumeHistoryStore {
    /// Create an empty store.
    pub fn new(labeler: Box<dyn TimeLabeler>) -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
            labels: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
            labeler,
        }
    }

    /// Reset the history to a single seed sample.
    pub fn initialize(&mut self, success_volume: Decimal, fail_volume: Decimal) {
        self.samples.clear();
        self.labels.clear();
        let label = self.labeler.label();
        self.push(label, success_volume, fail_volume);
    }

    /// Append a sample if the minute label or either volume changed since the
    /// last one. Returns whether a sample was appended.
    pub fn maybe_append(&mut self, success_volume: Decimal, fail_volume: Decimal) -> bool {
        let Some(last) = self.samples.back() else {
            self.initialize(success_volume, fail_volume);
            return true;
        };

        let label = self.labeler.label();
        let changed = self.labels.back() != Some(&label)
            || last.success_volume != success_volume
            || last.fail_volume != fail_volume;

        if !changed {
            return false;
        }

        self.push(label, success_volume, fail_volume);
        if self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
            self.labels.pop_front();
        }
        true
    }

    fn push(&mut self, label: String, success_volume: Decimal, fail_volume: Decimal) {
        self.labels.push_back(label.clone());
        self.samples.push_back(VolumeSample {
            time_label: label,
            success_volume,
            fail_volume,
        });
    }

    /// Samples, oldest first.
    pub fn samples(&self) -> &VecDeque<VolumeSample> {
        &self.samples
    }

    /// Labels, oldest first.
    pub fn labels(&self) -> &VecDeque<String> {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Success volume series, oldest first.
    pub fn success_series(&self) -> Vec<Decimal> {
        self.samples.iter().map(|s| s.success_volume).collect()
    }

    /// Fail volume series, oldest first.
    pub fn fail_series(&self) -> Vec<Decimal> {
        self.samples.iter().map(|s| s.fail_volume).collect()
    }
}
