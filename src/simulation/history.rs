//! Rolling per-tick history for the power and money charts.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// Samples kept per series
pub const DEFAULT_HISTORY_CAPACITY: usize = 60;

/// Fixed-capacity FIFO. Pushing onto a full buffer evicts the oldest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryBuffer<T> {
    /// A capacity of zero is bumped to one so the latest sample is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: T) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.samples.front()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }

    /// The most recent `count` samples, oldest first
    pub fn recent(&self, count: usize) -> Vec<&T> {
        let start = self.samples.len().saturating_sub(count);
        self.samples.iter().skip(start).collect()
    }
}

impl<T> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<T: Serialize> Serialize for HistoryBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.samples.iter())
    }
}

/// Energy totals recorded after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerSample {
    pub time: NaiveDateTime,
    pub production_kw: f64,
    pub consumption_kw: f64,
}

/// Balance recorded after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoneySample {
    pub time: NaiveDateTime,
    pub money: f64,
}

/// Both chart series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct History {
    pub power_trend: HistoryBuffer<PowerSample>,
    pub money_trend: HistoryBuffer<MoneySample>,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            power_trend: HistoryBuffer::with_capacity(capacity),
            money_trend: HistoryBuffer::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, time: NaiveDateTime, production_kw: f64, consumption_kw: f64, money: f64) {
        self.power_trend.push(PowerSample {
            time,
            production_kw,
            consumption_kw,
        });
        self.money_trend.push(MoneySample { time, money });
    }
}
