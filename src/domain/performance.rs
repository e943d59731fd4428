//! Rolling realized-return history used for ensemble weighting.

use std::collections::VecDeque;

pub const HISTORY_CAPACITY: usize = 100;
pub const DEFAULT_WINDOW: usize = 5;

/// Bounded FIFO of realized per-period returns. Oldest entries are evicted first.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceHistory {
    values: VecDeque<f64>,
    capacity: usize,
}

impl Default for PerformanceHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PerformanceHistory {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest.
    pub fn values(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Population standard deviation of the newest `window` entries.
    ///
    /// Returns 0.0 when fewer than `window` entries exist or `window` is 0.
    pub fn metric(&self, window: usize) -> f64 {
        if window == 0 || self.values.len() < window {
            return 0.0;
        }
        let recent: Vec<f64> = self
            .values
            .iter()
            .skip(self.values.len() - window)
            .copied()
            .collect();
        population_stddev(&recent)
    }
}

fn population_stddev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}
