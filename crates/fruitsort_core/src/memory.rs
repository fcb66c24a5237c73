//! Bounded observation memory and the pickup/drop probability laws.

use std::collections::VecDeque;

use fruitsort_data::FruitKind;
use serde::{Deserialize, Serialize};

/// FIFO window of the last `capacity` observations. `None` records a step
/// on which no fruit was in reach.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Memory {
    window: VecDeque<Option<FruitKind>>,
    capacity: usize,
}

impl Memory {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Appends an observation, evicting the oldest ones once full.
    pub fn record(&mut self, observed: Option<FruitKind>) {
        while self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(observed);
    }

    /// Observations oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Option<FruitKind>> {
        self.window.iter()
    }

    /// Local density estimate for `key`:
    /// `(matches + mismatches * error_rate) / len`, or 0 when empty.
    /// Empty observations count as neither.
    pub fn frequency(&self, key: FruitKind, error_rate: f64) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        let (matches, others) = self
            .window
            .iter()
            .fold((0usize, 0usize), |(m, o), seen| match seen {
                Some(kind) if *kind == key => (m + 1, o),
                Some(_) => (m, o + 1),
                None => (m, o),
            });
        (matches as f64 + others as f64 * error_rate) / self.window.len() as f64
    }
}

/// `(k+ / (k+ + f))²`: rare types are picked up, common ones left alone.
#[inline]
pub fn pickup_probability(frequency: f64, k_plus: f64) -> f64 {
    (k_plus / (k_plus + frequency)).powi(2)
}

/// `(f / (k- + f))²`: items are dropped where their type is common.
#[inline]
pub fn release_probability(frequency: f64, k_minus: f64) -> f64 {
    (frequency / (k_minus + frequency)).powi(2)
}
