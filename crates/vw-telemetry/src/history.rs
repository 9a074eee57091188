//! Bounded rolling history of samples.
//!
//! Oldest entries are evicted first once the capacity is exceeded; survivors
//! keep their chronological order. Eviction is silent.

use std::collections::VecDeque;

use vw_core::limits::{DEFAULT_HISTORY, clamp_history};

use crate::sample::MetricSample;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStore {
    samples: VecDeque<MetricSample>,
    max_history: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl HistoryStore {
    /// Store with a dashboard-configured capacity, clamped to `[10, 1000]`.
    pub fn new(max_history: usize) -> Self {
        Self::with_capacity(clamp_history(max_history))
    }

    /// Store with an arbitrary capacity of at least one sample.
    pub fn with_capacity(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            samples: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_history
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Add a sample at the end, dropping from the front while over capacity.
    pub fn append(&mut self, sample: MetricSample) {
        self.samples.push_back(sample);
        self.evict_to(self.max_history);
    }

    /// Change the capacity (clamped to `[10, 1000]`), evicting immediately if needed.
    pub fn set_capacity(&mut self, max_history: usize) {
        self.max_history = clamp_history(max_history);
        self.evict_to(self.max_history);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Full ordered sequence, oldest first.
    pub fn all(&self) -> &VecDeque<MetricSample> {
        &self.samples
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MetricSample> + ExactSizeIterator + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&MetricSample> {
        self.samples.front()
    }

    fn evict_to(&mut self, limit: usize) {
        let excess = self.samples.len().saturating_sub(limit);
        if excess > 0 {
            self.samples.drain(..excess);
            tracing::trace!(evicted = excess, retained = self.samples.len(), "history evicted");
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use vw_core::CellReading;

    fn sample(tag: usize) -> MetricSample {
        let reading = CellReading {
            current: tag as f64,
            ..CellReading::default()
        };
        MetricSample::new(Utc::now(), vec![reading]).unwrap()
    }

    proptest! {
        #[test]
        fn length_never_exceeds_capacity(cap in 1_usize..50, appends in 0_usize..200) {
            let mut store = HistoryStore::with_capacity(cap);
            for i in 0..appends {
                store.append(sample(i));
                prop_assert!(store.len() <= store.capacity());
            }
            prop_assert_eq!(store.len(), appends.min(cap));
        }

        #[test]
        fn eviction_is_fifo(cap in 1_usize..30, extra in 1_usize..30) {
            let mut store = HistoryStore::with_capacity(cap);
            for i in 0..cap {
                store.append(sample(i));
            }
            for i in cap..cap + extra {
                let second_oldest = store.iter().nth(1).map(|s| s.cells()[0].current);
                store.append(sample(i));
                let oldest = store.oldest().map(|s| s.cells()[0].current);
                if cap > 1 {
                    prop_assert_eq!(oldest, second_oldest);
                } else {
                    prop_assert_eq!(oldest, Some(i as f64));
                }
            }
            let tags: Vec<f64> = store.iter().map(|s| s.cells()[0].current).collect();
            let expected: Vec<f64> = (extra..cap + extra).map(|i| i as f64).collect();
            prop_assert_eq!(tags, expected);
        }
    }
}
