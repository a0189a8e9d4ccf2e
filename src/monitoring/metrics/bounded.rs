//! Bounded collection utilities for metrics

use std::collections::VecDeque;

/// Maximum number of recent batch records to retain
pub const MAX_RECENT_RECORDS: usize = 1_000;

/// Helper trait for bounded VecDeque operations
pub(super) trait BoundedPush<T> {
    fn push_bounded(&mut self, value: T, max_size: usize);
}

impl<T> BoundedPush<T> for VecDeque<T> {
    /// Push a value, evicting the oldest one once `max_size` is reached
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) {
        if self.len() >= max_size {
            self.pop_front();
        }
        self.push_back(value);
    }
}
