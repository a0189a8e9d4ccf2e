//! Result aggregation and status mapping

use super::types::{BatchResult, ExecutionReport, ItemOutcome};

/// Overall batch status from the success/failure counts
///
/// 200 when nothing failed, 400 when nothing succeeded, 207 otherwise.
pub fn overall_status(success_count: usize, failure_count: usize) -> u16 {
    if failure_count == 0 {
        200
    } else if success_count == 0 {
        400
    } else {
        207
    }
}

/// Pre-sized per-batch result arena
///
/// Callers hold it behind one mutex; every slot is written exactly once.
#[derive(Debug)]
pub struct ResultAggregator {
    slots: Vec<Option<BatchResult>>,
    success_count: usize,
    failure_count: usize,
    created_ids: Vec<String>,
}

impl ResultAggregator {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
            success_count: 0,
            failure_count: 0,
            created_ids: Vec::new(),
        }
    }

    /// Store the outcome of item `index`
    ///
    /// Returns false if the index is out of range or already written.
    pub fn record(&mut self, index: usize, outcome: ItemOutcome, track_created: bool) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }

        let ItemOutcome {
            mut result,
            created_id,
        } = outcome;
        result.index = index;

        if result.success {
            self.success_count += 1;
            if track_created {
                if let Some(id) = created_id {
                    self.created_ids.push(id);
                }
            }
        } else {
            self.failure_count += 1;
        }
        *slot = Some(result);
        true
    }

    /// Number of slots still empty
    pub fn missing(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Close the arena, filling empty slots with `fill`
    pub fn finish<F>(self, mut fill: F) -> ExecutionReport
    where
        F: FnMut(usize) -> BatchResult,
    {
        let mut success_count = self.success_count;
        let mut failure_count = self.failure_count;
        let results = self
            .slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let result = fill(index);
                    if result.success {
                        success_count += 1;
                    } else {
                        failure_count += 1;
                    }
                    result
                })
            })
            .collect();

        ExecutionReport {
            results,
            success_count,
            failure_count,
            created_ids: self.created_ids,
        }
    }
}
