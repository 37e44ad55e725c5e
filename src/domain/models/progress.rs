use super::outcome::{FailedRecipient, SendOutcome};

/// Cumulative job state after a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub successful: usize,
    pub failed: usize,
    pub total_processed: usize,
    pub total_users: usize,
    pub failed_recipients: Vec<FailedRecipient>,
    pub processed_batches: usize,
    pub total_batches: usize,
}

impl ProgressSnapshot {
    pub fn new(total_users: usize, total_batches: usize) -> Self {
        Self {
            total_users,
            total_batches,
            ..Default::default()
        }
    }

    /// Folds one batch worth of outcomes into the running totals.
    pub fn record_batch(&mut self, outcomes: Vec<SendOutcome>) {
        for outcome in outcomes {
            self.total_processed += 1;
            match outcome.into_failure() {
                None => self.successful += 1,
                Some(failure) => {
                    self.failed += 1;
                    self.failed_recipients.push(failure);
                }
            }
        }
        self.processed_batches += 1;
    }

    pub fn is_complete(&self) -> bool {
        self.total_processed == self.total_users
    }

    pub fn failed_ids(&self) -> Vec<String> {
        self.failed_recipients.iter().map(ToString::to_string).collect()
    }
}
