//! Shared handle onto one in-flight asynchronous operation.
//!
//! The model side creates a handle, hands clones to whoever wants to watch it
//! and reports progress from a background task. Views only ever read.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use uuid::Uuid;

const RUNNING: u8 = 0;
const SUCCEEDED: u8 = 1;
const FAILED: u8 = 2;

#[derive(Debug)]
struct OperationState {
    id: Uuid,
    /// `f32` bit pattern, always within [0, 1]
    progress: AtomicU32,
    outcome: AtomicU8,
}

/// Read-mostly live view of one unit of asynchronous work.
///
/// Cloning is cheap and every clone observes the same operation.
#[derive(Debug, Clone)]
pub struct OperationHandle {
    state: Arc<OperationState>,
}

impl OperationHandle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(OperationState {
                id: Uuid::new_v4(),
                progress: AtomicU32::new(0f32.to_bits()),
                outcome: AtomicU8::new(RUNNING),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.state.id
    }

    /// Current progress fraction in [0, 1].
    pub fn progress(&self) -> f32 {
        f32::from_bits(self.state.progress.load(Ordering::Acquire))
    }

    pub fn is_finished(&self) -> bool {
        self.state.outcome.load(Ordering::Acquire) != RUNNING
    }

    /// Only `true` once the operation finished and reported success.
    pub fn is_finished_successfully(&self) -> bool {
        self.state.outcome.load(Ordering::Acquire) == SUCCEEDED
    }

    /// Report progress. Values are clamped to [0, 1]; NaN is ignored.
    /// Has no effect once the operation finished.
    pub fn set_progress(&self, fraction: f32) {
        if fraction.is_nan() || self.is_finished() {
            return;
        }
        self.state
            .progress
            .store(fraction.clamp(0.0, 1.0).to_bits(), Ordering::Release);
    }

    /// Mark the operation as finished. The first call wins, later calls are ignored.
    ///
    /// Returns `true` if this call finished the operation.
    pub fn finish(&self, success: bool) -> bool {
        let outcome = if success { SUCCEEDED } else { FAILED };
        let won = self
            .state
            .outcome
            .compare_exchange(RUNNING, outcome, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won && success {
            self.state.progress.store(1f32.to_bits(), Ordering::Release);
        }
        won
    }

    /// Whether two handles observe the same operation.
    pub fn same_operation(&self, other: &OperationHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Default for OperationHandle {
    fn default() -> Self {
        Self::new()
    }
}
