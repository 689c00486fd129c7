// app/src/services/fault.rs

use std::sync::atomic::{AtomicUsize, Ordering};

/// Countdown the in-memory collaborators use to fail one chosen call.
/// Disarmed at zero.
#[derive(Debug, Default)]
pub struct FaultTrigger(AtomicUsize);

impl FaultTrigger {
  /// Makes the `nth` call from now fail (1 = the next one).
  pub fn arm(&self, nth: usize) {
    self.0.store(nth, Ordering::SeqCst);
  }

  /// Counts one call; true when this is the call that must fail.
  pub fn trips(&self) -> bool {
    self
      .0
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
      .map(|previous| previous == 1)
      .unwrap_or(false)
  }
}
