//! Timer-driven value stabilizer backing the list filter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Generation-counted debouncer: each `settle` call supersedes the ones
/// before it, and only the latest call reports settled once the delay has
/// passed without a newer call arriving.
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Waits out the delay; returns `true` only if no newer `settle` call
    /// started in the meantime.
    pub async fn settle(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        generation == self.generation.load(Ordering::SeqCst)
    }
}
