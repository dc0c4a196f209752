//! Monotonic millisecond clock for effect timing.

use instant::Instant;

/// Elapsed milliseconds since construction. The core API takes explicit
/// `now_ms` values; this is the host-side convenience that produces them on
/// both native and wasm targets.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
