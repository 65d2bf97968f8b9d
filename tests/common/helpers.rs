use std::thread;
use std::time::{Duration, Instant};

/// Polls `condition` until it holds or `timeout` passes.
pub fn wait_until<F: FnMut() -> bool>(timeout: Duration, mut condition: F) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    condition()
}

/// Generous bound for threaded tests on slow machines
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(10);
