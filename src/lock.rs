use std::sync::{Mutex, MutexGuard};

/// Lock a mutex shared with the audio callback thread, taking the data back
/// if a callback panicked while holding it.
pub(crate) fn lock_or_recover<'a, T>(lock: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        crate::log_debug(&format!("{context}: mutex poisoned; recovering"));
        poisoned.into_inner()
    })
}
