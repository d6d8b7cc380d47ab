//! OS shutdown signals
//!
//! SIGINT, SIGTERM and SIGHUP only raise a flag; the dispatch loop sees it
//! on its next poll timeout and tears down normally.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

pub fn shutdown_requested() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

#[cfg(unix)]
extern "C" fn on_signal(_signal: libc::c_int) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

#[cfg(unix)]
pub fn install() {
    let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
    for signal in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
        // SAFETY: the handler only stores to an atomic
        let previous = unsafe { libc::signal(signal, handler) };
        if previous == libc::SIG_ERR {
            tracing::warn!(signal, "failed to install signal handler");
        }
    }
}

/// Ctrl+C arrives as a key event in raw mode
#[cfg(not(unix))]
pub fn install() {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_signal_sets_flag() {
        install();
        assert!(!shutdown_requested());
        // SAFETY: raising a handled signal in-process
        unsafe {
            libc::raise(libc::SIGHUP);
        }
        assert!(shutdown_requested());
        SHUTDOWN.store(false, Ordering::SeqCst);
    }
}
