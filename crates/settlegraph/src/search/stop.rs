//! One-way cancellation flags for the two racing searches.
//!
//! Each search polls its own flag and, when it stops for any reason, raises
//! its peer's flag. Every flag has exactly one writer and one reader, so an
//! atomic with release/acquire ordering is all the synchronization needed.

use std::sync::atomic::{AtomicBool, Ordering};

/// Advisory stop request, polled between candidate evaluations.
#[derive(Debug, Default)]
pub struct StopFlag(AtomicBool);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Raises the peer's flag when dropped, including during a panic unwind.
pub(crate) struct StopPeerOnExit<'a>(pub(crate) &'a StopFlag);

impl Drop for StopPeerOnExit<'_> {
    fn drop(&mut self) {
        self.0.request();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_raises_peer_flag_on_drop() {
        let peer = StopFlag::new();
        assert!(!peer.is_requested());
        {
            let _guard = StopPeerOnExit(&peer);
            assert!(!peer.is_requested());
        }
        assert!(peer.is_requested());
    }

    #[test]
    fn guard_raises_peer_flag_on_panic() {
        let peer = StopFlag::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = StopPeerOnExit(&peer);
            panic!("search blew up");
        }));
        assert!(result.is_err());
        assert!(peer.is_requested());
    }
}
