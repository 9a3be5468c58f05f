//! Stack growth for nested scans.
//!
//! A delegated or recursive range is lexed by a complete scan that runs on
//! the caller's thread, inside the callback frame of the outer scan. Deeply
//! nested markup can stack many of these frames before
//! `max_delegation_depth` cuts them off, so each nested scan is entered
//! through [`ensure_sufficient_stack`]. On wasm32 it calls straight through.

/// Headroom for one nested scan, callback frames included.
#[cfg(not(target_arch = "wasm32"))]
const SCAN_HEADROOM: usize = 128 * 1024;

/// Size of each extra stack segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT: usize = 2 * 1024 * 1024;

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(scan: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(SCAN_HEADROOM, SEGMENT, scan)
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(scan: impl FnOnce() -> R) -> R {
    scan()
}
