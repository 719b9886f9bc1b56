//! The File-System Gate.
//!
//! The underlying file system is not reentrant, so a single lock serializes
//! every operation that touches it across all processes. Console writes
//! share the same gate so interleaved output stays deterministic.
//!
//! The gate is an explicit object owned by the [`Kernel`](crate::Kernel)
//! bundle, never a hidden singleton, and it is only ever held through the
//! RAII [`FsGateGuard`]: any exit path out of a syscall handler drops the
//! guard before control can reach the Exit Path.

use spin::{Mutex, MutexGuard};

pub struct FsGate {
    inner: Mutex<()>,
}

impl FsGate {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }

    /// Acquires the gate, spinning until it is free.
    pub fn enter(&self) -> FsGateGuard<'_> {
        FsGateGuard {
            _inner: self.inner.lock(),
        }
    }

    pub fn is_held(&self) -> bool {
        self.inner.is_locked()
    }
}

impl Default for FsGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the gate on drop.
pub struct FsGateGuard<'a> {
    _inner: MutexGuard<'a, ()>,
}
