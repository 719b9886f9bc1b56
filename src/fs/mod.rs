//! File-system collaborator seam.
//!
//! The file system itself lives outside this crate. The dispatch layer only
//! sees these two traits, plus the [`FsGate`] that serializes every call
//! into them.

pub mod gate;

pub use gate::{FsGate, FsGateGuard};

use alloc::sync::Arc;

/// One open file resource, byte-stream semantics with a cursor.
///
/// `read`/`write` advance the cursor and return the byte count actually
/// transferred; a write against a deny-write resource transfers nothing.
/// The underlying resource is released when the last reference is dropped,
/// which the descriptor table and exit path do under the gate.
pub trait File: Send + Sync {
    fn read(&self, buf: &mut [u8]) -> usize;
    fn write(&self, buf: &[u8]) -> usize;
    fn length(&self) -> usize;
    fn seek(&self, pos: usize);
    fn tell(&self) -> usize;
    /// Forbid writes through any handle to this resource until it is
    /// released. Used to protect a running executable from self-modification.
    fn deny_write(&self);
}

/// The flat file-system namespace the kernel delegates to.
pub trait FileSystem: Send + Sync {
    fn open(&self, path: &str) -> Option<Arc<dyn File>>;
    /// Creates an empty file of `size` bytes. Fails if the name is taken.
    fn create(&self, path: &str, size: usize) -> bool;
    fn remove(&self, path: &str) -> bool;
}
