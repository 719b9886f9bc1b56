//! User address-space model and pointer validation.
//!
//! The syscall layer never dereferences a user-supplied address directly.
//! Raw words coming off the trap frame are wrapped as opaque [`UserAddr`]
//! values, and every access goes through [`UserSpace::check_addr`] or
//! [`UserSpace::check_range`] first. Validation failure is reported as an
//! [`AccessFault`], which the dispatch layer treats as fatal to the process.

pub mod error;
pub mod user_ptr;

pub use error::AccessFault;
pub use user_ptr::{UserAddr, UserPtr};

use alloc::vec;
use alloc::vec::Vec;

/// The region of the address space a user process may legally reference.
///
/// Paging is out of scope for this layer, so the space is modeled as one
/// contiguous byte region starting at a non-zero base. The backing bytes
/// stand in for whatever the loader mapped there.
pub struct UserSpace {
    base: usize,
    mem: Vec<u8>,
}

impl UserSpace {
    /// Creates a zero-filled user region. `base` must be non-zero so that a
    /// null pointer can never validate.
    pub fn new(base: usize, size: usize) -> Self {
        debug_assert!(base != 0, "user region must not start at address 0");
        Self {
            base,
            mem: vec![0; size],
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn size(&self) -> usize {
        self.mem.len()
    }

    /// One past the highest address user code may touch.
    pub fn limit(&self) -> usize {
        self.base + self.mem.len()
    }

    /// Validates a single user address.
    pub fn check_addr(&self, addr: UserAddr) -> Result<(), AccessFault> {
        self.check_range(addr, 1)
    }

    /// Validates a full range of `len` bytes starting at `addr`.
    ///
    /// Both ends are checked: a range may begin inside the region and run
    /// past its end, and that must fault just like a bad start address.
    pub fn check_range(&self, addr: UserAddr, len: usize) -> Result<(), AccessFault> {
        if addr.is_null() {
            return Err(AccessFault::Null);
        }
        let start = addr.raw();
        let end = start
            .checked_add(len)
            .ok_or(AccessFault::Overflow { address: start, len })?;
        if start < self.base || end > self.limit() {
            return Err(AccessFault::OutOfRange {
                address: start,
                limit: self.limit(),
            });
        }
        Ok(())
    }

    /// Copies bytes into the region, for loaders and test fixtures.
    pub fn load(&mut self, addr: usize, bytes: &[u8]) -> Result<(), AccessFault> {
        self.check_range(UserAddr::new(addr), bytes.len())?;
        self.write(addr, bytes);
        Ok(())
    }

    /// Copies bytes out of the region, validated.
    pub fn fetch(&self, addr: usize, len: usize) -> Result<Vec<u8>, AccessFault> {
        self.check_range(UserAddr::new(addr), len)?;
        let mut out = vec![0; len];
        self.read(addr, &mut out);
        Ok(out)
    }

    /// Raw read. Callers must have validated the range.
    pub(crate) fn read(&self, addr: usize, out: &mut [u8]) {
        let offset = addr - self.base;
        out.copy_from_slice(&self.mem[offset..offset + out.len()]);
    }

    /// Raw write. Callers must have validated the range.
    pub(crate) fn write(&mut self, addr: usize, data: &[u8]) {
        let offset = addr - self.base;
        self.mem[offset..offset + data.len()].copy_from_slice(data);
    }
}
