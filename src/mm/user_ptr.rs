//! Typed access to user-space memory.
//!
//! [`UserAddr`] is the only form in which a raw word from the trap frame may
//! travel through the dispatcher: it carries no way to dereference. To read
//! or write through it, wrap it in a [`UserPtr`] and go through one of the
//! accessors here, each of which validates against the owning [`UserSpace`]
//! before touching a byte.

use core::marker::PhantomData;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::error::AccessFault;
use super::UserSpace;
use crate::config::WORD_SIZE;

/// An unchecked user-space address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAddr(usize);

impl UserAddr {
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> usize {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Address `count` bytes further on, or `None` on wrap-around.
    pub fn offset(self, count: usize) -> Option<Self> {
        self.0.checked_add(count).map(Self)
    }
}

/// A typed view of a user address, in the spirit of a raw `*const T` that
/// cannot be dereferenced without validation.
pub struct UserPtr<T> {
    addr: UserAddr,
    _marker: PhantomData<*const T>,
}

impl<T> UserPtr<T> {
    pub fn new(addr: UserAddr) -> Self {
        Self {
            addr,
            _marker: PhantomData,
        }
    }

    pub fn addr(&self) -> UserAddr {
        self.addr
    }
}

impl UserPtr<usize> {
    /// Reads one little-endian machine word.
    pub fn read(&self, space: &UserSpace) -> Result<usize, AccessFault> {
        space.check_range(self.addr, WORD_SIZE)?;
        let mut bytes = [0u8; WORD_SIZE];
        space.read(self.addr.raw(), &mut bytes);
        Ok(usize::from_le_bytes(bytes))
    }
}

impl UserPtr<u8> {
    /// Reads a NUL-terminated string, validating every byte as it walks.
    /// A string that runs off the end of the user region faults before the
    /// first out-of-range byte is read.
    pub fn read_str(&self, space: &UserSpace) -> Result<String, AccessFault> {
        let mut bytes = Vec::new();
        let mut cursor = self.addr;
        loop {
            space.check_addr(cursor)?;
            let mut byte = [0u8; 1];
            space.read(cursor.raw(), &mut byte);
            if byte[0] == 0 {
                break;
            }
            bytes.push(byte[0]);
            cursor = cursor.offset(1).ok_or(AccessFault::Overflow {
                address: self.addr.raw(),
                len: bytes.len(),
            })?;
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Copies `len` bytes out of user space.
    pub fn read_buf(&self, space: &UserSpace, len: usize) -> Result<Vec<u8>, AccessFault> {
        space.check_range(self.addr, len)?;
        let mut out = vec![0; len];
        space.read(self.addr.raw(), &mut out);
        Ok(out)
    }

    /// Copies bytes into user space.
    pub fn write_buf(&self, space: &mut UserSpace, data: &[u8]) -> Result<(), AccessFault> {
        space.check_range(self.addr, data.len())?;
        space.write(self.addr.raw(), data);
        Ok(())
    }
}
