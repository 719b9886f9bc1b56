use core::fmt;

/// Faults raised by user-pointer validation.
///
/// Any of these means a user process handed the kernel an address it is not
/// allowed to touch. They are never surfaced to the process as an error
/// code: the dispatch layer converts them into forced termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessFault {
    /// A null pointer where a real address was required.
    Null,
    /// An address (or the end of a range) outside the user region.
    /// - `address`: the violating address
    /// - `limit`: one past the highest legal address of the space
    OutOfRange { address: usize, limit: usize },
    /// `address + len` wrapped around the address space.
    Overflow { address: usize, len: usize },
}

impl fmt::Display for AccessFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessFault::Null => write!(f, "null user pointer"),
            AccessFault::OutOfRange { address, limit } => {
                write!(f, "address {:#x} outside user space (limit {:#x})", address, limit)
            }
            AccessFault::Overflow { address, len } => {
                write!(f, "range {:#x}+{} overflows the address space", address, len)
            }
        }
    }
}
