//! Contract violations.
//!
//! Recoverable operation failures (missing file, full table, invalid seek)
//! are reported to user code as sentinel return values and never appear
//! here. A `Violation` is the other class: the process broke a syscall
//! precondition, and the trap layer answers by running the Exit Path with
//! status -1. Nothing is ever returned to the violating call site.

use core::fmt;

use crate::mm::AccessFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A pointer argument failed validation.
    BadAccess(AccessFault),
    /// A handle that is reserved, out of range, or not open.
    BadHandle(usize),
    /// A syscall number this kernel does not recognize.
    UnknownSyscall(usize),
}

impl From<AccessFault> for Violation {
    fn from(fault: AccessFault) -> Self {
        Violation::BadAccess(fault)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::BadAccess(fault) => write!(f, "bad user access: {}", fault),
            Violation::BadHandle(fd) => write!(f, "handle {} is not open", fd),
            Violation::UnknownSyscall(number) => write!(f, "unknown syscall {}", number),
        }
    }
}
