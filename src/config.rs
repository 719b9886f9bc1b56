//! Compile-time constants shared across the syscall layer.

/// Width of one machine word on the trapping process's stack. Syscall
/// arguments are pushed as whole words regardless of their C type.
pub const WORD_SIZE: usize = core::mem::size_of::<usize>();

/// A syscall carries at most this many argument words after its number.
pub const MAX_SYSCALL_ARGS: usize = 4;

/// Capacity of a process's descriptor table, reserved handles included.
pub const MAX_OPEN_FILES: usize = 128;

pub const FD_STDIN: usize = 0;  // console input
pub const FD_STDOUT: usize = 1; // console output
pub const FD_EXEC: usize = 2;   // the process's own executable image

/// First handle the descriptor table may hand out.
pub const FIRST_USER_FD: usize = 3;
