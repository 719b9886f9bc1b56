//! trapgate — the user/kernel boundary of a teaching operating system.
//!
//! This crate is the syscall layer: it takes a raw trap out of user mode,
//! decodes a numbered request and its argument words from the untrusted
//! user stack, validates every pointer before it is touched, dispatches to
//! the right operation, and either writes a result back into the trap frame
//! or terminates the offending process.
//!
//! # Architectural overview
//! ```text
//! trap ─> argument extractor ─> pointer validator ─> dispatcher
//!                                                        │
//!                 ┌──────────────┬───────────────────────┤
//!                 ▼              ▼                       ▼
//!          descriptor table  file-system gate   process control / console
//!                 │              │                       │
//!                 └──────> result into trap frame <──────┘
//!                                (or Exit Path)
//! ```
//!
//! The file system, scheduler, process creation and console are external
//! collaborators behind traits ([`fs::FileSystem`], [`task::ProcessControl`],
//! [`io::Console`]); the [`Kernel`] bundle carries them together with the
//! single File-System Gate that serializes access to the non-reentrant
//! file system.
//!
//! # Error model
//! Recoverable operation failures are sentinel return values to user code.
//! Contract violations — a pointer outside the user region, a handle that
//! is not open, an unknown syscall number — run the Exit Path with status
//! -1 and never return to the call site.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod fs;
pub mod io;
pub mod kernel;
pub mod logging;
pub mod mm;
pub mod syscall;
pub mod task;
pub mod trap;

pub use kernel::Kernel;
pub use task::{Pid, ProcState, Process, ProcessControl};
pub use trap::{handle_syscall, TrapContext, TrapOutcome};
