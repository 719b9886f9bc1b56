//! Trap entry for syscalls.
//!
//! The board layer saves the user context, builds a [`TrapContext`], and
//! calls [`handle_syscall`]. The outcome tells it whether to return to the
//! same process, hand the (now terminating) process to the scheduler for
//! teardown, or power off. There is no path on which a violating process
//! resumes: a validation or handle violation is converted into the Exit
//! Path right here, after every syscall-held lock is already released.

pub mod context;

pub use context::TrapContext;

use crate::kernel::Kernel;
use crate::syscall::{self, Control};
use crate::task::{self, Process};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Return to the trapping process.
    Resume,
    /// The process ran the Exit Path with this status; schedule teardown.
    Exited(i32),
    /// `halt` was requested; the power collaborator takes over.
    Shutdown,
}

pub fn handle_syscall(proc: &mut Process, kernel: &Kernel, ctx: &mut TrapContext) -> TrapOutcome {
    match syscall::dispatch(proc, kernel, ctx) {
        Ok(Control::Value(value)) => {
            ctx.set_return(value);
            TrapOutcome::Resume
        }
        Ok(Control::NoValue) => TrapOutcome::Resume,
        Ok(Control::Exit(status)) => {
            task::terminate(proc, status, kernel);
            TrapOutcome::Exited(status)
        }
        Ok(Control::Shutdown) => {
            log::info!("pid {} requested halt", proc.pid());
            TrapOutcome::Shutdown
        }
        Err(violation) => {
            log::warn!("pid {} killed: {}", proc.pid(), violation);
            task::terminate(proc, -1, kernel);
            TrapOutcome::Exited(-1)
        }
    }
}
