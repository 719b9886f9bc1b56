//! Syscall decoding and dispatch.
//!
//! The dispatcher reads the syscall number off the trapping process's user
//! stack, decodes it, pulls exactly the argument words that call's contract
//! names, applies that contract's validation obligations, and invokes the
//! operation. Scalar arguments are used as-is; anything that will be
//! dereferenced travels as an opaque [`UserAddr`] until the validator has
//! passed it.
//!
//! Argument words are themselves fetched through the validator, so a
//! corrupted stack pointer kills the process instead of the kernel. An
//! unrecognized syscall number is a violation, not a no-op.

mod error;
pub mod fs;
pub mod process;
pub mod syscall_num;

pub use error::Violation;

use crate::config::WORD_SIZE;
use crate::kernel::Kernel;
use crate::mm::{AccessFault, UserAddr, UserPtr};
use crate::task::Process;
use crate::trap::TrapContext;
use syscall_num::Syscall;

/// What the trap layer should do once a syscall has been decoded.
///
/// `Exit` and `Shutdown` are terminal: control never returns to the
/// dispatch point, only to the scheduler or the power collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Store this value in the trap frame's accumulator and resume.
    Value(isize),
    /// Resume without touching the accumulator.
    NoValue,
    /// Run the Exit Path with this status.
    Exit(i32),
    /// Power down the machine.
    Shutdown,
}

pub fn dispatch(
    proc: &mut Process,
    kernel: &Kernel,
    ctx: &TrapContext,
) -> Result<Control, Violation> {
    let number = stack_word(proc, ctx, 0)?;
    let call = Syscall::from_repr(number).ok_or(Violation::UnknownSyscall(number))?;
    log::trace!("pid {} syscall {}", proc.pid(), call);

    match call {
        Syscall::Halt => Ok(process::sys_halt()),
        Syscall::Exit => {
            let status = stack_word(proc, ctx, 1)? as isize as i32;
            Ok(process::sys_exit(status))
        }
        Syscall::Exec => {
            let path = arg_addr(proc, ctx, 1)?;
            process::sys_exec(proc, kernel, path).map(Control::Value)
        }
        Syscall::Wait => {
            let pid = stack_word(proc, ctx, 1)?;
            Ok(Control::Value(process::sys_wait(proc, kernel, pid)))
        }
        Syscall::Create => {
            let path = arg_addr(proc, ctx, 1)?;
            let size = stack_word(proc, ctx, 2)?;
            fs::sys_create(proc, kernel, path, size).map(Control::Value)
        }
        Syscall::Remove => {
            let path = arg_addr(proc, ctx, 1)?;
            fs::sys_remove(proc, kernel, path).map(Control::Value)
        }
        Syscall::Open => {
            let path = arg_addr(proc, ctx, 1)?;
            fs::sys_open(proc, kernel, path).map(Control::Value)
        }
        Syscall::Filesize => {
            let fd = stack_word(proc, ctx, 1)?;
            fs::sys_filesize(proc, kernel, fd).map(Control::Value)
        }
        Syscall::Read => {
            let fd = stack_word(proc, ctx, 1)?;
            let buf = arg_addr(proc, ctx, 2)?;
            let len = stack_word(proc, ctx, 3)?;
            fs::sys_read(proc, kernel, fd, buf, len).map(Control::Value)
        }
        Syscall::Write => {
            let fd = stack_word(proc, ctx, 1)?;
            let buf = arg_addr(proc, ctx, 2)?;
            let len = stack_word(proc, ctx, 3)?;
            fs::sys_write(proc, kernel, fd, buf, len).map(Control::Value)
        }
        Syscall::Seek => {
            let fd = stack_word(proc, ctx, 1)?;
            let pos = stack_word(proc, ctx, 2)?;
            fs::sys_seek(proc, kernel, fd, pos)?;
            Ok(Control::NoValue)
        }
        Syscall::Tell => {
            let fd = stack_word(proc, ctx, 1)?;
            fs::sys_tell(proc, kernel, fd).map(Control::Value)
        }
        Syscall::Close => {
            let fd = stack_word(proc, ctx, 1)?;
            fs::sys_close(proc, kernel, fd)?;
            Ok(Control::NoValue)
        }
        Syscall::Fibonacci => {
            let n = stack_word(proc, ctx, 1)? as isize as i32;
            Ok(Control::Value(process::sys_fibonacci(n)))
        }
        Syscall::MaxOfFour => {
            let a = stack_word(proc, ctx, 1)? as isize as i32;
            let b = stack_word(proc, ctx, 2)? as isize as i32;
            let c = stack_word(proc, ctx, 3)? as isize as i32;
            let d = stack_word(proc, ctx, 4)? as isize as i32;
            Ok(Control::Value(process::sys_max_of_four(a, b, c, d)))
        }
    }
}

/// Argument Extractor: word `index` of the syscall frame (0 is the number,
/// 1..=4 the arguments), fetched through the validator.
fn stack_word(proc: &Process, ctx: &TrapContext, index: usize) -> Result<usize, Violation> {
    let slot = ctx.arg_slot(index).ok_or(Violation::BadAccess(AccessFault::Overflow {
        address: ctx.sp(),
        len: index * WORD_SIZE,
    }))?;
    Ok(UserPtr::<usize>::new(UserAddr::new(slot)).read(&proc.space)?)
}

fn arg_addr(proc: &Process, ctx: &TrapContext, index: usize) -> Result<UserAddr, Violation> {
    Ok(UserAddr::new(stack_word(proc, ctx, index)?))
}
