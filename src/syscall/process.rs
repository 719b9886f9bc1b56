//! Process-control syscalls, plus the two arithmetic calls that ride the
//! same dispatch path.

use super::error::Violation;
use super::Control;
use crate::kernel::Kernel;
use crate::mm::{UserAddr, UserPtr};
use crate::task::{Pid, Process};

/// halt: power the machine down. Surfaces as a terminal outcome; the board
/// layer performs the actual power-off and never returns to user code.
pub fn sys_halt() -> Control {
    Control::Shutdown
}

/// exit(status): enter the Exit Path. Never returns a value to the caller.
pub fn sys_exit(status: i32) -> Control {
    Control::Exit(status)
}

/// exec(path) -> child pid | -1
pub fn sys_exec(proc: &mut Process, kernel: &Kernel, path: UserAddr) -> Result<isize, Violation> {
    let path = UserPtr::<u8>::new(path).read_str(&proc.space)?;
    match kernel.control.spawn(&path) {
        Some(pid) => {
            proc.add_child(pid);
            Ok(pid as isize)
        }
        None => Ok(-1),
    }
}

/// wait(pid) -> child's exit status
pub fn sys_wait(proc: &mut Process, kernel: &Kernel, pid: Pid) -> isize {
    let status = kernel.control.wait_for(pid);
    proc.forget_child(pid);
    status as isize
}

pub fn sys_fibonacci(n: i32) -> isize {
    if n <= 1 {
        return n as isize;
    }
    sys_fibonacci(n - 1) + sys_fibonacci(n - 2)
}

pub fn sys_max_of_four(a: i32, b: i32, c: i32, d: i32) -> isize {
    a.max(b).max(c).max(d) as isize
}
