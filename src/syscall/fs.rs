//! File and console syscalls.
//!
//! Every handler validates exactly what its contract requires before doing
//! anything else, takes the gate only around the file-system or console
//! touch, and drops it before returning. Recoverable failures come back as
//! `Ok(-1)` (or a false boolean); violations come back as `Err` and cost
//! the process its life upstream.

use alloc::vec;
use alloc::vec::Vec;

use super::error::Violation;
use crate::config::{FD_EXEC, FD_STDIN, FD_STDOUT};
use crate::kernel::Kernel;
use crate::mm::{UserAddr, UserPtr};
use crate::task::Process;

/// open(path) -> handle | -1
pub fn sys_open(proc: &mut Process, kernel: &Kernel, path: UserAddr) -> Result<isize, Violation> {
    let path = UserPtr::<u8>::new(path).read_str(&proc.space)?;
    let file = {
        let _gate = kernel.fs_gate.enter();
        kernel.fs.open(&path)
    };
    let file = match file {
        Some(file) => file,
        None => return Ok(-1),
    };
    // A process that opens its own image must not be able to rewrite it
    // while it runs.
    if path == proc.name() {
        file.deny_write();
    }
    match proc.fd_table.alloc(file) {
        Some(fd) => Ok(fd as isize),
        None => Ok(-1), // table exhausted
    }
}

/// close(fd). Closing a handle that is not open is fatal, and close is not
/// idempotent: the second close of the same number dies here.
pub fn sys_close(proc: &mut Process, kernel: &Kernel, fd: usize) -> Result<(), Violation> {
    let file = proc.fd_table.remove(fd).ok_or(Violation::BadHandle(fd))?;
    let _gate = kernel.fs_gate.enter();
    drop(file);
    Ok(())
}

/// read(fd, buf, len) -> bytes read | -1
pub fn sys_read(
    proc: &mut Process,
    kernel: &Kernel,
    fd: usize,
    buf: UserAddr,
    len: usize,
) -> Result<isize, Violation> {
    // The whole destination range must be valid before a single byte moves.
    proc.space.check_range(buf, len)?;
    match fd {
        FD_STDIN => {
            let mut data = Vec::with_capacity(len);
            for _ in 0..len {
                let byte = kernel.console.read_char();
                if byte == b'\0' {
                    break;
                }
                data.push(byte);
            }
            UserPtr::<u8>::new(buf).write_buf(&mut proc.space, &data)?;
            Ok(data.len() as isize)
        }
        FD_STDOUT | FD_EXEC => Ok(-1),
        fd => {
            let file = proc.fd_table.get(fd).ok_or(Violation::BadHandle(fd))?;
            let mut staging = vec![0; len];
            let count = {
                let _gate = kernel.fs_gate.enter();
                file.read(&mut staging)
            };
            UserPtr::<u8>::new(buf).write_buf(&mut proc.space, &staging[..count])?;
            Ok(count as isize)
        }
    }
}

/// write(fd, buf, len) -> bytes written | -1
pub fn sys_write(
    proc: &Process,
    kernel: &Kernel,
    fd: usize,
    buf: UserAddr,
    len: usize,
) -> Result<isize, Violation> {
    proc.space.check_range(buf, len)?;
    match fd {
        FD_STDOUT => {
            let data = UserPtr::<u8>::new(buf).read_buf(&proc.space, len)?;
            let _gate = kernel.fs_gate.enter();
            kernel.console.write_bytes(&data);
            Ok(len as isize)
        }
        FD_STDIN | FD_EXEC => Ok(-1),
        fd => {
            let file = proc.fd_table.get(fd).ok_or(Violation::BadHandle(fd))?;
            let data = UserPtr::<u8>::new(buf).read_buf(&proc.space, len)?;
            let count = {
                let _gate = kernel.fs_gate.enter();
                file.write(&data)
            };
            Ok(count as isize)
        }
    }
}

/// create(path, size) -> success boolean
pub fn sys_create(
    proc: &Process,
    kernel: &Kernel,
    path: UserAddr,
    size: usize,
) -> Result<isize, Violation> {
    let path = UserPtr::<u8>::new(path).read_str(&proc.space)?;
    let _gate = kernel.fs_gate.enter();
    Ok(kernel.fs.create(&path, size) as isize)
}

/// remove(path) -> success boolean
pub fn sys_remove(proc: &Process, kernel: &Kernel, path: UserAddr) -> Result<isize, Violation> {
    let path = UserPtr::<u8>::new(path).read_str(&proc.space)?;
    let _gate = kernel.fs_gate.enter();
    Ok(kernel.fs.remove(&path) as isize)
}

/// filesize(fd) -> length
pub fn sys_filesize(proc: &Process, kernel: &Kernel, fd: usize) -> Result<isize, Violation> {
    let file = proc.fd_table.get(fd).ok_or(Violation::BadHandle(fd))?;
    let _gate = kernel.fs_gate.enter();
    Ok(file.length() as isize)
}

/// seek(fd, pos)
pub fn sys_seek(proc: &Process, kernel: &Kernel, fd: usize, pos: usize) -> Result<(), Violation> {
    let file = proc.fd_table.get(fd).ok_or(Violation::BadHandle(fd))?;
    let _gate = kernel.fs_gate.enter();
    file.seek(pos);
    Ok(())
}

/// tell(fd) -> cursor position
pub fn sys_tell(proc: &Process, kernel: &Kernel, fd: usize) -> Result<isize, Violation> {
    let file = proc.fd_table.get(fd).ok_or(Violation::BadHandle(fd))?;
    let _gate = kernel.fs_gate.enter();
    Ok(file.tell() as isize)
}
