//! Process records and the Exit Path.

pub mod fd_table;

pub use fd_table::FdTable;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::fs::File;
use crate::kernel::Kernel;
use crate::mm::UserSpace;

pub type Pid = usize;

/// Process-control collaborator: creation and reaping live outside this
/// crate, behind this seam.
pub trait ProcessControl: Send + Sync {
    /// Starts a new process from the named image. `None` on failure.
    fn spawn(&self, path: &str) -> Option<Pid>;
    /// Blocks the caller until `pid` has exited and returns its status.
    fn wait_for(&self, pid: Pid) -> i32;
}

/// Lifecycle of a process as this layer sees it.
///
/// `Running -> Terminating` fires on voluntary exit or on any contract
/// violation; `Terminating -> Reaped` only once the parent-side teardown
/// has collected the record, after the exit status is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Running,
    Terminating,
    Reaped,
}

/// Everything the syscall layer knows about one user process.
pub struct Process {
    pid: Pid,
    name: String,
    state: ProcState,
    pub space: UserSpace,
    pub fd_table: FdTable,
    /// Handle 2: the process's own executable image, deny-write for the
    /// process's lifetime and released on the exit path.
    executable: Option<Arc<dyn File>>,
    children: Vec<Pid>,
    exit_status: Option<i32>,
}

impl Process {
    pub fn new(pid: Pid, name: &str, space: UserSpace) -> Self {
        Self {
            pid,
            name: name.to_string(),
            state: ProcState::Running,
            space,
            fd_table: FdTable::new(),
            executable: None,
            children: Vec::new(),
            exit_status: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ProcState {
        self.state
    }

    pub fn exit_status(&self) -> Option<i32> {
        self.exit_status
    }

    pub fn children(&self) -> &[Pid] {
        &self.children
    }

    pub fn has_executable(&self) -> bool {
        self.executable.is_some()
    }

    /// Registers the executable image behind handle 2. The loader calls
    /// this once; the image is write-protected until the exit path releases
    /// it.
    pub fn attach_executable(&mut self, image: Arc<dyn File>) {
        image.deny_write();
        self.executable = Some(image);
    }

    pub fn add_child(&mut self, pid: Pid) {
        self.children.push(pid);
    }

    /// Drops a child that has already been collected by `wait`, so the
    /// exit-path sweep does not wait on it a second time.
    pub fn forget_child(&mut self, pid: Pid) {
        self.children.retain(|&child| child != pid);
    }

    /// Parent-side teardown has collected this record.
    pub fn mark_reaped(&mut self) {
        debug_assert_eq!(self.state, ProcState::Terminating);
        self.state = ProcState::Reaped;
    }
}

/// The Exit Path.
///
/// Runs on voluntary `exit` and on every contract violation (then with
/// status -1). Once this returns, the process is `Terminating` and control
/// must go to the scheduler for teardown — never back to the trapping user
/// code. In order:
///
/// 1. record the status so a pending `wait` in the parent can observe it;
/// 2. announce the exit on the console (under the gate, like any print);
/// 3. sweep every open descriptor;
/// 4. wait for every still-recorded child;
/// 5. release the executable image, lifting its write protection.
pub fn terminate(proc: &mut Process, status: i32, kernel: &Kernel) {
    debug_assert_eq!(proc.state, ProcState::Running);
    proc.state = ProcState::Terminating;
    proc.exit_status = Some(status);
    log::info!("pid {} ({}) exiting with status {}", proc.pid, proc.name, status);

    let line = format!("{}: exit({})\n", proc.name, status);
    {
        let _gate = kernel.fs_gate.enter();
        kernel.console.write_bytes(line.as_bytes());
    }

    let open = proc.fd_table.close_all();
    if !open.is_empty() {
        let _gate = kernel.fs_gate.enter();
        drop(open);
    }

    // A parent's termination is bound to its children's: collect them all,
    // discarding their statuses.
    let children = core::mem::take(&mut proc.children);
    for child in children {
        kernel.control.wait_for(child);
    }

    if let Some(image) = proc.executable.take() {
        let _gate = kernel.fs_gate.enter();
        drop(image);
    }
}
