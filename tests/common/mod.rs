//! Shared test doubles: an in-memory file system, a scripted console, and a
//! recording process-control collaborator, plus a little harness that lays
//! a syscall frame out on a process's user stack and runs the trap path.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use trapgate::config::WORD_SIZE;
use trapgate::fs::{File, FileSystem};
use trapgate::io::Console;
use trapgate::mm::UserSpace;
use trapgate::syscall::syscall_num::Syscall;
use trapgate::{handle_syscall, Kernel, Pid, Process, ProcessControl, TrapContext, TrapOutcome};

pub const USER_BASE: usize = 0x1000;
pub const USER_SIZE: usize = 0x8000;

/// Stack frames are laid out near the top of the region, leaving room for
/// string and buffer arguments lower down.
pub const FRAME_ADDR: usize = USER_BASE + USER_SIZE - 0x100;

// ---------------------------------------------------------------------------
// RAM file system

struct RamNode {
    data: Mutex<Vec<u8>>,
    deny_writes: AtomicUsize,
}

pub struct RamFile {
    node: Arc<RamNode>,
    pos: Mutex<usize>,
    denied: AtomicUsize,
}

impl File for RamFile {
    fn read(&self, buf: &mut [u8]) -> usize {
        let data = self.node.data.lock().unwrap();
        let mut pos = self.pos.lock().unwrap();
        let available = data.len().saturating_sub(*pos);
        let count = available.min(buf.len());
        buf[..count].copy_from_slice(&data[*pos..*pos + count]);
        *pos += count;
        count
    }

    fn write(&self, buf: &[u8]) -> usize {
        if self.node.deny_writes.load(Ordering::SeqCst) > 0 {
            return 0;
        }
        let mut data = self.node.data.lock().unwrap();
        let mut pos = self.pos.lock().unwrap();
        if *pos + buf.len() > data.len() {
            data.resize(*pos + buf.len(), 0);
        }
        data[*pos..*pos + buf.len()].copy_from_slice(buf);
        *pos += buf.len();
        buf.len()
    }

    fn length(&self) -> usize {
        self.node.data.lock().unwrap().len()
    }

    fn seek(&self, pos: usize) {
        *self.pos.lock().unwrap() = pos;
    }

    fn tell(&self) -> usize {
        *self.pos.lock().unwrap()
    }

    fn deny_write(&self) {
        self.denied.fetch_add(1, Ordering::SeqCst);
        self.node.deny_writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for RamFile {
    fn drop(&mut self) {
        // Releasing the last handle that denied writes re-allows them.
        let denied = self.denied.load(Ordering::SeqCst);
        if denied > 0 {
            self.node.deny_writes.fetch_sub(denied, Ordering::SeqCst);
        }
    }
}

pub struct RamFs {
    nodes: Mutex<BTreeMap<String, Arc<RamNode>>>,
}

impl RamFs {
    pub fn new() -> Self {
        Self {
            nodes: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn with_file(self, path: &str, contents: &[u8]) -> Self {
        self.nodes.lock().unwrap().insert(
            path.to_string(),
            Arc::new(RamNode {
                data: Mutex::new(contents.to_vec()),
                deny_writes: AtomicUsize::new(0),
            }),
        );
        self
    }

    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.nodes
            .lock()
            .unwrap()
            .get(path)
            .map(|node| node.data.lock().unwrap().clone())
    }

    pub fn exists(&self, path: &str) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }
}

// `trapgate` is no_std + alloc; on the host its `alloc::sync::Arc` is the
// same type as `std::sync::Arc`.
impl FileSystem for RamFs {
    fn open(&self, path: &str) -> Option<Arc<dyn File>> {
        let node = self.nodes.lock().unwrap().get(path).cloned()?;
        Some(Arc::new(RamFile {
            node,
            pos: Mutex::new(0),
            denied: AtomicUsize::new(0),
        }))
    }

    fn create(&self, path: &str, size: usize) -> bool {
        let mut nodes = self.nodes.lock().unwrap();
        if nodes.contains_key(path) {
            return false;
        }
        nodes.insert(
            path.to_string(),
            Arc::new(RamNode {
                data: Mutex::new(vec![0; size]),
                deny_writes: AtomicUsize::new(0),
            }),
        );
        true
    }

    fn remove(&self, path: &str) -> bool {
        self.nodes.lock().unwrap().remove(path).is_some()
    }
}

// ---------------------------------------------------------------------------
// Console

/// A deliberately non-atomic console: bytes go into the shared buffer one
/// at a time, releasing the lock between bytes, so only the File-System
/// Gate keeps concurrent writes from interleaving.
pub struct TestConsole {
    output: Mutex<Vec<u8>>,
    input: Mutex<VecDeque<u8>>,
}

impl TestConsole {
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Vec::new()),
            input: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_input(&self, bytes: &[u8]) {
        self.input.lock().unwrap().extend(bytes.iter().copied());
    }

    pub fn output(&self) -> Vec<u8> {
        self.output.lock().unwrap().clone()
    }

    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output()).into_owned()
    }
}

impl Console for TestConsole {
    fn read_char(&self) -> u8 {
        self.input.lock().unwrap().pop_front().unwrap_or(b'\0')
    }

    fn write_bytes(&self, buf: &[u8]) {
        for &byte in buf {
            self.output.lock().unwrap().push(byte);
            std::thread::yield_now();
        }
    }
}

// ---------------------------------------------------------------------------
// Process control

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Spawn(String),
    Wait(Pid),
}

pub struct TestControl {
    pub events: Mutex<Vec<Event>>,
    next_pid: AtomicUsize,
    statuses: Mutex<BTreeMap<Pid, i32>>,
}

impl TestControl {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            next_pid: AtomicUsize::new(100),
            statuses: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn set_status(&self, pid: Pid, status: i32) {
        self.statuses.lock().unwrap().insert(pid, status);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn waited_pids(&self) -> Vec<Pid> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Wait(pid) => Some(pid),
                _ => None,
            })
            .collect()
    }
}

impl ProcessControl for TestControl {
    fn spawn(&self, path: &str) -> Option<Pid> {
        if path.starts_with("missing") {
            return None;
        }
        self.events
            .lock()
            .unwrap()
            .push(Event::Spawn(path.to_string()));
        Some(self.next_pid.fetch_add(1, Ordering::SeqCst))
    }

    fn wait_for(&self, pid: Pid) -> i32 {
        self.events.lock().unwrap().push(Event::Wait(pid));
        self.statuses.lock().unwrap().get(&pid).copied().unwrap_or(-1)
    }
}

// ---------------------------------------------------------------------------
// Harness

pub struct Fixture {
    pub kernel: Kernel,
    pub fs: Arc<RamFs>,
    pub console: Arc<TestConsole>,
    pub control: Arc<TestControl>,
}

pub fn fixture() -> Fixture {
    fixture_with_fs(RamFs::new())
}

pub fn fixture_with_fs(fs: RamFs) -> Fixture {
    let fs = Arc::new(fs);
    let console = Arc::new(TestConsole::new());
    let control = Arc::new(TestControl::new());
    let kernel = Kernel::new(fs.clone(), control.clone(), console.clone());
    Fixture {
        kernel,
        fs,
        console,
        control,
    }
}

pub fn make_process(name: &str) -> Process {
    Process::new(1, name, UserSpace::new(USER_BASE, USER_SIZE))
}

/// Writes a NUL-terminated string into the process's user region.
pub fn put_str(proc: &mut Process, addr: usize, text: &str) {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    proc.space.load(addr, &bytes).unwrap();
}

/// Lays out `number` and `args` as a syscall frame at `FRAME_ADDR` and runs
/// the trap path. Returns the outcome and the accumulator value.
pub fn syscall(
    proc: &mut Process,
    kernel: &Kernel,
    number: usize,
    args: &[usize],
) -> (TrapOutcome, isize) {
    assert!(args.len() <= 4);
    proc.space
        .load(FRAME_ADDR, &number.to_le_bytes())
        .unwrap();
    for (i, arg) in args.iter().enumerate() {
        proc.space
            .load(FRAME_ADDR + (i + 1) * WORD_SIZE, &arg.to_le_bytes())
            .unwrap();
    }
    let mut ctx = TrapContext::new(FRAME_ADDR);
    let outcome = handle_syscall(proc, kernel, &mut ctx);
    (outcome, ctx.return_value())
}

pub fn call(proc: &mut Process, kernel: &Kernel, call: Syscall, args: &[usize]) -> (TrapOutcome, isize) {
    syscall(proc, kernel, call as usize, args)
}
