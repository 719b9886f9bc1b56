//! The collaborator bundle handed to the dispatch layer.

use alloc::sync::Arc;

use crate::fs::{FileSystem, FsGate};
use crate::io::Console;
use crate::task::ProcessControl;

/// Kernel services the syscall layer calls into.
///
/// The gate lives here, next to the file system it guards, so there is
/// exactly one per machine and every caller reaches it the same way.
pub struct Kernel {
    pub fs: Arc<dyn FileSystem>,
    pub fs_gate: FsGate,
    pub control: Arc<dyn ProcessControl>,
    pub console: Arc<dyn Console>,
}

impl Kernel {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        control: Arc<dyn ProcessControl>,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            fs,
            fs_gate: FsGate::new(),
            control,
            console,
        }
    }
}
