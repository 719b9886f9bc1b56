//! Per-process descriptor table.
//!
//! A bounded arena of optional file-resource slots indexed by handle.
//! Handles 0, 1 and 2 are reserved for the console pair and the process's
//! own executable and are never occupied here; allocation scans upward from
//! [`FIRST_USER_FD`]. The table is owned exclusively by its process, so no
//! locking guards the slots themselves — only the file-system operations
//! the slots reference take the gate.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::config::{FIRST_USER_FD, MAX_OPEN_FILES};
use crate::fs::File;

pub struct FdTable {
    slots: Vec<Option<Arc<dyn File>>>,
}

impl FdTable {
    pub fn new() -> Self {
        Self {
            slots: (0..MAX_OPEN_FILES).map(|_| None).collect(),
        }
    }

    /// Stores `file` in the lowest free non-reserved slot and returns its
    /// handle, or `None` when every slot is taken.
    pub fn alloc(&mut self, file: Arc<dyn File>) -> Option<usize> {
        for fd in FIRST_USER_FD..self.slots.len() {
            if self.slots[fd].is_none() {
                self.slots[fd] = Some(file);
                return Some(fd);
            }
        }
        None
    }

    /// Looks up an occupied slot. Reserved and out-of-range handles have no
    /// slot and yield `None`.
    pub fn get(&self, fd: usize) -> Option<Arc<dyn File>> {
        if fd < FIRST_USER_FD {
            return None;
        }
        self.slots.get(fd).and_then(|slot| slot.clone())
    }

    /// Empties a slot, handing ownership of the resource back to the caller.
    pub fn remove(&mut self, fd: usize) -> Option<Arc<dyn File>> {
        if fd < FIRST_USER_FD {
            return None;
        }
        self.slots.get_mut(fd).and_then(|slot| slot.take())
    }

    /// Empties every occupied slot, for the exit-path sweep.
    pub fn close_all(&mut self) -> Vec<Arc<dyn File>> {
        self.slots.iter_mut().filter_map(|slot| slot.take()).collect()
    }

    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Default for FdTable {
    fn default() -> Self {
        Self::new()
    }
}
