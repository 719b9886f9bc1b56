use crate::config::{MAX_SYSCALL_ARGS, WORD_SIZE};

/// The saved user context a syscall trap hands to the kernel.
///
/// Only the parts this layer touches are modeled: the user stack pointer,
/// where the syscall number and argument words live, and the accumulator
/// slot the handler writes its result into before returning to user mode.
#[derive(Debug, Clone, Copy)]
pub struct TrapContext {
    sp: usize,
    acc: isize,
}

impl TrapContext {
    pub fn new(sp: usize) -> Self {
        Self { sp, acc: 0 }
    }

    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Address of frame word `index`: the syscall number at 0, arguments at
    /// 1..=4. `None` if the computation wraps, which the dispatcher treats
    /// like any other bad address.
    pub fn arg_slot(&self, index: usize) -> Option<usize> {
        debug_assert!(index <= MAX_SYSCALL_ARGS);
        self.sp.checked_add(index.checked_mul(WORD_SIZE)?)
    }

    pub fn set_return(&mut self, value: isize) {
        self.acc = value;
    }

    pub fn return_value(&self) -> isize {
        self.acc
    }
}
