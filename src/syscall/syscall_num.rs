use strum::EnumCount;
use strum_macros::{Display, FromRepr};

const SYSCALL_HALT: usize = 0;
const SYSCALL_EXIT: usize = 1;
const SYSCALL_EXEC: usize = 2;
const SYSCALL_WAIT: usize = 3;
const SYSCALL_CREATE: usize = 4;
const SYSCALL_REMOVE: usize = 5;
const SYSCALL_OPEN: usize = 6;
const SYSCALL_FILESIZE: usize = 7;
const SYSCALL_READ: usize = 8;
const SYSCALL_WRITE: usize = 9;
const SYSCALL_SEEK: usize = 10;
const SYSCALL_TELL: usize = 11;
const SYSCALL_CLOSE: usize = 12;
const SYSCALL_FIBONACCI: usize = 13;
const SYSCALL_MAX_OF_FOUR: usize = 14;

/// The syscall numbering contract with user space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr, EnumCount)]
#[repr(usize)]
#[strum(serialize_all = "snake_case")]
pub enum Syscall {
    Halt = SYSCALL_HALT,
    Exit = SYSCALL_EXIT,
    Exec = SYSCALL_EXEC,
    Wait = SYSCALL_WAIT,
    Create = SYSCALL_CREATE,
    Remove = SYSCALL_REMOVE,
    Open = SYSCALL_OPEN,
    Filesize = SYSCALL_FILESIZE,
    Read = SYSCALL_READ,
    Write = SYSCALL_WRITE,
    Seek = SYSCALL_SEEK,
    Tell = SYSCALL_TELL,
    Close = SYSCALL_CLOSE,
    Fibonacci = SYSCALL_FIBONACCI,
    MaxOfFour = SYSCALL_MAX_OF_FOUR,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_is_contiguous() {
        for number in 0..Syscall::COUNT {
            assert!(Syscall::from_repr(number).is_some(), "gap at {}", number);
        }
        assert_eq!(Syscall::from_repr(Syscall::COUNT), None);
    }

    #[test]
    fn decoding_matches_the_wire_numbers() {
        assert_eq!(Syscall::from_repr(0), Some(Syscall::Halt));
        assert_eq!(Syscall::from_repr(9), Some(Syscall::Write));
        assert_eq!(Syscall::from_repr(12), Some(Syscall::Close));
        assert_eq!(Syscall::from_repr(14), Some(Syscall::MaxOfFour));
    }

    #[test]
    fn names_render_snake_case() {
        assert_eq!(Syscall::MaxOfFour.to_string(), "max_of_four");
        assert_eq!(Syscall::Filesize.to_string(), "filesize");
    }
}
