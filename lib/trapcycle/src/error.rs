use core::fmt;

use crate::phase::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapError {
    /// Direct-mode `mtvec` needs a 4-byte aligned base.
    MisalignedVector(usize),
    /// A transition was attempted from the wrong phase.
    Phase { expected: Phase, found: Phase },
    /// The handler was entered for something other than an M-mode `ecall`.
    UnexpectedCause(usize),
    FlagNotSet(u32),
    DispatchCount(u32),
    ResumeAddress { trap: usize, resume: usize },
}

impl fmt::Display for TrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TrapError::MisalignedVector(addr) => {
                write!(f, "trap vector 0x{:x} is not 4-byte aligned", addr)
            }
            TrapError::Phase { expected, found } => {
                write!(f, "trap cycle in phase {:?}, expected {:?}", found, expected)
            }
            TrapError::UnexpectedCause(bits) => write!(f, "unexpected trap cause 0x{:x}", bits),
            TrapError::FlagNotSet(v) => write!(f, "completion flag is 0x{:08X}, expected 0x00000001", v),
            TrapError::DispatchCount(n) => write!(f, "handler dispatched {} times, expected once", n),
            TrapError::ResumeAddress { trap, resume } => {
                write!(f, "resumed at 0x{:x}, expected 0x{:x} + 4", resume, trap)
            }
        }
    }
}
