/// Exception code of an environment call issued from M-mode.
pub const MACHINE_ECALL: usize = 11;

const EXCEPTION_INFO: [&str; 16] = [
    "Instruction address misaligned", // 0
    "Instruction access fault",       // 1
    "Illegal instruction",            // 2
    "Breakpoint",                     // 3
    "Load address misaligned",        // 4
    "Load access fault",              // 5
    "Store/AMO address misaligned",   // 6
    "Store/AMO access fault",         // 7
    "Environment call from U-mode",   // 8
    "Environment call from S-mode",   // 9
    "reserved-1",                     // 10
    "Environment call from M-mode",   // 11
    "Instruction page fault",         // 12
    "Load page fault",                // 13
    "reserved-2",                     // 14
    "Store/AMO page fault",           // 15
];

const INTERRUPT_INFO: [&str; 16] = [
    "U-mode software interrupt", // 0
    "S-mode software interrupt", // 1
    "reserved-1",                // 2
    "M-mode software interrupt", // 3
    "U-mode timer interrupt",    // 4
    "S-mode timer interrupt",    // 5
    "reserved-2",                // 6
    "M-mode timer interrupt",    // 7
    "U-mode external interrupt", // 8
    "S-mode external interrupt", // 9
    "reserved-3",                // 10
    "M-mode external interrupt", // 11
    "reserved-4",                // 12
    "reserved-5",                // 13
    "reserved-6",                // 14
    "reserved-7",                // 15
];

/// Decoded `mcause`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Exception(usize),
    Interrupt(usize),
}

impl Cause {
    /// The top bit of an XLEN-wide `mcause` selects interrupt vs. exception.
    pub const fn from_bits(bits: usize) -> Self {
        let msb = usize::BITS - 1;
        let code = bits & !(1usize << msb);
        if (bits >> msb) & 1 != 0 { Cause::Interrupt(code) } else { Cause::Exception(code) }
    }

    pub const fn code(&self) -> usize {
        match *self {
            Cause::Exception(c) | Cause::Interrupt(c) => c,
        }
    }

    pub const fn is_machine_ecall(&self) -> bool {
        matches!(*self, Cause::Exception(MACHINE_ECALL))
    }

    pub fn describe(&self) -> &'static str {
        match *self {
            Cause::Exception(c) => EXCEPTION_INFO.get(c).copied().unwrap_or("Unknown Exception"),
            Cause::Interrupt(c) => INTERRUPT_INFO.get(c).copied().unwrap_or("Unknown Interrupt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_machine_ecall() {
        let cause = Cause::from_bits(11);
        assert_eq!(cause, Cause::Exception(11));
        assert!(cause.is_machine_ecall());
        assert_eq!(cause.describe(), "Environment call from M-mode");
    }

    #[test]
    fn top_bit_marks_interrupt() {
        let bits = (1usize << (usize::BITS - 1)) | 7;
        let cause = Cause::from_bits(bits);
        assert_eq!(cause, Cause::Interrupt(7));
        assert_eq!(cause.code(), 7);
        assert!(!cause.is_machine_ecall());
        assert_eq!(cause.describe(), "M-mode timer interrupt");
    }

    #[test]
    fn other_environment_calls_are_not_machine_ecall() {
        assert!(!Cause::from_bits(8).is_machine_ecall());
        assert!(!Cause::from_bits(9).is_machine_ecall());
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(Cause::Exception(24).describe(), "Unknown Exception");
        assert_eq!(Cause::Interrupt(16).describe(), "Unknown Interrupt");
    }
}
