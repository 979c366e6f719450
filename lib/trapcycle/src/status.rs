use bitflags::bitflags;

bitflags! {
    /// The subset of `mstatus` this test cares about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Mstatus: usize {
        /// Machine interrupt enable.
        const MIE = 1 << 3;
        /// Previous MIE, saved by hardware on trap entry.
        const MPIE = 1 << 7;
        /// Previous privilege mode (two bits).
        const MPP = 0b11 << 11;
    }
}

impl Mstatus {
    /// Fixed pattern written before the trap: only MIE set (0x8).
    pub const TRAP_DELIVERY: Mstatus = Mstatus::MIE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trap_delivery_is_0x8() {
        assert_eq!(Mstatus::TRAP_DELIVERY.bits(), 0x8);
    }

    #[test]
    fn field_positions() {
        assert_eq!(Mstatus::MPIE.bits(), 0x80);
        assert_eq!(Mstatus::MPP.bits(), 0x1800);
        let saved = Mstatus::from_bits_truncate(0x1888);
        assert!(saved.contains(Mstatus::MIE | Mstatus::MPIE | Mstatus::MPP));
    }
}
