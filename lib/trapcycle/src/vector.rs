use crate::error::TrapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapMode {
    Direct = 0,
    Vectored = 1,
}

/// A validated `mtvec` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapVector {
    address: usize,
    mode: TrapMode,
}

impl TrapVector {
    /// All traps jump to `address`. The low two bits of `mtvec` hold the mode,
    /// so the base has to be word aligned.
    pub fn direct(address: usize) -> Result<Self, TrapError> {
        if address & 0x3 != 0 {
            return Err(TrapError::MisalignedVector(address));
        }
        Ok(Self { address, mode: TrapMode::Direct })
    }

    pub fn from_bits(bits: usize) -> Self {
        let mode = if bits & 0x3 == 1 { TrapMode::Vectored } else { TrapMode::Direct };
        Self { address: bits & !0x3, mode }
    }

    pub const fn address(&self) -> usize {
        self.address
    }

    pub const fn mode(&self) -> TrapMode {
        self.mode
    }

    pub const fn bits(&self) -> usize {
        self.address | self.mode as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_direct_vector() {
        let v = TrapVector::direct(0x8000_0100).unwrap();
        assert_eq!(v.address(), 0x8000_0100);
        assert_eq!(v.mode(), TrapMode::Direct);
        assert_eq!(v.bits(), 0x8000_0100);
    }

    #[test]
    fn misaligned_vector_is_rejected() {
        assert_eq!(TrapVector::direct(0x8000_0102), Err(TrapError::MisalignedVector(0x8000_0102)));
        assert_eq!(TrapVector::direct(0x8000_0101), Err(TrapError::MisalignedVector(0x8000_0101)));
    }

    #[test]
    fn readback_splits_mode() {
        let v = TrapVector::from_bits(0x8000_0201);
        assert_eq!(v.address(), 0x8000_0200);
        assert_eq!(v.mode(), TrapMode::Vectored);
        assert_eq!(TrapVector::from_bits(0x8000_0200).mode(), TrapMode::Direct);
    }
}
