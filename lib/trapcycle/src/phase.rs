use core::sync::atomic::{AtomicU8, Ordering};

use crate::error::TrapError;

/// Where a trap cycle currently stands. The path is linear:
/// `Idle → Configured → Trapped → Handling → Resumed → Reported`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle = 0,
    Configured = 1,
    Trapped = 2,
    Handling = 3,
    Resumed = 4,
    Reported = 5,
}

impl Phase {
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::Idle => Some(Phase::Configured),
            Phase::Configured => Some(Phase::Trapped),
            Phase::Trapped => Some(Phase::Handling),
            Phase::Handling => Some(Phase::Resumed),
            Phase::Resumed => Some(Phase::Reported),
            Phase::Reported => None,
        }
    }

    const fn from_u8(v: u8) -> Phase {
        match v {
            0 => Phase::Idle,
            1 => Phase::Configured,
            2 => Phase::Trapped,
            3 => Phase::Handling,
            4 => Phase::Resumed,
            _ => Phase::Reported,
        }
    }
}

pub struct AtomicPhase(AtomicU8);

impl AtomicPhase {
    pub const fn new() -> Self {
        Self(AtomicU8::new(Phase::Idle as u8))
    }

    pub fn load(&self) -> Phase {
        Phase::from_u8(self.0.load(Ordering::SeqCst))
    }

    /// Move from `from` to its successor, failing if the cycle is elsewhere.
    pub fn advance(&self, from: Phase) -> Result<Phase, TrapError> {
        let to = from.next().ok_or_else(|| TrapError::Phase { expected: from, found: self.load() })?;
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| to)
            .map_err(|found| TrapError::Phase { expected: from, found: Phase::from_u8(found) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_the_whole_path() {
        let phase = AtomicPhase::new();
        let mut cur = Phase::Idle;
        while let Some(next) = cur.next() {
            assert_eq!(phase.advance(cur), Ok(next));
            cur = next;
        }
        assert_eq!(phase.load(), Phase::Reported);
    }

    #[test]
    fn rejects_out_of_order_transition() {
        let phase = AtomicPhase::new();
        assert_eq!(
            phase.advance(Phase::Configured),
            Err(TrapError::Phase { expected: Phase::Configured, found: Phase::Idle })
        );
        assert_eq!(phase.load(), Phase::Idle);
    }

    #[test]
    fn reported_is_terminal() {
        let phase = AtomicPhase::new();
        assert!(phase.advance(Phase::Reported).is_err());
    }
}
