use core::fmt::Write;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::cause::Cause;
use crate::error::TrapError;
use crate::flag::CompletionFlag;
use crate::hart::Hart;
use crate::phase::{AtomicPhase, Phase};
use crate::status::Mstatus;
use crate::vector::TrapVector;
use crate::{HANDLER_MSG, INSTRUCTION_WIDTH, JUMP_MSG, REPORT_PREFIX};

/// One trip through the trap machinery.
///
/// The main routine calls [`configure`](Self::configure),
/// [`trigger`](Self::trigger) and [`report`](Self::report); the trap handler
/// calls [`handle`](Self::handle). All state is atomic so a single `static`
/// instance can be shared between the two contexts without locks.
pub struct TrapCycle {
    phase: AtomicPhase,
    flag: CompletionFlag,
    dispatches: AtomicU32,
    cause: AtomicUsize,
    trap_epc: AtomicUsize,
    resume_epc: AtomicUsize,
}

/// Snapshot of what a cycle observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleRecord {
    pub phase: Phase,
    pub flag: u32,
    pub dispatches: u32,
    pub cause: usize,
    pub trap_epc: usize,
    pub resume_epc: usize,
}

impl TrapCycle {
    pub const fn new() -> Self {
        Self {
            phase: AtomicPhase::new(),
            flag: CompletionFlag::new(),
            dispatches: AtomicU32::new(0),
            cause: AtomicUsize::new(0),
            trap_epc: AtomicUsize::new(0),
            resume_epc: AtomicUsize::new(0),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.load()
    }

    pub fn flag(&self) -> &CompletionFlag {
        &self.flag
    }

    /// Point the trap vector at `handler` and enable trap delivery.
    ///
    /// Nothing is written unless `handler` is a valid Direct-mode base.
    pub fn configure<H: Hart>(&self, hart: &mut H, handler: usize) -> Result<(), TrapError> {
        expect(self.phase(), Phase::Idle)?;
        let vector = TrapVector::direct(handler)?;
        hart.write_vector(vector);
        hart.write_status(Mstatus::TRAP_DELIVERY);
        self.phase.advance(Phase::Idle)?;
        Ok(())
    }

    /// Raise the trap. Returns once the handler has `mret`ed to the
    /// instruction after the `ecall`.
    pub fn trigger<H: Hart, W: Write>(&self, hart: &mut H, console: &mut W) -> Result<(), TrapError> {
        expect(self.phase(), Phase::Configured)?;
        let _ = console.write_str(JUMP_MSG);
        self.phase.advance(Phase::Configured)?;
        hart.ecall();
        self.phase.advance(Phase::Handling)?;
        Ok(())
    }

    /// Trap handler body. Runs with interrupts masked by hardware.
    ///
    /// Any error here means the trap was not the one this cycle raised: a
    /// second dispatch, a re-entrant trap or a different exception.
    pub fn handle<H: Hart, W: Write>(&self, hart: &mut H, console: &mut W) -> Result<(), TrapError> {
        self.dispatches.fetch_add(1, Ordering::SeqCst);
        self.phase.advance(Phase::Trapped)?;

        let cause = hart.read_cause();
        self.cause.store(cause, Ordering::SeqCst);
        if !Cause::from_bits(cause).is_machine_ecall() {
            return Err(TrapError::UnexpectedCause(cause));
        }

        let epc = hart.read_epc();
        let resume = epc.wrapping_add(INSTRUCTION_WIDTH);
        hart.write_epc(resume);
        self.trap_epc.store(epc, Ordering::SeqCst);
        self.resume_epc.store(resume, Ordering::SeqCst);

        let _ = console.write_str(HANDLER_MSG);
        self.flag.set();
        Ok(())
    }

    /// Print the flag as eight hex digits and return it.
    pub fn report<W: Write>(&self, console: &mut W) -> Result<u32, TrapError> {
        self.phase.advance(Phase::Resumed)?;
        let flag = self.flag.get();
        let _ = write!(console, "{}{:08X}\n", REPORT_PREFIX, flag);
        Ok(flag)
    }

    pub fn record(&self) -> CycleRecord {
        CycleRecord {
            phase: self.phase(),
            flag: self.flag.get(),
            dispatches: self.dispatches.load(Ordering::SeqCst),
            cause: self.cause.load(Ordering::SeqCst),
            trap_epc: self.trap_epc.load(Ordering::SeqCst),
            resume_epc: self.resume_epc.load(Ordering::SeqCst),
        }
    }
}

impl Default for TrapCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleRecord {
    /// Check a finished cycle: flag is exactly 1, one dispatch, and execution
    /// resumed one instruction past the `ecall`.
    pub fn verify(&self) -> Result<(), TrapError> {
        if self.flag != 1 {
            return Err(TrapError::FlagNotSet(self.flag));
        }
        if self.dispatches != 1 {
            return Err(TrapError::DispatchCount(self.dispatches));
        }
        if self.resume_epc != self.trap_epc.wrapping_add(INSTRUCTION_WIDTH) {
            return Err(TrapError::ResumeAddress { trap: self.trap_epc, resume: self.resume_epc });
        }
        expect(self.phase, Phase::Reported)
    }
}

fn expect(found: Phase, expected: Phase) -> Result<(), TrapError> {
    if found == expected { Ok(()) } else { Err(TrapError::Phase { expected, found }) }
}
