//! A software hart for host tests: CSRs are plain fields and `ecall`
//! dispatches straight into the cycle's handler, the way hardware would.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use crate::cause::MACHINE_ECALL;
use crate::cycle::TrapCycle;
use crate::error::TrapError;
use crate::hart::Hart;
use crate::status::Mstatus;
use crate::vector::TrapVector;

/// Shared console; each write borrows only for its own duration so the main
/// routine and the handler can both hold a handle.
#[derive(Clone, Default)]
pub struct Console(Rc<RefCell<String>>);

impl Console {
    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.borrow_mut().push_str(s);
        Ok(())
    }
}

pub struct SimHart<'a> {
    cycle: &'a TrapCycle,
    console: Console,
    pub pc: usize,
    pub mtvec: usize,
    pub mstatus: usize,
    pub mepc: usize,
    pub mcause: usize,
    /// Cause loaded into `mcause` when the trap is taken.
    pub trap_cause: usize,
    /// Extra handler invocations per trap, to model a spurious re-dispatch.
    pub redispatch: u32,
    pub traps_taken: u32,
    pub mie_in_handler: Option<bool>,
    pub last_result: Option<Result<(), TrapError>>,
}

impl<'a> SimHart<'a> {
    pub fn new(cycle: &'a TrapCycle, console: Console, pc: usize) -> Self {
        Self {
            cycle,
            console,
            pc,
            mtvec: 0,
            mstatus: 0,
            mepc: 0,
            mcause: 0,
            trap_cause: MACHINE_ECALL,
            redispatch: 0,
            traps_taken: 0,
            mie_in_handler: None,
            last_result: None,
        }
    }

    fn take_trap(&mut self) {
        let status = Mstatus::from_bits_retain(self.mstatus);
        let mut saved = status - (Mstatus::MIE | Mstatus::MPIE);
        if status.contains(Mstatus::MIE) {
            saved |= Mstatus::MPIE;
        }
        saved |= Mstatus::MPP;
        self.mstatus = saved.bits();
        self.mepc = self.pc;
        self.mcause = self.trap_cause;
        self.pc = self.mtvec;
        self.traps_taken += 1;
    }

    fn mret(&mut self) {
        let status = Mstatus::from_bits_retain(self.mstatus);
        let mut restored = status - (Mstatus::MIE | Mstatus::MPP);
        if status.contains(Mstatus::MPIE) {
            restored |= Mstatus::MIE;
        }
        restored |= Mstatus::MPIE;
        self.mstatus = restored.bits();
        self.pc = self.mepc;
    }
}

impl Hart for SimHart<'_> {
    fn write_vector(&mut self, vector: TrapVector) {
        self.mtvec = vector.bits();
    }

    fn read_vector(&self) -> TrapVector {
        TrapVector::from_bits(self.mtvec)
    }

    fn write_status(&mut self, status: Mstatus) {
        self.mstatus = status.bits();
    }

    fn read_epc(&self) -> usize {
        self.mepc
    }

    fn write_epc(&mut self, epc: usize) {
        self.mepc = epc;
    }

    fn read_cause(&self) -> usize {
        self.mcause
    }

    fn ecall(&mut self) {
        self.take_trap();
        self.mie_in_handler = Some(self.mstatus & Mstatus::MIE.bits() != 0);
        let cycle = self.cycle;
        let mut console = self.console.clone();
        for _ in 0..=self.redispatch {
            self.last_result = Some(cycle.handle(self, &mut console));
        }
        self.mret();
    }
}
