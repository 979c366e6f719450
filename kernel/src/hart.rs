use core::sync::atomic::{AtomicUsize, Ordering};

use riscv::register::mtvec::{self, Mtvec};
use riscv::register::{mcause, mepc};
use trapcycle::{Hart, Mstatus, TrapMode, TrapVector};

static NEST_COUNT: AtomicUsize = AtomicUsize::new(0);

pub fn nest_count() -> usize {
    NEST_COUNT.load(Ordering::SeqCst)
}

pub fn enter() {
    NEST_COUNT.fetch_add(1, Ordering::SeqCst);
}

pub fn exit() {
    let _ = NEST_COUNT.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
}

/// The hart we are running on, seen through its M-mode CSRs.
pub struct MachineHart;

impl Hart for MachineHart {
    fn write_vector(&mut self, vector: TrapVector) {
        let mode = match vector.mode() {
            TrapMode::Direct => mtvec::TrapMode::Direct,
            TrapMode::Vectored => mtvec::TrapMode::Vectored,
        };
        unsafe {
            mtvec::write(Mtvec::new(vector.address(), mode));
        }
    }

    fn read_vector(&self) -> TrapVector {
        TrapVector::from_bits(mtvec::read().bits())
    }

    fn write_status(&mut self, status: Mstatus) {
        // 整个寄存器写成固定值，而不是只置位
        unsafe {
            core::arch::asm!("csrw mstatus, {}", in(reg) status.bits());
        }
    }

    fn read_epc(&self) -> usize {
        mepc::read()
    }

    fn write_epc(&mut self, epc: usize) {
        unsafe {
            mepc::write(epc);
        }
    }

    fn read_cause(&self) -> usize {
        mcause::read().bits()
    }

    fn ecall(&mut self) {
        // 不加 nomem：编译器必须认为 handler 可能改了内存
        unsafe {
            core::arch::asm!("ecall");
        }
    }
}
