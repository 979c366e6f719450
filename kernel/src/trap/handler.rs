use super::CYCLE;
use crate::hart::{self, MachineHart};
use crate::printk;
use crate::printk::{ANSI_RED, ANSI_RESET};
use driver_uart::Writer;
use riscv::register::{mcause, mepc, mtval};
use trapcycle::Cause;

/// M-mode 陷阱处理函数
/// 在 machine_vector 汇编代码中被调用，返回后由汇编执行 mret
#[unsafe(no_mangle)]
pub extern "C" fn trap_machine_handler() {
    hart::enter();
    if let Err(err) = CYCLE.handle(&mut MachineHart, &mut Writer) {
        let bits = mcause::read().bits();
        let cause = Cause::from_bits(bits);
        printk!(
            "{}TRAP({}){}: code={} ({}); mepc=0x{:x}, mtval=0x{:x}",
            ANSI_RED,
            if matches!(cause, Cause::Interrupt(_)) { "Interrupt" } else { "Exception" },
            ANSI_RESET,
            cause.code(),
            cause.describe(),
            mepc::read(),
            mtval::read()
        );
        panic!("unhandled trap: {}", err);
    }
    hart::exit();
}
