use crate::printk;
use crate::printk::{ANSI_GREEN, ANSI_RESET, ANSI_YELLOW};
use crate::trap::{CYCLE, vector};
use crate::hart::MachineHart;
use trapcycle::{ECALL_ENCODING, Hart, TrapMode};

/// 陷阱周期结束后的自检
pub fn run(hart: &MachineHart) {
    vector_readback_test(hart);
    cycle_record_test();
    ecall_encoding_test();
}

fn vector_readback_test(hart: &MachineHart) {
    printk!("{}[TEST]{} mtvec readback", ANSI_YELLOW, ANSI_RESET);
    let vec = hart.read_vector();
    assert_eq!(vec.mode(), TrapMode::Direct, "mtvec is not in Direct mode");
    assert_eq!(vec.address(), vector::machine_vector_addr(), "mtvec does not point at machine_vector");
    printk!("{}[PASS]{} mtvec readback", ANSI_GREEN, ANSI_RESET);
}

fn cycle_record_test() {
    printk!("{}[TEST]{} trap cycle record", ANSI_YELLOW, ANSI_RESET);
    let rec = CYCLE.record();
    if let Err(err) = rec.verify() {
        panic!("trap cycle record: {}", err);
    }
    printk!("{}[PASS]{} trap cycle record", ANSI_GREEN, ANSI_RESET);
}

fn ecall_encoding_test() {
    printk!("{}[TEST]{} instruction at trap address", ANSI_YELLOW, ANSI_RESET);
    let rec = CYCLE.record();
    // ecall 只有 32 位编码；按半字读，避免 C 扩展下的非对齐访问
    let insn = unsafe {
        let p = rec.trap_epc as *const u16;
        (p.read_volatile() as u32) | ((p.add(1).read_volatile() as u32) << 16)
    };
    assert_eq!(insn, ECALL_ENCODING, "trap address does not hold ecall");
    printk!("{}[PASS]{} instruction at trap address", ANSI_GREEN, ANSI_RESET);
}
