// 保存 caller-saved 寄存器，调用 trap_machine_handler，恢复后 mret
unsafe extern "C" {
    pub fn machine_vector();
}

pub fn machine_vector_addr() -> usize {
    machine_vector as usize
}
