use crate::status::Mstatus;
use crate::vector::TrapVector;

/// Machine-mode CSR access plus the trap instruction.
///
/// `ecall` does not return in the usual sense: control goes to the trap
/// vector and only comes back through the handler's `mret`, at whatever
/// address the handler left in `mepc`.
pub trait Hart {
    fn write_vector(&mut self, vector: TrapVector);
    fn read_vector(&self) -> TrapVector;
    fn write_status(&mut self, status: Mstatus);
    fn read_epc(&self) -> usize;
    fn write_epc(&mut self, epc: usize);
    fn read_cause(&self) -> usize;
    fn ecall(&mut self);
}
