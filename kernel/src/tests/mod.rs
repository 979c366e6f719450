mod trap;

use crate::hart::MachineHart;

pub fn test(hart: &MachineHart) {
    trap::run(hart);
}
