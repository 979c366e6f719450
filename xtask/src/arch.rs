use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Arch {
    Rv64,
    Rv32,
}

impl Arch {
    pub fn target(self) -> &'static str {
        match self {
            Arch::Rv64 => "riscv64gc-unknown-none-elf",
            Arch::Rv32 => "riscv32imac-unknown-none-elf",
        }
    }

    pub fn qemu(self) -> &'static str {
        match self {
            Arch::Rv64 => "qemu-system-riscv64",
            Arch::Rv32 => "qemu-system-riscv32",
        }
    }

    pub fn gdb_arch(self) -> &'static str {
        match self {
            Arch::Rv64 => "riscv:rv64",
            Arch::Rv32 => "riscv:rv32",
        }
    }
}
