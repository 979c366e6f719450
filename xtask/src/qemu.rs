use crate::arch::Arch;
use crate::config::Qemu;
use crate::util::run;
use std::path::Path;
use std::process::Command;
use which::which;

pub fn qemu_cmd(arch: Arch) -> anyhow::Result<String> {
    let qemu = which(arch.qemu())
        .map_err(|_| anyhow::anyhow!("[ ERROR ] {} not found in PATH", arch.qemu()))?;
    Ok(qemu.to_string_lossy().into_owned())
}

/// Bare-metal boot: no firmware, the ELF runs in M-mode from RAM base.
pub fn qemu_command(arch: Arch, cfg: &Qemu, cpus: u32, display: &str, elf: &Path) -> anyhow::Result<Command> {
    if !elf.exists() {
        return Err(anyhow::anyhow!("[ ERROR ] ELF not found: {}", elf.display()));
    }
    let mut cmd = Command::new(qemu_cmd(arch)?);
    cmd.arg("-machine").arg(&cfg.machine);
    if cpus > 1 {
        cmd.arg("-smp").arg(cpus.to_string());
    }
    cmd.arg("-m").arg(&cfg.mem);
    if display == "nographic" {
        cmd.arg("-nographic");
    } else if display == "none" {
        cmd.arg("-display").arg("none");
    } else {
        cmd.arg("-display").arg(display);
    }
    cmd.arg("-bios").arg("none").arg("-kernel").arg(elf);
    Ok(cmd)
}

pub fn qemu_run(arch: Arch, cfg: &Qemu, cpus: u32, display: &str, elf: &Path) -> anyhow::Result<()> {
    let mut cmd = qemu_command(arch, cfg, cpus, display, elf)?;
    run(&mut cmd)
}

pub fn qemu_gdb(arch: Arch, cfg: &Qemu, cpus: u32, display: &str, elf: &Path) -> anyhow::Result<()> {
    let mut cmd = qemu_command(arch, cfg, cpus, display, elf)?;
    cmd.arg("-S").arg("-s");
    eprintln!("QEMU started. In another shell:");
    if which("gdb").is_ok() || which("riscv64-elf-gdb").is_ok() {
        eprintln!(
            "  gdb -ex 'set architecture {}' -ex 'target remote :1234' -ex 'symbol-file {}'",
            arch.gdb_arch(),
            elf.display()
        );
    } else {
        eprintln!("[ ERROR ] install gdb or riscv64-elf-gdb first");
    }
    run(&mut cmd)
}
