use crate::arch::Arch;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use which::which;

pub fn run(cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("[ INFO ] Running: $ {:?}", cmd);
    let status =
        cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit()).status()?;
    if !status.success() {
        return Err(anyhow::anyhow!("[ ERROR ] command failed with status {}", status));
    }
    Ok(())
}

pub fn kernel_elf(arch: Arch, mode: &str) -> PathBuf {
    PathBuf::from("target").join(arch.target()).join(mode).join("kernel")
}

fn existing_elf(arch: Arch, mode: &str) -> anyhow::Result<PathBuf> {
    let elf = kernel_elf(arch, mode);
    if !elf.exists() {
        return Err(anyhow::anyhow!("[ ERROR ] ELF not found: {} (run `xtask build` first)", elf.display()));
    }
    Ok(elf)
}

pub fn objdump(arch: Arch, mode: &str) -> anyhow::Result<()> {
    let elf = existing_elf(arch, mode)?;
    let tool = which("riscv64-elf-objdump")
        .or_else(|_| which("riscv64-unknown-elf-objdump"))
        .or_else(|_| which("llvm-objdump"))
        .map_err(|_| anyhow::anyhow!("[ ERROR ] install objdump first"))?;
    let mut cmd = Command::new(tool);
    cmd.arg("-d").arg("--all-headers").arg("--source").arg(&elf);
    run(&mut cmd)
}

pub fn size(arch: Arch, mode: &str) -> anyhow::Result<()> {
    let elf = existing_elf(arch, mode)?;
    let tool = which("riscv64-elf-size")
        .or_else(|_| which("riscv64-unknown-elf-size"))
        .or_else(|_| which("size"))
        .map_err(|_| anyhow::anyhow!("[ ERROR ] install size first"))?;
    let mut cmd = Command::new(tool);
    cmd.arg("-A").arg(&elf);
    run(&mut cmd)
}
