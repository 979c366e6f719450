use clap::{Parser, Subcommand};
mod arch;
mod build;
mod check;
mod config;
mod qemu;
mod runner;
mod util;

use arch::Arch;
use config::Config;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "xtask", version, about = "trapcycle build system")]
struct Xtask {
    #[arg(long, global = true)]
    release: bool,

    #[arg(long = "features", value_delimiter = ',', num_args(0..), global = true)]
    features: Vec<String>,

    /// Target ISA
    #[arg(long, value_enum, default_value_t = Arch::Rv64, global = true)]
    arch: Arch,

    /// Test and QEMU configuration
    #[arg(long, default_value = "config.toml", global = true)]
    config: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Build the kernel
    Build,
    /// Build then boot the kernel in QEMU
    Run {
        /// Number of virtual CPUs to pass to QEMU; all but hart 0 are parked
        #[arg(long, default_value_t = 1)]
        cpus: u32,

        /// Display device for QEMU. Use "nographic" for serial-only, or a display backend (e.g. "gtk", "sdl", "none").
        #[arg(long, default_value = "nographic")]
        display: String,
    },
    /// Run every configured test whose name starts with PREFIX and compare against its golden output
    Test {
        prefix: Option<String>,
    },
    /// Start QEMU paused and wait for GDB
    Gdb {
        /// Build with the in-kernel self-checks
        #[arg(long, default_value_t = false)]
        test: bool,
    },
    /// Disassemble the kernel ELF
    Objdump,
    /// Show section sizes
    Size,
}

/// `[qemu]` from the config file, or the defaults when there is none.
fn qemu_config(path: &str) -> anyhow::Result<config::Qemu> {
    if !Path::new(path).exists() {
        eprintln!("[ WARN ] {} not found, using QEMU defaults", path);
        return Ok(config::Qemu::default());
    }
    Ok(Config::from_path(path)?.qemu)
}

fn main() -> anyhow::Result<()> {
    let xtask = Xtask::parse();
    let mode = if xtask.release { "release" } else { "debug" };
    let arch = xtask.arch;

    match xtask.cmd {
        Cmd::Build => {
            build::build_kernel(arch, mode, &xtask.features)?;
        }
        Cmd::Run { cpus, display } => {
            let elf = build::build_kernel(arch, mode, &xtask.features)?;
            qemu::qemu_run(arch, &qemu_config(&xtask.config)?, cpus, &display, &elf)?;
        }
        Cmd::Test { prefix } => {
            runner::run_tests(arch, mode, &xtask.features, &xtask.config, prefix.as_deref())?;
        }
        Cmd::Gdb { test } => {
            let feats = if test {
                build::merge_features(&xtask.features, &[String::from("tests")])
            } else {
                xtask.features.clone()
            };
            let elf = build::build_kernel(arch, mode, &feats)?;
            qemu::qemu_gdb(arch, &qemu_config(&xtask.config)?, 1, "nographic", &elf)?;
        }
        Cmd::Objdump => util::objdump(arch, mode)?,
        Cmd::Size => util::size(arch, mode)?,
    }
    Ok(())
}
