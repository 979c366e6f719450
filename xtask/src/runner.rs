use crate::arch::Arch;
use crate::build::{build_kernel, merge_features};
use crate::check::{find_block, normalize};
use crate::config::{Config, Qemu, TestCase};
use crate::qemu::qemu_command;
use std::fs;
use std::path::Path;
use std::process::Stdio;
use std::thread;
use std::time::{Duration, Instant};

const END_COLOR: &str = "\x1b[0m";
const START_GREEN: &str = "\x1b[92m";
const START_RED: &str = "\x1b[31m";

enum Verdict {
    Passed,
    Failed { reason: String, output: String },
}

pub fn run_tests(
    arch: Arch,
    mode: &str,
    features: &[String],
    config_path: &str,
    prefix: Option<&str>,
) -> anyhow::Result<()> {
    let cfg = Config::from_path(config_path)?;
    let selected: Vec<&TestCase> = cfg.select(prefix).collect();
    if selected.is_empty() {
        return Err(anyhow::anyhow!("[ ERROR ] no test matches {:?} in {}", prefix.unwrap_or(""), config_path));
    }

    let mut failed = 0;
    for t in &selected {
        let feats = merge_features(features, &t.features);
        let elf = build_kernel(arch, mode, &feats)?;
        match run_one(arch, &cfg.qemu, &elf, t)? {
            Verdict::Passed => {
                println!("{:<40}{:>20}", t.name, format!("{}[PASSED]{}", START_GREEN, END_COLOR));
            }
            Verdict::Failed { reason, output } => {
                failed += 1;
                println!("{:<40}{:>20}", t.name, format!("{}[FAILED]{}", START_RED, END_COLOR));
                eprintln!("[ ERROR ] {}: {}", t.name, reason);
                eprintln!("--- captured output ---\n{}--- end ---", output);
            }
        }
    }

    if failed > 0 {
        return Err(anyhow::anyhow!("[ ERROR ] {} of {} tests failed", failed, selected.len()));
    }
    Ok(())
}

fn run_one(arch: Arch, qemu: &Qemu, elf: &Path, t: &TestCase) -> anyhow::Result<Verdict> {
    let golden = fs::read_to_string(&t.expect)
        .map_err(|e| anyhow::anyhow!("[ ERROR ] cannot read golden {}: {}", t.expect, e))?;

    let capture = tempfile::NamedTempFile::new()?;
    let mut cmd = qemu_command(arch, qemu, 1, "nographic", elf)?;
    cmd.stdin(Stdio::null()).stdout(Stdio::from(capture.reopen()?)).stderr(Stdio::inherit());
    eprintln!("[ INFO ] Running: $ {:?}", cmd);
    let mut child = cmd.spawn()?;

    let deadline = Instant::now() + Duration::from_secs(qemu.timeout_secs);
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if Instant::now() >= deadline {
            child.kill()?;
            child.wait()?;
            break None;
        }
        thread::sleep(Duration::from_millis(50));
    };

    let output = normalize(&String::from_utf8_lossy(&fs::read(capture.path())?));
    let verdict = match status {
        None => Verdict::Failed { reason: format!("timed out after {}s", qemu.timeout_secs), output },
        Some(status) => match find_block(&output, &golden) {
            Err(mismatch) => Verdict::Failed { reason: mismatch.to_string(), output },
            Ok(()) if status.code() != Some(t.exit_code) => Verdict::Failed {
                reason: format!("exit status {}, expected {}", status, t.exit_code),
                output,
            },
            Ok(()) => Verdict::Passed,
        },
    };
    Ok(verdict)
}
