use crate::arch::Arch;
use crate::util::{kernel_elf, run};
use std::path::PathBuf;
use std::process::Command;

/// Build the kernel ELF and return its path.
pub fn build_kernel(arch: Arch, mode: &str, features: &[String]) -> anyhow::Result<PathBuf> {
    let mut cmd = Command::new(std::env::var("CARGO").unwrap_or_else(|_| String::from("cargo")));
    cmd.arg("build").arg("-p").arg("kernel").arg("--target").arg(arch.target());

    // 链接脚本用绝对路径注入；--target 下 RUSTFLAGS 不会影响 build.rs
    let cwd = std::env::current_dir()?;
    let linker_script = cwd.join("kernel/src/linker.ld");
    let rustflags = format!("-C link-arg=-T{} -C link-arg=--gc-sections", linker_script.display());
    cmd.env("RUSTFLAGS", rustflags);

    if mode == "release" {
        cmd.arg("--release");
    }
    if !features.is_empty() {
        cmd.arg("--features").arg(features.join(","));
    }
    run(&mut cmd)?;
    Ok(kernel_elf(arch, mode))
}

/// Union of the command-line features and a test's own, without duplicates.
pub fn merge_features(base: &[String], extra: &[String]) -> Vec<String> {
    let mut feats = base.to_vec();
    for f in extra {
        if !feats.iter().any(|g| g == f) {
            feats.push(f.clone());
        }
    }
    feats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_order_and_drops_duplicates() {
        let base = vec![String::from("tests")];
        let extra = vec![String::from("tests"), String::from("verbose")];
        assert_eq!(merge_features(&base, &extra), vec!["tests", "verbose"]);
        assert!(merge_features(&[], &[]).is_empty());
    }
}
