use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, PartialEq)]
pub struct Qemu {
    #[serde(default = "default_machine")]
    pub machine: String,
    #[serde(default = "default_mem")]
    pub mem: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for Qemu {
    fn default() -> Self {
        Self { machine: default_machine(), mem: default_mem(), timeout_secs: default_timeout() }
    }
}

fn default_machine() -> String {
    String::from("virt")
}

fn default_mem() -> String {
    String::from("128M")
}

fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct TestCase {
    pub name: String,
    /// Golden transcript, relative to the workspace root.
    pub expect: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub exit_code: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub qemu: Qemu,
    #[serde(default)]
    pub tests: Vec<TestCase>,
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(p: P) -> anyhow::Result<Self> {
        let p = p.as_ref();
        let s = fs::read_to_string(p).with_context(|| format!("[ ERROR ] cannot read {}", p.display()))?;
        Self::parse(&s).with_context(|| format!("[ ERROR ] invalid config {}", p.display()))
    }

    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let cfg: Config = toml::from_str(s)?;
        Ok(cfg)
    }

    /// Tests whose name starts with `prefix`, or all of them.
    pub fn select<'a>(&'a self, prefix: Option<&'a str>) -> impl Iterator<Item = &'a TestCase> + 'a {
        self.tests.iter().filter(move |t| prefix.map_or(true, |p| t.name.starts_with(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"
        [qemu]
        mem = "64M"

        [[tests]]
        name = "ecall"
        expect = "kernel/expected/ecall.out"

        [[tests]]
        name = "ecall-selfcheck"
        expect = "kernel/expected/ecall-selfcheck.out"
        features = ["tests"]
        exit_code = 0
    "#;

    #[test]
    fn parses_with_defaults() {
        let cfg = Config::parse(SAMPLE).unwrap();
        assert_eq!(cfg.qemu.machine, "virt");
        assert_eq!(cfg.qemu.mem, "64M");
        assert_eq!(cfg.qemu.timeout_secs, 10);
        assert_eq!(cfg.tests.len(), 2);
        assert!(cfg.tests[0].features.is_empty());
        assert_eq!(cfg.tests[1].features, vec![String::from("tests")]);
    }

    #[test]
    fn empty_config_is_valid() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.qemu, Qemu::default());
        assert!(cfg.tests.is_empty());
    }

    #[test]
    fn select_by_prefix() {
        let cfg = Config::parse(SAMPLE).unwrap();
        assert_eq!(cfg.select(None).count(), 2);
        let names: Vec<_> = cfg.select(Some("ecall-")).map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["ecall-selfcheck"]);
        assert_eq!(cfg.select(Some("nope")).count(), 0);
    }

    #[test]
    fn missing_name_is_an_error() {
        assert!(Config::parse("[[tests]]\nexpect = \"x\"\n").is_err());
    }

    #[test]
    fn workspace_config_points_at_existing_goldens() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");
        let cfg = Config::from_path(root.join("config.toml")).unwrap();
        assert!(!cfg.tests.is_empty());
        let transcript = format!(
            "{}{}{}00000001\n",
            trapcycle::JUMP_MSG,
            trapcycle::HANDLER_MSG,
            trapcycle::REPORT_PREFIX
        );
        for t in &cfg.tests {
            let golden = fs::read_to_string(root.join(&t.expect)).unwrap();
            assert!(golden.starts_with(&transcript), "{} does not open with the trap transcript", t.expect);
        }
    }
}
