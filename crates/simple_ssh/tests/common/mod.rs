//! Shared helpers for driving the `simple-ssh` binary.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub use tempfile::{tempdir, TempDir};

/// Isolated home and host store for one test.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join(".ssh-easy").join("config.json");
        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read_config(&self) -> Option<String> {
        std::fs::read_to_string(&self.config_path).ok()
    }

    /// Run the binary against this environment, feeding `stdin`.
    pub fn run(&self, args: &[&str], stdin: &str) -> CliOutput {
        let mut child = Command::new(env!("CARGO_BIN_EXE_simple-ssh"))
            .args(args)
            .env("HOME", self.path())
            .env("SIMPLE_SSH_CONFIG", &self.config_path)
            .env("USER", "tester")
            .env_remove("SIMPLE_SSH_BIN")
            .env_remove("SIMPLE_SSH_DEBUG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start simple-ssh");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");

        CliOutput::from(child.wait_with_output().expect("Failed to wait for simple-ssh"))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CliOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for CliOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
