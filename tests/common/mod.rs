#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run vista commands in an isolated temp directory
pub struct VistaTest {
    pub temp_dir: TempDir,
    binary_path: &'static str,
}

impl VistaTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        VistaTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_vista"),
        }
    }

    /// Run with `.vista` in the temp directory as the root.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("VISTA_ROOT")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute vista command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Run with `--json` appended and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut args = args.to_vec();
        args.push("--json");
        let stdout = self.run_success(&args);
        serde_json::from_str(&stdout).expect("Failed to parse command output as JSON")
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join(".vista")
    }

    pub fn preferences_path(&self, workspace: &str) -> PathBuf {
        self.root().join("views").join(format!("{workspace}.yaml"))
    }

    pub fn read_preferences(&self, workspace: &str) -> String {
        fs::read_to_string(self.preferences_path(workspace))
            .expect("Failed to read preferences file")
    }

    pub fn write_preferences(&self, workspace: &str, content: &str) {
        let dir = self.root().join("views");
        fs::create_dir_all(&dir).expect("Failed to create .vista/views directory");
        fs::write(dir.join(format!("{workspace}.yaml")), content)
            .expect("Failed to write preferences file");
    }

    pub fn write_config(&self, content: &str) {
        fs::create_dir_all(self.root()).expect("Failed to create .vista directory");
        fs::write(self.root().join("config.yaml"), content).expect("Failed to write config file");
    }
}
