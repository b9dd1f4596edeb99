#![allow(dead_code)]

pub mod mock_data;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Helper struct to run finboard commands in an isolated temp directory
pub struct BoardTest {
    pub temp_dir: TempDir,
    binary_path: &'static str,
}

impl BoardTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        BoardTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_finboard"),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(self.binary_path);
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            // Keep test runs off the network and the developer's environment
            .env("FINBOARD_MOVIES_URL", "http://127.0.0.1:9")
            .env("FINBOARD_USERS_URL", "http://127.0.0.1:9/api/")
            .env_remove("FINBOARD_LOG");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute finboard command")
    }

    /// Run with `input` piped to stdin
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn finboard command");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child
            .wait_with_output()
            .expect("Failed to wait for finboard command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_success(args, &output);
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

    /// Write a JSON payload into the temp dir and return its path as a string
    pub fn write_json(&self, name: &str, value: &serde_json::Value) -> String {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, value.to_string()).expect("Failed to write JSON fixture");
        path.to_string_lossy().to_string()
    }

    pub fn write_config(&self, content: &str) {
        let dir = self.temp_dir.path().join(".finboard");
        fs::create_dir_all(&dir).expect("Failed to create .finboard directory");
        fs::write(dir.join("config.yaml"), content).expect("Failed to write config file");
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".finboard").join("config.yaml")
    }

    pub fn read_config(&self) -> Option<String> {
        fs::read_to_string(self.config_path()).ok()
    }
}

pub fn assert_success(args: &[&str], output: &Output) {
    if !output.status.success() {
        panic!(
            "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
