//! Common test utilities for fetchplan integration tests
//!
//! Every run gets its own temporary home, so neither the developer's
//! `.curlrc` nor their `config.toml` leaks into a test.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Exit status codes matching the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    BadDirective = 2,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            2 => ExitStatus::BadDirective,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

impl CliResponse {
    /// stdout parsed as a JSON plan
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("plan is not JSON ({e}):\n{}", self.stdout))
    }

    /// Operations of a JSON plan
    pub fn operations(&self) -> Vec<serde_json::Value> {
        self.json()["operations"].as_array().cloned().unwrap_or_default()
    }

    /// URLs of the `index`th operation of a JSON plan
    pub fn urls(&self, index: usize) -> Vec<String> {
        self.operations()[index]["urls"]
            .as_array()
            .map(|urls| {
                urls.iter()
                    .filter_map(|u| u["url"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Isolated home, config and curl directories for one run
pub struct TestEnvironment {
    pub home: TempDir,
    pub env_vars: HashMap<String, String>,
    pub stdin: Option<Vec<u8>>,
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnvironment {
    pub fn new() -> Self {
        let home = TempDir::new().expect("Failed to create temp home");
        Self {
            home,
            env_vars: HashMap::new(),
            stdin: None,
        }
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Directory holding fetchplan's `config.toml`
    pub fn config_path(&self) -> PathBuf {
        self.home.path().join("fetchplan")
    }

    /// Write `.curlrc` into the curl home
    pub fn write_rc(&self, content: &str) -> &Self {
        std::fs::write(self.home.path().join(".curlrc"), content).expect("Failed to write .curlrc");
        self
    }

    pub fn write_config(&self, content: &str) -> &Self {
        let dir = self.config_path();
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.toml"), content).expect("Failed to write config.toml");
        self
    }

    /// Write a file into the temporary home and return its path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.home.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_stdin(&mut self, content: &str) -> &mut Self {
        self.stdin = Some(content.as_bytes().to_vec());
        self
    }
}

/// Run fetchplan with the given arguments in a fresh environment
pub fn fetchplan(args: &[&str]) -> CliResponse {
    fetchplan_with_env(args, &TestEnvironment::new())
}

/// Run fetchplan with the given arguments and environment
pub fn fetchplan_with_env(args: &[&str], env: &TestEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fetchplan"));
    cmd.args(args);

    cmd.env_remove("RUST_LOG");
    cmd.env_remove("FETCHPLAN_DEBUG");
    cmd.env_remove("USERPROFILE");
    cmd.env("HOME", env.home_path());
    cmd.env("CURL_HOME", env.home_path());
    cmd.env("XDG_CONFIG_HOME", env.home_path());
    cmd.env("FETCHPLAN_CONFIG_DIR", env.config_path());
    for (key, value) in &env.env_vars {
        cmd.env(key, value);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(ref stdin_data) = env.stdin {
        cmd.stdin(Stdio::piped());
        let mut child = cmd.spawn().expect("Failed to spawn command");
        {
            let stdin = child.stdin.as_mut().expect("Failed to open stdin");
            stdin.write_all(stdin_data).expect("Failed to write to stdin");
        }
        let output = child.wait_with_output().expect("Failed to wait for command");
        parse_output(output)
    } else {
        cmd.stdin(Stdio::null());
        let output = cmd.output().expect("Failed to execute command");
        parse_output(output)
    }
}

/// Run fetchplan asking for a JSON plan
pub fn plan_json(args: &[&str], env: &TestEnvironment) -> CliResponse {
    let mut full = vec!["--plan-format", "json"];
    full.extend_from_slice(args);
    fetchplan_with_env(&full, env)
}

fn parse_output(output: Output) -> CliResponse {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(1);

    CliResponse {
        stdout,
        stderr,
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}
