use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_falcon");
pub const VALID_CLIENT_ID: &str = "0123456789abcdef0123456789abcdef";
pub const VALID_CLIENT_SECRET: &str = "0123456789ABCDEFGHIJabcdefghij0123456789";

/// Temporary HOME with an isolated profile store.
pub struct Sandbox {
    home: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("can create temporary HOME"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// Default store location under the sandboxed HOME.
    pub fn store_path(&self) -> PathBuf {
        self.home().join(".falcon").join("config.yaml")
    }

    pub fn write_store(&self, contents: &str) {
        let path = self.store_path();
        fs::create_dir_all(path.parent().expect("store has a parent"))
            .expect("can create store directory");
        fs::write(path, contents).expect("can write store");
    }

    pub fn read_store(&self) -> String {
        fs::read_to_string(self.store_path()).expect("store is readable")
    }

    /// `falcon` with a cleared environment, the sandbox HOME and prompting disabled.
    pub fn command(&self) -> Command {
        let mut command = Command::new(BINARY_PATH);
        command
            .env_clear()
            .env("HOME", self.home())
            .env("FALCON_DISABLE_PROMPT", "true")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut command = self.command();
        command.args(args);
        for (key, value) in env {
            command.env(key, value);
        }
        command.output().expect("falcon binary runs")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("process exited normally")
}
