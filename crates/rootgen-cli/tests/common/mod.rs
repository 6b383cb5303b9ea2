//! Shared helpers for the CLI end-to-end tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A Go project in a temporary directory, with its own config home.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// `<tmp>/shop` with a go.mod declaring `example.com/shop`.
    pub fn new() -> Self {
        let project = Self::bare();
        project.write("go.mod", "module example.com/shop\n\ngo 1.22\n");
        project
    }

    /// `<tmp>/shop` without go.mod.
    pub fn bare() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("shop")).unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("shop")
    }

    pub fn root_file(&self) -> PathBuf {
        self.root().join("cmd").join("root.go")
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).unwrap()
    }

    /// `rootgen` running inside the project root with an isolated
    /// environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = rootgen();
        isolate(&mut cmd, self.dir.path().join("home").as_path());
        cmd.current_dir(self.root());
        cmd
    }
}

pub fn rootgen() -> Command {
    Command::cargo_bin("rootgen").unwrap()
}

/// Keep the user's config, colours and log settings out of the test.
pub fn isolate(cmd: &mut Command, home: &Path) {
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ROOTGEN__PROJECT__CMD_DIR")
        .env_remove("ROOTGEN__PROJECT__GLOBAL_DIR")
        .env_remove("ROOTGEN__PROJECT__MODULE")
        .env_remove("ROOTGEN__OUTPUT__FORMAT")
        .env_remove("ROOTGEN__OUTPUT__NO_COLOR");
}
