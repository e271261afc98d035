//! Scratch directory trees and a stand-in git executable.
//!
//! The fake git appends the name of the directory it ran in to the file named
//! by `MGIT_TEST_LOG`, echoes its arguments, and exits with status 3 in any
//! directory whose name starts with `fail`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_GIT: &str = r#"#!/bin/sh
name=$(basename "$PWD")
if [ -n "$MGIT_TEST_LOG" ]; then
    echo "$name" >> "$MGIT_TEST_LOG"
fi
echo "fake git in $name: $*"
case "$name" in
    fail*) echo "fatal: simulated failure in $name" >&2; exit 3 ;;
esac
exit 0
"#;

/// A directory holding repositories plus the tooling to run mgit on it
pub struct WorkspaceFixture {
    root: TempDir,
    tools: TempDir,
}

impl WorkspaceFixture {
    pub fn new() -> Self {
        let fixture = Self {
            root: TempDir::new().expect("Failed to create workspace dir"),
            tools: TempDir::new().expect("Failed to create tools dir"),
        };
        install_fake_git(&fixture.git_path());
        fixture
    }

    /// Workspace with the given repositories already created
    pub fn with_repositories(names: &[&str]) -> Self {
        let fixture = Self::new();
        for name in names {
            fixture.add_repository(name);
        }
        fixture
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn git_path(&self) -> PathBuf {
        self.tools.path().join("git")
    }

    /// Install another copy of the fake git inside the workspace
    pub fn install_git_in_workspace(&self, relative: &str) -> PathBuf {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create tool directory");
        }
        install_fake_git(&path);
        path
    }

    pub fn log_path(&self) -> PathBuf {
        self.tools.path().join("calls.log")
    }

    pub fn add_repository(&self, name: &str) -> PathBuf {
        let repo = self.root.path().join(name);
        fs::create_dir_all(repo.join(".git")).expect("Failed to create repository");
        repo
    }

    pub fn add_plain_directory(&self, name: &str) -> PathBuf {
        let dir = self.root.path().join(name);
        fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Write a file relative to the workspace root
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(relative);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write a filtering file outside the scanned tree
    pub fn write_filter_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.tools.path().join(name);
        fs::write(&path, content).expect("Failed to write filtering file");
        path
    }

    /// Directory names the fake git ran in, in call order
    pub fn calls(&self) -> Vec<String> {
        match fs::read_to_string(self.log_path()) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn install_fake_git(path: &Path) {
    fs::write(path, FAKE_GIT).expect("Failed to write fake git");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake git executable");
}
