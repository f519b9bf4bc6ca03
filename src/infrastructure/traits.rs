//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use walkdir::WalkDir;

use crate::domain::EntryKind;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Kind of the entry at `path`, without following symlinks.
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// Paths inside `dir`, sorted by file name. Direct children only unless
    /// `recursive` is set.
    fn read_dir(&self, dir: &Path, recursive: bool) -> io::Result<Vec<PathBuf>>;

    /// Remove a directory and all its contents.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments and capture its output.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;

    /// Run a command in `cwd` with inherited stdio. Blocks until it exits.
    fn run_interactive(&self, cmd: &str, args: &[&str], cwd: &Path) -> io::Result<ExitStatus>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let file_type = path.symlink_metadata()?.file_type();
        Ok(if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        })
    }

    fn read_dir(&self, dir: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
        let max_depth = if recursive { usize::MAX } else { 1 };
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| entry.map(walkdir::DirEntry::into_path).map_err(io::Error::from))
            .collect()
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }

    fn run_interactive(&self, cmd: &str, args: &[&str], cwd: &Path) -> io::Result<ExitStatus> {
        std::process::Command::new(cmd)
            .args(args)
            .current_dir(cwd)
            .status()
    }
}
