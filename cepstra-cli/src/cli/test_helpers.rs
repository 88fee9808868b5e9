//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary reports and assert on the converted
//! files. These helpers keep the individual cases short.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{Cli, CliError, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn parameter(key: &str, path: &Path) -> String {
    format!("{key}={}", path.display())
}

pub(super) fn cli(silent: bool, parameters: &[String]) -> Cli {
    Cli {
        silent,
        parameters: parameters.to_vec(),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli, io::sink()) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
