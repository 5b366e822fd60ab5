//! CLI entry point for the repo-local architecture lint.
//!
//! Usage: `architecture-lint [CLIENT_DIR]`. Without an argument the `client/`
//! directory of the enclosing workspace is linted.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let client_dir = match env::args_os().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => match workspace_root() {
            Some(root) => root.join("client"),
            None => {
                return fail(
                    "unable to locate workspace root (directory containing a workspace Cargo.toml)",
                );
            }
        },
    };

    match architecture_lint::lint_client_sources(&client_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err.to_string()),
    }
}

fn fail(message: &str) -> ExitCode {
    // Nothing useful remains to do if stderr itself is gone.
    let _ = writeln!(io::stderr().lock(), "{message}");
    ExitCode::FAILURE
}

/// First ancestor of the working directory, then of this crate, whose
/// `Cargo.toml` declares a workspace.
fn workspace_root() -> Option<PathBuf> {
    let starts = [
        env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    starts
        .into_iter()
        .flatten()
        .find_map(|start| start.ancestors().find(|dir| declares_workspace(dir)).map(Path::to_path_buf))
}

fn declares_workspace(dir: &Path) -> bool {
    fs::read_to_string(dir.join("Cargo.toml"))
        .is_ok_and(|contents| contents.contains("[workspace]"))
}
