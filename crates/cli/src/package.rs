//! Rebuilding the wasm-bindgen package with `wasm-pack`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::CliError;

/// Program invoked to compile the wasm crate.
pub const WASM_PACK: &str = "wasm-pack";

/// Where the wasm crate lives and where its package is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageBuild {
    pub crate_dir: PathBuf,
    pub out_dir: PathBuf,
}

fn absolute(path: &Path) -> Result<PathBuf, CliError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

impl PackageBuild {
    /// `wasm-pack build <crate> --target web --out-dir <out>`.
    ///
    /// wasm-pack resolves `--out-dir` against the crate, so the output
    /// directory is passed absolute.
    pub fn command(&self) -> Result<Command, CliError> {
        let mut command = Command::new(WASM_PACK);
        command
            .arg("build")
            .arg(&self.crate_dir)
            .args(["--target", "web", "--out-dir"])
            .arg(absolute(&self.out_dir)?)
            .arg("--no-pack");
        Ok(command)
    }

    /// Runs the build, failing on a missing tool or a non-zero exit.
    pub fn run(&self) -> Result<(), CliError> {
        log::info!("building wasm package from {}", self.crate_dir.display());
        let status = self
            .command()?
            .status()
            .map_err(|e| CliError::Io(format!("could not run {WASM_PACK}: {e}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(CliError::Io(format!("{WASM_PACK} failed: {status}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn args(command: &Command) -> Vec<&OsStr> {
        command.get_args().collect()
    }

    #[test]
    fn command_targets_web_and_writes_into_out_dir() {
        let build = PackageBuild {
            crate_dir: PathBuf::from("crates/wasm"),
            out_dir: PathBuf::from("/site/pkg"),
        };
        let command = build.command().unwrap();
        assert_eq!(command.get_program(), WASM_PACK);
        assert_eq!(
            args(&command),
            [
                "build",
                "crates/wasm",
                "--target",
                "web",
                "--out-dir",
                "/site/pkg",
                "--no-pack"
            ]
        );
    }

    #[test]
    fn relative_out_dir_is_made_absolute() {
        let build = PackageBuild {
            crate_dir: PathBuf::from("crates/wasm"),
            out_dir: PathBuf::from("pkg"),
        };
        let command = build.command().unwrap();
        let out = Path::new(args(&command)[5]);
        assert!(out.is_absolute());
        assert!(out.ends_with("pkg"));
    }
}
