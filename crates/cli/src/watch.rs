//! Rebuild-on-change loop.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, RecursiveMode, Watcher};

use crate::bundle::{self, BundleLayout};
use crate::error::CliError;
use crate::package::PackageBuild;

/// Quiet period after an event before rebuilding, so a burst of saves
/// triggers one build.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// What a file-system event asks the watcher to redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Change {
    Ignored,
    /// A resource or package file changed: re-copy into the output.
    Bundle,
    /// Rust sources changed: rebuild the package, then re-copy.
    Source,
}

/// Directories the watcher observes, in the form event paths arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchPaths {
    pub resources: PathBuf,
    pub pkg: PathBuf,
    pub out: PathBuf,
    /// Crate directories whose `.rs` files and `Cargo.toml` feed the package.
    pub sources: Vec<PathBuf>,
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

impl WatchPaths {
    pub fn new(layout: &BundleLayout, sources: &[PathBuf]) -> Self {
        Self {
            resources: canonical(&layout.resources),
            pkg: canonical(&layout.pkg),
            out: canonical(&layout.out),
            sources: sources.iter().map(|s| canonical(s)).collect(),
        }
    }

    fn is_source(&self, path: &Path) -> bool {
        let rust_file = path.extension().is_some_and(|ext| ext == "rs")
            || path.file_name().is_some_and(|name| name == "Cargo.toml");
        rust_file && self.sources.iter().any(|dir| path.starts_with(dir))
    }

    fn classify_path(&self, path: &Path) -> Change {
        if path.starts_with(&self.out) {
            Change::Ignored
        } else if self.is_source(path) {
            Change::Source
        } else if path.starts_with(&self.resources) || path.starts_with(&self.pkg) {
            Change::Bundle
        } else {
            Change::Ignored
        }
    }

    /// The strongest change among the paths of a create, modify or remove.
    /// Writes inside the output directory never trigger a rebuild.
    pub fn classify(&self, event: &Event) -> Change {
        let kind = &event.kind;
        if !(kind.is_create() || kind.is_modify() || kind.is_remove()) {
            return Change::Ignored;
        }
        event
            .paths
            .iter()
            .map(|path| self.classify_path(path))
            .max()
            .unwrap_or(Change::Ignored)
    }
}

/// Redoes the work `change` calls for. Failures are logged, not returned,
/// so a bad edit never stops the watcher.
pub fn rebuild(layout: &BundleLayout, package: Option<&PackageBuild>, change: Change) {
    if change == Change::Source {
        if let Some(package) = package {
            if let Err(e) = package.run() {
                log::error!("package rebuild failed, copying the previous package: {e}");
            }
        }
    }
    match bundle::build(layout) {
        Ok(report) => log::info!(
            "rebuilt: {} resource file(s), {} package file(s)",
            report.resources_copied,
            report.package_files
        ),
        Err(e) => log::error!("rebuild failed: {e}"),
    }
}

/// Rebuilds each time the resources, the package or the Rust sources
/// change. With `package` set, source changes rerun `wasm-pack` before
/// the copy.
///
/// Returns only when the watcher itself fails.
pub fn watch(
    layout: &BundleLayout,
    package: Option<&PackageBuild>,
    sources: &[PathBuf],
) -> Result<(), CliError> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(&layout.resources, RecursiveMode::Recursive)?;
    if layout.pkg.is_dir() {
        watcher.watch(&layout.pkg, RecursiveMode::NonRecursive)?;
    } else {
        log::warn!("not watching {}: directory missing", layout.pkg.display());
    }
    for dir in sources {
        if dir.is_dir() {
            watcher.watch(dir, RecursiveMode::Recursive)?;
        } else {
            log::warn!("not watching sources in {}: directory missing", dir.display());
        }
    }
    log::info!(
        "watching {} and {} source dir(s) for changes (ctrl-c to stop)",
        layout.resources.display(),
        sources.len()
    );

    let paths = WatchPaths::new(layout, sources);

    loop {
        let event = rx
            .recv()
            .map_err(|e| CliError::Io(format!("file watcher channel closed: {e}")))??;
        let mut change = paths.classify(&event);
        if change == Change::Ignored {
            continue;
        }
        log::debug!("change: {:?} {:?}", event.kind, event.paths);

        while let Ok(next) = rx.recv_timeout(DEBOUNCE) {
            if let Ok(next) = next {
                change = change.max(paths.classify(&next));
            }
        }

        // wasm-pack writes into pkg/, which shows up as a Bundle change
        // after the rebuild; those events are drained here.
        rebuild(layout, package, change);
        while rx.recv_timeout(DEBOUNCE).is_ok() {}
    }
}
