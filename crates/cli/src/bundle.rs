//! Assembling the deliverable `dist/` folder.
//!
//! A build empties the output directory, copies every static resource
//! (keeping relative paths), copies the wasm-bindgen package, checks that
//! each demo's images are present, and writes a `demos.json` manifest.

use std::fs;
use std::path::{Path, PathBuf};

use glbook_core::{DemoError, DemoKind, DemoOptions, ImageSampling};
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::CliError;

/// File name of the manifest written into the output directory.
pub const MANIFEST_FILE: &str = "demos.json";

/// Extensions picked up from the wasm-bindgen package directory.
const PACKAGE_EXTENSIONS: &[&str] = &["js", "wasm", "ts"];

/// Source and output directories of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    pub resources: PathBuf,
    pub pkg: PathBuf,
    pub out: PathBuf,
}

/// One demo image found in the resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReport {
    pub demo: &'static str,
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub sampling: ImageSampling,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoEntry {
    pub name: &'static str,
    pub images: Vec<&'static str>,
    pub target_size: Option<u32>,
}

/// Contents of `demos.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub canvas_id: &'static str,
    pub demos: Vec<DemoEntry>,
}

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub resources_copied: usize,
    pub package_files: usize,
    pub assets: Vec<AssetReport>,
}

/// Removes everything inside `out`, creating it if absent.
///
/// Returns the number of top-level entries removed.
pub fn clean(out: &Path) -> Result<usize, CliError> {
    if !out.exists() {
        fs::create_dir_all(out)?;
        return Ok(0);
    }
    if !out.is_dir() {
        return Err(CliError::Input(format!(
            "output path {} is not a directory",
            out.display()
        )));
    }

    let mut removed = 0;
    for entry in fs::read_dir(out)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        removed += 1;
    }
    log::debug!("cleaned {removed} entries from {}", out.display());
    Ok(removed)
}

/// Copies every file under `src` into `dst`, preserving relative paths.
///
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, CliError> {
    if !src.is_dir() {
        return Err(CliError::Input(format!(
            "resource directory {} does not exist",
            src.display()
        )));
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| CliError::Io(e.to_string()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn is_package_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PACKAGE_EXTENSIONS.contains(&ext))
}

/// Copies the top-level script, wasm and typing files of the wasm-bindgen
/// package into `out`. A missing package directory only warns.
pub fn copy_package(pkg: &Path, out: &Path) -> Result<usize, CliError> {
    if !pkg.is_dir() {
        log::warn!(
            "package directory {} not found; build the wasm crate first",
            pkg.display()
        );
        return Ok(0);
    }

    let mut copied = 0;
    for entry in fs::read_dir(pkg)? {
        let path = entry?.path();
        if path.is_file() && is_package_file(&path) {
            if let Some(name) = path.file_name() {
                fs::copy(&path, out.join(name))?;
                copied += 1;
            }
        }
    }
    Ok(copied)
}

/// Checks that every demo image exists under `resources` and reads its size.
///
/// All missing images are reported together.
pub fn check_assets(resources: &Path) -> Result<Vec<AssetReport>, CliError> {
    let mut reports = Vec::new();
    let mut missing = Vec::new();

    for name in DemoKind::list_demos() {
        let kind = DemoKind::from_name(name)?;
        for path in kind.image_paths() {
            let file = resources.join(path);
            if !file.is_file() {
                missing.push(format!("{path} (used by {name})"));
                continue;
            }
            let (width, height) = image::image_dimensions(&file)?;
            let sampling = ImageSampling::for_size(width, height);
            log::info!("{name}: {path} {width}x{height} -> {sampling:?}");
            reports.push(AssetReport {
                demo: kind.name(),
                path: path.to_string(),
                width,
                height,
                sampling,
            });
        }
    }

    if missing.is_empty() {
        Ok(reports)
    } else {
        Err(DemoError::MissingAsset(missing.join(", ")).into())
    }
}

/// Describes every demo for the page scripts.
pub fn manifest() -> Result<Manifest, CliError> {
    let demos = DemoKind::list_demos()
        .iter()
        .map(|name| {
            let kind = DemoKind::from_name(name)?;
            let options = DemoOptions::defaults(kind);
            Ok(DemoEntry {
                name: kind.name(),
                images: kind.image_paths().to_vec(),
                target_size: kind.uses_offscreen_target().then_some(options.target_size),
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    Ok(Manifest {
        canvas_id: "glCanvas",
        demos,
    })
}

/// Runs a full build into `layout.out`.
pub fn build(layout: &BundleLayout) -> Result<BuildReport, CliError> {
    let assets = check_assets(&layout.resources)?;

    clean(&layout.out)?;
    let resources_copied = copy_tree(&layout.resources, &layout.out)?;
    let package_files = copy_package(&layout.pkg, &layout.out)?;

    let manifest = serde_json::to_string_pretty(&manifest()?)?;
    fs::write(layout.out.join(MANIFEST_FILE), manifest)?;

    log::info!(
        "built {}: {resources_copied} resource file(s), {package_files} package file(s)",
        layout.out.display()
    );
    Ok(BuildReport {
        resources_copied,
        package_files,
        assets,
    })
}
