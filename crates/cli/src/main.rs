#![deny(unsafe_code)]
//! CLI binary for the glbook WebGL demos.
//!
//! Subcommands:
//! - `clean`: empty the output directory
//! - `build`: assemble resources, wasm package and manifest into it
//! - `watch`: build, then rebuild on every change (rerunning wasm-pack
//!   when the Rust sources change)
//! - `serve`: build, then serve the output directory over HTTP
//! - `list`: print available demos and their images
//! - `plan <demo>`: step a demo headlessly and print its draw passes

mod bundle;
mod error;
mod package;
mod serve;
mod watch;

use bundle::BundleLayout;
use clap::{Args, Parser, Subcommand};
use error::CliError;
use glbook_core::control::FRAME_MAX;
use glbook_core::{CanvasSize, Demo, DemoControl, DemoKind, DrawPass, PassTarget, TextureSlot};
use package::PackageBuild;
use serde::Serialize;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "glbook", about = "Build tool and inspector for the glbook WebGL demos")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Static resources copied verbatim into the output.
    #[arg(long, global = true, default_value = "resources")]
    resources: PathBuf,

    /// wasm-bindgen output directory.
    #[arg(long, global = true, default_value = "pkg")]
    pkg: PathBuf,

    /// Output directory.
    #[arg(long, global = true, default_value = "dist")]
    out: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove everything in the output directory.
    Clean,
    /// Clean, then copy resources and the wasm package into the output.
    Build,
    /// Build, then rebuild whenever resources, the package or the Rust
    /// sources change.
    Watch {
        #[command(flatten)]
        args: WatchArgs,
    },
    /// Build, then serve the output directory over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = serve::DEFAULT_ADDR)]
        addr: String,

        /// Keep rebuilding in the background while serving.
        #[arg(long)]
        watch: bool,

        #[command(flatten)]
        watch_args: WatchArgs,
    },
    /// List available demos.
    List,
    /// Step a demo at a fixed rate and print the passes of each frame.
    Plan {
        /// Demo name (e.g. "render-to-texture").
        demo: String,

        /// Number of frames to plan.
        #[arg(short, long, default_value_t = FRAME_MAX)]
        frames: usize,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 640)]
        width: u32,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 480)]
        height: u32,

        /// Demo options as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

#[derive(Args, Clone)]
struct WatchArgs {
    /// Crate compiled by wasm-pack into the package directory.
    #[arg(long, default_value = "crates/wasm")]
    wasm_crate: PathBuf,

    /// Crate directories whose Rust sources trigger a package rebuild.
    #[arg(long = "source", default_values = ["crates/core", "crates/wasm"])]
    sources: Vec<PathBuf>,

    /// Only re-copy resources and the existing package; never run wasm-pack.
    #[arg(long)]
    no_package: bool,
}

impl WatchArgs {
    fn package(&self, layout: &BundleLayout) -> Option<PackageBuild> {
        (!self.no_package).then(|| PackageBuild {
            crate_dir: self.wasm_crate.clone(),
            out_dir: layout.pkg.clone(),
        })
    }
}

#[derive(Serialize)]
struct PassSummary {
    target: PassTarget,
    width: u32,
    height: u32,
    clear_color: [f32; 4],
    textures: Vec<TextureSlot>,
    cull_back_faces: bool,
    index_count: usize,
}

impl From<&DrawPass> for PassSummary {
    fn from(pass: &DrawPass) -> Self {
        Self {
            target: pass.target,
            width: pass.viewport.width,
            height: pass.viewport.height,
            clear_color: pass.clear_color,
            textures: pass.textures.clone(),
            cull_back_faces: pass.cull_back_faces,
            index_count: pass.index_count,
        }
    }
}

#[derive(Serialize)]
struct FrameSummary {
    frame: usize,
    angle: f32,
    passes: Vec<PassSummary>,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn plan_frames(
    demo: &Demo,
    frames: usize,
    canvas: CanvasSize,
) -> Result<Vec<FrameSummary>, CliError> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(glbook_core::DemoError::InvalidDimensions.into());
    }

    let mut rotation = demo.rotation();
    DemoControl::default()
        .angles(&mut rotation, frames)
        .into_iter()
        .enumerate()
        .map(|(frame, angle)| {
            let plan = demo.plan(angle, canvas);
            if !plan.offscreen_written_before_read() {
                return Err(CliError::Demo(glbook_core::DemoError::Gl(format!(
                    "frame {frame} samples the off-screen texture before drawing it"
                ))));
            }
            Ok(FrameSummary {
                frame,
                angle,
                passes: plan.passes().iter().map(PassSummary::from).collect(),
            })
        })
        .collect()
}

fn run(cli: Cli) -> Result<(), CliError> {
    let layout = BundleLayout {
        resources: cli.resources,
        pkg: cli.pkg,
        out: cli.out,
    };

    match cli.command {
        Command::Clean => {
            let removed = bundle::clean(&layout.out)?;
            if cli.json {
                print_json(&serde_json::json!({
                    "out": layout.out.display().to_string(),
                    "removed": removed,
                }))?;
            } else {
                eprintln!("cleaned {} ({removed} entries)", layout.out.display());
            }
        }
        Command::Build => {
            let report = bundle::build(&layout)?;
            if cli.json {
                print_json(&report)?;
            } else {
                eprintln!(
                    "built {} ({} resources, {} package files, {} images)",
                    layout.out.display(),
                    report.resources_copied,
                    report.package_files,
                    report.assets.len()
                );
            }
        }
        Command::Watch { args } => {
            let package = args.package(&layout);
            watch::rebuild(&layout, package.as_ref(), watch::Change::Source);
            watch::watch(&layout, package.as_ref(), &args.sources)?;
        }
        Command::Serve {
            addr,
            watch,
            watch_args,
        } => {
            if watch {
                let package = watch_args.package(&layout);
                watch::rebuild(&layout, package.as_ref(), watch::Change::Source);
                let layout = layout.clone();
                std::thread::spawn(move || {
                    if let Err(e) = watch::watch(&layout, package.as_ref(), &watch_args.sources) {
                        log::error!("watcher stopped: {e}");
                    }
                });
            } else {
                bundle::build(&layout)?;
            }
            serve::serve(&layout.out, &addr)?;
        }
        Command::List => {
            let manifest = bundle::manifest()?;
            if cli.json {
                print_json(&manifest)?;
            } else {
                println!("Demos:");
                for demo in &manifest.demos {
                    if demo.images.is_empty() {
                        println!("  {}", demo.name);
                    } else {
                        println!("  {} ({})", demo.name, demo.images.join(", "));
                    }
                }
            }
        }
        Command::Plan {
            demo,
            frames,
            width,
            height,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let demo = Demo::from_name(&demo, &params)?;
            let canvas = CanvasSize::square_pixels(width, height);
            let summaries = plan_frames(&demo, frames, canvas)?;

            if cli.json {
                print_json(&summaries)?;
            } else {
                for summary in &summaries {
                    println!("frame {:>3}  angle {:.3}", summary.frame, summary.angle);
                    for pass in &summary.passes {
                        println!(
                            "  {:?} {}x{} textures {:?} indices {}",
                            pass.target, pass.width, pass.height, pass.textures, pass.index_count
                        );
                    }
                }
                log::info!(
                    "planned {} frame(s) of {}",
                    summaries.len(),
                    demo.kind().name()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn demo(name: &str) -> Demo {
        Demo::from_name(name, &serde_json::json!({})).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_defaults_to_frame_max() {
        let cli = Cli::try_parse_from(["glbook", "plan", "animated-cube"]).unwrap();
        match cli.command {
            Command::Plan { frames, .. } => assert_eq!(frames, 512),
            _ => panic!("expected plan"),
        }
        assert_eq!(cli.out, PathBuf::from("dist"));
    }

    #[test]
    fn watch_defaults_to_rebuilding_the_wasm_package() {
        let cli = Cli::try_parse_from(["glbook", "watch"]).unwrap();
        let Command::Watch { args } = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(
            args.sources,
            [PathBuf::from("crates/core"), PathBuf::from("crates/wasm")]
        );
        let layout = BundleLayout {
            resources: cli.resources,
            pkg: cli.pkg,
            out: cli.out,
        };
        let package = args.package(&layout).unwrap();
        assert_eq!(package.crate_dir, PathBuf::from("crates/wasm"));
        assert_eq!(package.out_dir, PathBuf::from("pkg"));
    }

    #[test]
    fn serve_parses_address_and_watch_flags() {
        let cli = Cli::try_parse_from([
            "glbook",
            "serve",
            "--addr",
            "0.0.0.0:8080",
            "--watch",
            "--no-package",
            "--source",
            "crates/core",
        ])
        .unwrap();
        let Command::Serve {
            addr,
            watch,
            watch_args,
        } = cli.command
        else {
            panic!("expected serve");
        };
        assert_eq!(addr, "0.0.0.0:8080");
        assert!(watch);
        assert_eq!(watch_args.sources, [PathBuf::from("crates/core")]);
        let layout = BundleLayout {
            resources: cli.resources,
            pkg: cli.pkg,
            out: cli.out,
        };
        assert!(watch_args.package(&layout).is_none());
    }

    #[test]
    fn serve_defaults_to_local_port_3000() {
        let cli = Cli::try_parse_from(["glbook", "serve"]).unwrap();
        let Command::Serve { addr, watch, .. } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(addr, "127.0.0.1:3000");
        assert!(!watch);
    }

    #[test]
    fn every_planned_pass_draws_36_indices() {
        let canvas = CanvasSize::square_pixels(640, 480);
        for name in DemoKind::list_demos() {
            let frames = plan_frames(&demo(name), 8, canvas).unwrap();
            assert_eq!(frames.len(), 8);
            for frame in &frames {
                assert!(frame.passes.iter().all(|p| p.index_count == 36));
            }
        }
    }

    #[test]
    fn render_to_texture_plans_offscreen_first() {
        let frames = plan_frames(
            &demo("render-to-texture"),
            3,
            CanvasSize::square_pixels(640, 480),
        )
        .unwrap();
        for frame in &frames {
            assert_eq!(frame.passes[0].target, PassTarget::Offscreen);
            assert_eq!((frame.passes[0].width, frame.passes[0].height), (256, 256));
            assert_eq!(frame.passes[1].target, PassTarget::Canvas);
        }
    }

    #[test]
    fn planned_angles_grow_by_fixed_step() {
        let frames = plan_frames(&demo("animated-cube"), 3, CanvasSize::square_pixels(4, 4))
            .unwrap();
        assert!((frames[0].angle - 0.1).abs() < 1e-6);
        assert!((frames[2].angle - 1.1).abs() < 1e-6);
    }

    #[test]
    fn frames_are_capped_at_frame_max() {
        let frames =
            plan_frames(&demo("multi-texture"), 10_000, CanvasSize::square_pixels(4, 4)).unwrap();
        assert_eq!(frames.len(), FRAME_MAX);
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let err = plan_frames(&demo("animated-cube"), 1, CanvasSize::square_pixels(0, 4))
            .err()
            .unwrap();
        assert_eq!(err.exit_code(), 10);
    }
}
