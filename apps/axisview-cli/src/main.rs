use anyhow::Context;
use axisview_common::{RegionId, SurfaceSize};
use axisview_render::{HeadlessBackend, HeadlessRegion, HeadlessSurface, RenderSurface};
use axisview_scene::SceneGraph;
use axisview_viewport::{
    HeadlessHost, HostSignal, ReadyState, SceneBootstrapper, Viewport, ViewportConfig,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "axisview-cli", about = "Headless driver for the axis viewport")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewport config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Texture for the rotating box
    #[arg(long, global = true)]
    texture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective config
    Info,
    /// Simulate a page: load, resize, become ready, render frames
    Run {
        /// Number of frames to render after the document is ready
        #[arg(short, long, default_value = "3")]
        frames: u32,
        /// Resize signals delivered while the document is loading
        #[arg(short, long, default_value = "1")]
        resizes: u32,
        /// Start with the document already loaded
        #[arg(long)]
        ready: bool,
        /// Region width in pixels
        #[arg(long, default_value = "800")]
        width: u32,
        /// Region height in pixels
        #[arg(long, default_value = "600")]
        height: u32,
    },
    /// Bootstrap the scene and print what it contains
    Inspect {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<ViewportConfig> {
    let mut config = match &cli.config {
        Some(path) => ViewportConfig::load(path)?,
        None => ViewportConfig::default(),
    };
    if let Some(texture) = &cli.texture {
        config.rotating_object.texture = texture.clone();
    }
    Ok(config)
}

fn bootstrap(
    config: ViewportConfig,
    region: &HeadlessRegion,
) -> anyhow::Result<Viewport<HeadlessSurface>> {
    let texture = config.rotating_object.texture.clone();
    SceneBootstrapper::with_config(config)
        .bootstrap(&mut HeadlessBackend::new(), region)
        .with_context(|| format!("bootstrap failed (texture {})", texture.display()))
}

fn scene_json(scene: &SceneGraph) -> serde_json::Value {
    let meshes: Vec<_> = scene
        .meshes()
        .map(|(id, mesh)| {
            let p = mesh.transform.position;
            serde_json::json!({
                "id": id.short(),
                "name": mesh.name,
                "kind": mesh.geometry.kind(),
                "position": [p.x, p.y, p.z],
                "color": mesh.color.map(|c| c.to_array()),
                "frozen": mesh.is_frozen(),
            })
        })
        .collect();
    serde_json::json!({
        "summary": scene.summary(),
        "meshes": meshes,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(&cli)?;
    tracing::debug!(texture = %config.rotating_object.texture.display(), "config loaded");

    match cli.command {
        Commands::Info => {
            println!("axisview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", axisview_render::crate_info());
            println!("--- effective config ---");
            print!("{}", config.to_yaml()?);
        }
        Commands::Run {
            frames,
            resizes,
            ready,
            width,
            height,
        } => {
            let region = HeadlessRegion::new(RegionId(1), SurfaceSize::new(width, height));
            let mut viewport = bootstrap(config, &region)?;

            let initial = if ready {
                ReadyState::Complete
            } else {
                ReadyState::Loading
            };
            let mut host = HeadlessHost::new(initial);
            let state = viewport.start_rendering(&mut host)?;
            println!("render loop: {state:?}");

            for i in 1..=resizes {
                region.set_layout_size(SurfaceSize::new(width + 10 * i, height + 10 * i));
                viewport.handle_signal(HostSignal::Resized);
            }

            if !ready {
                host.set_ready_state(ReadyState::Interactive);
                viewport.handle_signal(HostSignal::DocumentReady);
                println!("document ready: {:?}", viewport.render_loop().state());
            }

            for _ in 0..frames {
                viewport.frame()?;
            }

            let size = viewport.surface().size();
            println!(
                "surface: {}x{} resizes={} draws={}",
                size.width,
                size.height,
                viewport.surface().resize_count(),
                viewport.surface().draw_count()
            );
            println!("stats: {}", viewport.scheduler().stats());
            if let Some(frame) = viewport.surface().last_frame() {
                print!("{frame}");
            }
        }
        Commands::Inspect { json } => {
            let region = HeadlessRegion::new(RegionId(1), SurfaceSize::new(800, 600));
            let viewport = bootstrap(config, &region)?;
            let scene = viewport.scene();
            if json {
                println!("{}", serde_json::to_string_pretty(&scene_json(scene))?);
            } else {
                println!("{}", scene.summary());
                let mut meshes: Vec<_> = scene.meshes().collect();
                meshes.sort_by(|a, b| a.1.name.cmp(&b.1.name));
                for (id, mesh) in meshes {
                    let p = mesh.transform.position;
                    println!(
                        "  {} {:<14} {:<6} ({:.2}, {:.2}, {:.2}){}",
                        id,
                        mesh.name,
                        mesh.geometry.kind(),
                        p.x,
                        p.y,
                        p.z,
                        if mesh.is_frozen() { " frozen" } else { "" }
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ViewportConfig {
        let mut config = ViewportConfig::default();
        config.rotating_object.texture =
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/textures/sun.png");
        config
    }

    #[test]
    fn inspect_json_lists_every_mesh() {
        let region = HeadlessRegion::new(RegionId(1), SurfaceSize::new(64, 64));
        let viewport = bootstrap(config(), &region).unwrap();
        let value = scene_json(viewport.scene());
        assert_eq!(value["summary"]["meshes"], 8);
        let meshes = value["meshes"].as_array().unwrap();
        assert_eq!(meshes.len(), 8);
        let axis_x = meshes.iter().find(|m| m["name"] == "axisX").unwrap();
        assert_eq!(axis_x["kind"], "lines");
        assert_eq!(axis_x["frozen"], true);
        assert_eq!(axis_x["color"], serde_json::json!([1.0, 0.0, 0.0]));
    }

    #[test]
    fn bootstrap_error_names_the_texture() {
        let mut config = config();
        config.rotating_object.texture = PathBuf::from("does/not/exist.png");
        let region = HeadlessRegion::new(RegionId(1), SurfaceSize::new(64, 64));
        let err = bootstrap(config, &region).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.png"));
    }
}
