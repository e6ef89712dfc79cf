use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use formats::ColumnMap;
use foundation::math::Vec2;
use layers::legend::legend;
use layers::pick::pick;
use layers::{ViewState, compose};
use runtime::{CameraState, ViewerConfig};
use scene::query::{SearchQuery, search};
use scene::visibility::LodPolicy;
use scene::{LayoutConfig, NodeSet, SceneSummary, aggregate, layout};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Radial emission scenes from travel records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print scene totals and per-level node counts
    Summary {
        #[command(flatten)]
        scene: SceneArgs,
    },

    /// Compose the layer list for a zoom level and write it as JSON
    Compose {
        #[command(flatten)]
        scene: SceneArgs,

        #[arg(long)]
        zoom: f64,

        /// Highlight departments and trips matching this text
        #[arg(long)]
        search: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Describe what is visible at a zoom level
    Legend {
        #[arg(long)]
        zoom: f64,
    },

    /// Report the node under a map-space point
    Pick {
        #[command(flatten)]
        scene: SceneArgs,

        #[arg(long)]
        zoom: f64,

        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Travel records CSV
    csv: PathBuf,

    /// Seed for trip placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON layout configuration
    #[arg(long)]
    layout_config: Option<PathBuf>,

    /// JSON column name overrides
    #[arg(long)]
    columns: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();
    let viewer = ViewerConfig::default();
    let policy = LodPolicy::default();

    match cli.command {
        Command::Summary { scene } => {
            let (nodes, fingerprint) = build_scene(&scene)?;
            #[derive(Serialize)]
            struct Report<'a> {
                fingerprint: &'a str,
                #[serde(flatten)]
                summary: SceneSummary,
            }
            print_json(&Report {
                fingerprint: &fingerprint,
                summary: nodes.summary(),
            })
        }
        Command::Compose {
            scene,
            zoom,
            search: needle,
            out,
        } => {
            let (nodes, _) = build_scene(&scene)?;
            let center = CameraState::initial(&nodes, &viewer).center;
            let camera = CameraState::requested(center, zoom, &viewer);
            let highlight = needle
                .map(|n| search(&nodes, &SearchQuery::new(n)))
                .unwrap_or_default();
            let view = ViewState::at_zoom(camera.zoom).with_highlight(&highlight);
            let layers = compose(&nodes, &policy, &view);
            info!(layers = layers.len(), highlighted = highlight.len(), "composed");

            match out {
                Some(path) => {
                    let file = fs::File::create(&path)
                        .with_context(|| format!("create {}", path.display()))?;
                    formats::write_frame(io::BufWriter::new(file), camera, &nodes, &layers)?;
                }
                None => formats::write_frame(io::stdout().lock(), camera, &nodes, &layers)?,
            }
            Ok(())
        }
        Command::Legend { zoom } => print_json(&legend(&policy, viewer.clamp_zoom(zoom))),
        Command::Pick { scene, zoom, x, y } => {
            let (nodes, _) = build_scene(&scene)?;
            let zoom = viewer.clamp_zoom(zoom);
            let layers = compose(&nodes, &policy, &ViewState::at_zoom(zoom));
            match pick(&nodes, &layers, Vec2::new(x, y), zoom) {
                Some(hit) => {
                    let node = nodes
                        .get(hit.node)
                        .context("pick returned a node outside the scene")?;
                    print_json(&serde_json::json!({
                        "distance": hit.distance,
                        "node": node,
                    }))
                }
                None => {
                    println!("no hit");
                    Ok(())
                }
            }
        }
    }
}

fn build_scene(args: &SceneArgs) -> Result<(NodeSet, String)> {
    let columns = match &args.columns {
        Some(path) => ColumnMap::from_json_str(&read_text(path)?)
            .with_context(|| format!("parse {}", path.display()))?,
        None => ColumnMap::default(),
    };
    let mut config: LayoutConfig = match &args.layout_config {
        Some(path) => serde_json::from_str(&read_text(path)?)
            .with_context(|| format!("parse {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    if args.seed.is_some() {
        config.trip_seed = args.seed;
    }
    config.validate()?;

    let dataset = formats::load_dataset(&args.csv, &columns)?;
    let forest = aggregate(&dataset.rows);
    Ok((layout(&forest, &config), dataset.fingerprint))
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
