use anyhow::{Context, Result};
use bouncemap::prelude::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod timestamps;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Bounce map generation for beat-synchronised animations")]
struct Cmd {
    /// Optional run tag; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a bounce map from event timestamps and write it as JSON
    Generate {
        /// Timestamps: .csv (column `time`), .json array, or plain text
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Start speed in px/s
        #[arg(long)]
        speed: Option<f64>,
        /// Step budget before the search gives up
        #[arg(long)]
        max_steps: Option<u64>,
        #[arg(long, value_enum, default_value_t = Collision::Corners)]
        collision: Collision,
    },
    /// Print a summary of a generated map
    Inspect {
        #[arg(long)]
        map: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum Collision {
    Corners,
    Exact,
}

impl From<Collision> for CollisionModel {
    fn from(c: Collision) -> Self {
        match c {
            Collision::Corners => CollisionModel::Corners,
            Collision::Exact => CollisionModel::Exact,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            input,
            out,
            seed,
            speed,
            max_steps,
            collision,
        } => {
            let mut cfg = MapCfg {
                collision: collision.into(),
                ..MapCfg::default()
            };
            if let Some(speed) = speed {
                cfg.speed = speed;
            }
            let mut scfg = SearchCfg {
                seed,
                ..SearchCfg::default()
            };
            if let Some(max_steps) = max_steps {
                scfg.max_steps = max_steps;
            }
            generate(&input, &out, &cfg, &scfg, cmd.tag)
        }
        Action::Inspect { map } => inspect(&map),
        Action::Report => report(cmd.tag),
    }
}

fn generate(
    input: &Path,
    out: &Path,
    cfg: &MapCfg,
    scfg: &SearchCfg,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(
        input = %input.display(),
        out = %out.display(),
        seed = scfg.seed,
        tag = ?tag,
        "generate"
    );
    let times = timestamps::read_timestamps(input)?;
    tracing::info!(timestamps = times.len(), "input_read");

    let map = generate_map(&times, cfg, scfg)
        .with_context(|| format!("generating a map for {}", input.display()))?;
    tracing::info!(
        bounces = map.bounces.len(),
        safe_areas = map.safe_areas.len(),
        calls = map.stats.calls,
        "map_generated"
    );

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(&map)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = Payload::new(serde_json::json!({
        "map": cfg,
        "search": scfg,
        "stats": map.stats,
    }))
    .with_input(input.to_string_lossy())
    .with_tag(tag);
    let prov = write_sidecar(out, payload)?;
    tracing::info!(provenance = %prov.display(), "sidecar_written");
    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    tracing::info!(map = %path.display(), "inspect");
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let map: Map = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing {} as a bounce map", path.display()))?;

    let walls: Vec<Rect> = map
        .floating_walls
        .iter()
        .chain(&map.connected_walls)
        .copied()
        .collect();
    let clusters = merge_rects(&walls, MergeRule::neighboring()).len();
    let summary = serde_json::json!({
        "bounces": map.bounces.len(),
        "floating": map.floating_walls.len(),
        "connected": map.connected_walls.len(),
        "wall_clusters": clusters,
        "safe_areas": map.safe_areas.len(),
        "duration_s": map.duration(),
        "stats": map.stats,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "bouncemap": bouncemap::VERSION,
        "tag": tag,
        "defaults": {
            "map": MapCfg::default(),
            "search": SearchCfg::default(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
