use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "interfacer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the tree and print rects, resolved styles and diagnostics as JSON.
    Inspect(InspectArgs),
    /// Build the tree, run a number of ticks and print the frame index of every animation.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct TreeArgs {
    /// Input interface description JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Display width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Display height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Directory asset keys are resolved against. Defaults to the description's directory.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    tree: TreeArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    tree: TreeArgs,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 10)]
    ticks: u32,

    /// Elapsed time per tick, in the same unit as the animations' `delay`.
    #[arg(long, default_value_t = 16.0)]
    dt: f64,
}

/// Resolves asset keys as paths relative to a root directory.
struct DirAssetLoader {
    root: PathBuf,
}

impl interfacer::AssetLoader for DirAssetLoader {
    fn load(&self, key: &str) -> interfacer::AssetPoll {
        let path = self.root.join(key);
        match image::open(&path) {
            Ok(img) => interfacer::AssetPoll::Ready(Arc::new(img.to_rgba8())),
            Err(e) => interfacer::AssetPoll::Failed(format!("{}: {e}", path.display())),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn read_desc_json(path: &Path) -> anyhow::Result<interfacer::InterfaceDesc> {
    let f = File::open(path).with_context(|| format!("open description '{}'", path.display()))?;
    let r = BufReader::new(f);
    let desc: interfacer::InterfaceDesc =
        serde_json::from_reader(r).with_context(|| "parse description JSON")?;
    Ok(desc)
}

fn build_tree(args: &TreeArgs) -> anyhow::Result<(interfacer::BuiltTree, DirAssetLoader)> {
    let desc = read_desc_json(&args.in_path)?;
    let extent = interfacer::Extent::new(args.width, args.height)?;
    let root = match &args.assets {
        Some(dir) => dir.clone(),
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let loader = DirAssetLoader { root };
    let built = interfacer::ComponentTree::build(&desc, extent, &loader)?;
    Ok((built, loader))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (built, _loader) = build_tree(&args.tree)?;
    let tree = &built.tree;

    let components: Vec<_> = tree
        .nodes()
        .iter()
        .map(|node| {
            let animation = node.as_animatable().map(|a| {
                let state = a.animation();
                json!({
                    "source": state.source(),
                    "frames": state.frame_count(),
                    "delay": state.delay(),
                })
            });
            json!({
                "label": node.label(),
                "id": node.id(),
                "type": node.kind(),
                "cell": node.cell(),
                "rect": node.rect(),
                "style": node.resolved_style(),
                "focusable": node.as_focusable().is_some(),
                "animation": animation,
            })
        })
        .collect();

    let out = json!({
        "name": tree.name(),
        "background": tree.background(),
        "background_image": tree.background_image().map(|slot| slot.key()),
        "grid": { "rows": tree.grid().rows(), "columns": tree.grid().columns() },
        "components": components,
        "draw_ops": tree.draw().len(),
        "diagnostics": built.diagnostics,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.dt.is_finite() && args.dt >= 0.0,
        "--dt must be a non-negative number"
    );
    let (built, loader) = build_tree(&args.tree)?;
    let mut tree = built.tree;

    for tick in 1..=args.ticks {
        let diagnostics = tree.tick(args.dt, &loader);
        let frames: serde_json::Map<String, serde_json::Value> = tree
            .nodes()
            .iter()
            .filter_map(|node| {
                let state = node.as_animatable()?.animation();
                Some((node.label().to_owned(), json!(state.current_index())))
            })
            .collect();
        let line = json!({
            "tick": tick,
            "elapsed": f64::from(tick) * args.dt,
            "frames": frames,
            "diagnostics": diagnostics,
        });
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}
