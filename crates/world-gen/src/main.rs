//! Graph world generator CLI.
//!
//! Examples:
//!   graph_world gen --radius 1.2 --lane 0.6
//!   graph_world gen --config world.toml --format json --out scene.json
//!   graph_world scatter --num 20 --seed 7
//!   graph_world config > world.toml

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use world_gen::{
    default_config_toml, scatter_scene, tables, OutputFormat, SceneAssembler, WorldConfig,
    WorldGenError,
};

/// Command line arguments for the generator
#[derive(Parser, Debug)]
#[command(name = "graph_world")]
#[command(about = "Graph world with node shells and openings at corridor directions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the world from node and edge tables
    Gen(GenArgs),
    /// Generate a world of randomly placed box obstacles
    Scatter(ScatterArgs),
    /// Print the default configuration as TOML
    Config,
}

#[derive(Args, Debug)]
struct GenArgs {
    /// TOML configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Node table (name,x,y)
    #[arg(long, default_value = "nodes.csv")]
    nodes: PathBuf,

    /// Edge table (from,to,seconds)
    #[arg(long, default_value = "edges.csv")]
    edges: PathBuf,

    /// Output file
    #[arg(long, default_value = "worlds/graph_routes.world")]
    out: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Sdf)]
    format: OutputFormat,

    /// Do not write demo tables when the inputs are missing
    #[arg(long)]
    no_seed: bool,

    /// Corridor width between the two walls
    #[arg(long)]
    lane: Option<f64>,

    /// Node shell radius
    #[arg(long)]
    radius: Option<f64>,

    /// Node shells on/off (1/0)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    shell: Option<u8>,

    /// Number of wedges around each node
    #[arg(long)]
    shell_segs: Option<u32>,

    /// Shell panel thickness
    #[arg(long)]
    shell_thick: Option<f64>,

    /// Opening margin beyond half the lane width
    #[arg(long)]
    open_margin: Option<f64>,

    /// Shell opacity (0-1)
    #[arg(long)]
    alpha: Option<f64>,

    /// Wall height
    #[arg(long)]
    height: Option<f64>,

    /// Clearance between corridor ends and node shells
    #[arg(long)]
    gap: Option<f64>,
}

impl GenArgs {
    fn apply(&self, config: &mut WorldConfig) {
        if let Some(lane) = self.lane {
            config.lane_width = lane;
        }
        if let Some(radius) = self.radius {
            config.node_radius = radius;
        }
        if let Some(shell) = self.shell {
            config.shell.enabled = shell == 1;
        }
        if let Some(segments) = self.shell_segs {
            config.shell.segments = segments;
        }
        if let Some(thickness) = self.shell_thick {
            config.shell.thickness = thickness;
        }
        if let Some(margin) = self.open_margin {
            config.shell.open_margin = margin;
        }
        if let Some(alpha) = self.alpha {
            config.shell.opacity = alpha;
        }
        if let Some(height) = self.height {
            config.wall_height = height;
        }
        if let Some(gap) = self.gap {
            config.node_gap = gap;
        }
    }
}

#[derive(Args, Debug)]
struct ScatterArgs {
    /// TOML configuration file; flags below override its [scatter] section
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of obstacles
    #[arg(long)]
    num: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum x/y inside the map
    #[arg(long, allow_hyphen_values = true)]
    min_xy: Option<f64>,

    /// Maximum x/y inside the map
    #[arg(long, allow_hyphen_values = true)]
    max_xy: Option<f64>,

    /// Radius around the origin kept free
    #[arg(long)]
    keepout: Option<f64>,

    /// Minimum obstacle side length
    #[arg(long)]
    min_size: Option<f64>,

    /// Maximum obstacle side length
    #[arg(long)]
    max_size: Option<f64>,

    /// Output file
    #[arg(long, default_value = "worlds/obstacles.world")]
    out: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Sdf)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Gen(args) => run_gen(&args),
        Command::Scatter(args) => run_scatter(&args),
        Command::Config => {
            print!("{}", default_config_toml());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<WorldConfig, WorldGenError> {
    match path {
        Some(path) => {
            info!("loading configuration from {:?}", path);
            Ok(WorldConfig::from_file(path)?)
        }
        None => Ok(WorldConfig::default()),
    }
}

fn run_gen(args: &GenArgs) -> Result<(), WorldGenError> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    let assembler = SceneAssembler::new(config)?;

    if !args.no_seed {
        let seeded = tables::ensure_templates(&args.nodes, &args.edges)?;
        if seeded > 0 {
            warn!("input tables were missing, wrote {} demo table(s)", seeded);
        }
    }

    let graph = tables::load_graph(&args.nodes, &args.edges)?;
    let world = assembler.assemble(&graph)?;
    let document = args.format.render(&world.scene)?;

    write_output(&args.out, &document)?;
    info!(
        panels = world.panel_count(),
        "[OK] world written: {}",
        args.out.display()
    );
    Ok(())
}

fn run_scatter(args: &ScatterArgs) -> Result<(), WorldGenError> {
    let config = load_config(args.config.as_deref())?;
    let mut scatter = config.scatter.clone();
    if let Some(num) = args.num {
        scatter.count = num;
    }
    if let Some(seed) = args.seed {
        scatter.seed = seed;
    }
    if let Some(min_xy) = args.min_xy {
        scatter.min_xy = min_xy;
    }
    if let Some(max_xy) = args.max_xy {
        scatter.max_xy = max_xy;
    }
    if let Some(keepout) = args.keepout {
        scatter.keepout = keepout;
    }
    if let Some(min_size) = args.min_size {
        scatter.min_size = min_size;
    }
    if let Some(max_size) = args.max_size {
        scatter.max_size = max_size;
    }

    let scene = scatter_scene(&scatter, &config.world_name)?;
    let document = args.format.render(&scene)?;

    write_output(&args.out, &document)?;
    info!(
        obstacles = scene.len(),
        seed = scatter.seed,
        "[OK] obstacles written: {}",
        args.out.display()
    );
    Ok(())
}

/// Writes the finished document, creating parent directories as needed.
fn write_output(path: &Path, document: &str) -> Result<(), WorldGenError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, document)
    };
    write().map_err(|source| WorldGenError::Write {
        path: path.to_path_buf(),
        source,
    })
}
