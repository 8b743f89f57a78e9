use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::info;

mod color;
mod config;
mod display;
mod error;
mod params;
mod plot;
mod sampler;

use config::Config;
use display::DisplayMode;
use params::TrigFunc;

#[derive(Parser, Debug)]
#[command(name = "trigscope")]
#[command(author, version, about = "Explore A·f(B·x+C)+D for sine, cosine and tangent")]
pub struct Args {
    /// Display mode: interactive or snapshot
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Parameters as a query string, e.g. "func=tan&a=2&c=0.785"
    #[arg(short, long)]
    query: Option<String>,

    /// Function: sin, cos or tan
    #[arg(short, long)]
    func: Option<TrigFunc>,

    /// Amplitude A
    #[arg(long, allow_hyphen_values = true)]
    amplitude: Option<f64>,

    /// Period factor B
    #[arg(long, allow_hyphen_values = true)]
    period: Option<f64>,

    /// Phase C in radians
    #[arg(long, allow_hyphen_values = true)]
    phase: Option<f64>,

    /// Vertical shift D
    #[arg(long, allow_hyphen_values = true)]
    shift: Option<f64>,

    /// Horizontal zoom (0.5 - 2.0)
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Color scheme: classic, ocean, fire, forest, purple, monochrome
    #[arg(long)]
    colors: Option<String>,

    /// Hide the background grid
    #[arg(long)]
    no_grid: bool,

    /// Snapshot width in terminal cells
    #[arg(long)]
    cols: Option<u16>,

    /// Snapshot height in terminal cells
    #[arg(long)]
    rows: Option<u16>,

    /// Write a commented default config to ~/.config/trigscope/config.toml and exit
    #[arg(long)]
    init_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn main() -> Result<()> {
    // Initialize logging on stderr so snapshots on stdout stay clean.
    // Quiet by default: the interactive UI shares the terminal with stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trigscope=warn".parse()?),
        )
        .init();

    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load config: explicit path must parse, the default path falls back to defaults
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    let config_path = args.config.clone().or_else(Config::default_path);

    info!("Starting trigscope in {:?} mode", config.display.mode);

    match config.display.mode {
        DisplayMode::Interactive => display::terminal::run(config, config_path)?,
        DisplayMode::Snapshot => display::snapshot::run(config)?,
    }

    Ok(())
}
