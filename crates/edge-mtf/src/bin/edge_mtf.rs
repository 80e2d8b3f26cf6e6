//! edge-mtf CLI: slanted-edge MTF measurement of a single image.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use clap::Parser;
use log::{error, info, warn};

use edge_mtf::measure::{measure_to_dir, ArtifactPaths, MeasureError};
use edge_mtf::sfr::{MtfConfig, MtfError};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEFAULT_CHART_TOOL: &str = "MtfExcel.exe";

#[derive(Parser, Debug)]
#[command(name = "edge-mtf")]
#[command(about = "Measure the MTF of a camera from a slanted-edge image")]
#[command(version)]
struct Cli {
    /// Input image; asked for interactively when omitted.
    image: Option<PathBuf>,

    /// JSON configuration (`MtfConfig`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the exported tables and images.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Charting program started with the four exported tables.
    #[arg(long)]
    chart_tool: Option<PathBuf>,

    /// Start the charting program without asking.
    #[arg(long, short = 'y', conflicts_with = "no_prompt")]
    yes: bool,

    /// Never ask about, nor start, the charting program.
    #[arg(long)]
    no_prompt: bool,

    /// Also export the interleaved ESF profiles as ESFSegments.csv.
    #[arg(long)]
    dump_segments: bool,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit JSON formatted tracing output.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    json_logs: bool,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let cfg = match &cli.config {
        Some(path) => MtfConfig::load_json(path)?,
        None => MtfConfig::default(),
    };

    let image_path = match cli
        .image
        .clone()
        .or_else(|| cfg.image_path.clone().map(PathBuf::from))
    {
        Some(path) => path,
        None => prompt_image_path()?,
    };
    let output_dir = cli.output_dir.clone().unwrap_or_else(|| cfg.output_dir());
    std::fs::create_dir_all(&output_dir)?;

    let paths = match measure_to_dir(&image_path, &output_dir, &cfg.params, cli.dump_segments) {
        Ok((paths, m)) => {
            info!(
                "{}: orientation {:?}, oversampling {}, {} MTF samples",
                image_path.display(),
                m.orientation,
                m.oversampling,
                m.mtf.len()
            );
            paths
        }
        Err(MeasureError::Mtf(err @ MtfError::NotBinarized { .. })) => {
            error!("{err}");
            return Ok(());
        }
        Err(err) => {
            error!("{}: {err}", image_path.display());
            return Err(err.into());
        }
    };
    println!("Done");

    let chart_tool = cli
        .chart_tool
        .clone()
        .or_else(|| cfg.chart_tool.clone().map(PathBuf::from))
        .unwrap_or_else(default_chart_tool);
    let launch = if cli.no_prompt {
        false
    } else if cli.yes {
        true
    } else {
        confirm("Do you want to draw the graphs? [Y/n]")?
    };
    if launch {
        launch_chart_tool(&chart_tool, &paths);
    }

    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) {
    // verbosity comes from RUST_LOG here
    let _ = LogTracer::init();
    edge_mtf::core::init_tracing(cli.json_logs);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) {
    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let _ = edge_mtf::core::init_with_level(level);
}

fn default_chart_tool() -> PathBuf {
    std::env::current_dir()
        .map(|dir| dir.join(DEFAULT_CHART_TOOL))
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CHART_TOOL))
}

/// Ask until the user enters a path to an existing file.
fn prompt_image_path() -> CliResult<PathBuf> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter the path to the image: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Err("no image path given".into());
        };
        let path = PathBuf::from(line?.trim());
        if path.is_file() {
            return Ok(path);
        }
        println!("File {} does not exist", path.display());
    }
}

fn confirm(question: &str) -> CliResult<bool> {
    println!("{question}");
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim_start().chars().next(), Some('Y' | 'y')))
}

fn launch_chart_tool(tool: &Path, paths: &ArtifactPaths) {
    let args: Vec<PathBuf> = paths
        .charts()
        .iter()
        .map(|p| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf()))
        .collect();
    match Command::new(tool).args(&args).spawn() {
        Ok(_) => info!("started {}", tool.display()),
        Err(err) => warn!("failed to start {}: {err}", tool.display()),
    }
}
