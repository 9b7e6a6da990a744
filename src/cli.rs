use crate::config::{Config, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::{ParseOptions, parse_project};
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "blksched", version, about = "Block schedule renderer for outline-numbered task lists")]
pub struct Args {
    /// Project file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (layout, render and theme overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Outline levels to keep, e.g. `1,2`. Keeps all levels when omitted.
    #[arg(short = 'l', long = "levels", value_delimiter = ',')]
    pub levels: Vec<usize>,

    /// Also write the positioned tasks and milestones as JSON
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,

    /// Root block width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Whitespace between nested and sibling blocks
    #[arg(long = "offset")]
    pub offset: Option<f64>,

    /// Minimum block width
    #[arg(long = "min-width")]
    pub min_width: Option<f64>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let input = read_input(args.input.as_deref())?;
    let options = ParseOptions {
        levels: args.levels.clone(),
    };
    let project = parse_project(&input, &options)?;
    let layout = compute_layout(&project, &config.layout)?;
    tracing::info!(
        tasks = layout.tasks.len(),
        milestones = layout.milestones.len(),
        max_width = layout.max_width,
        "layout computed"
    );

    if let Some(path) = args.dump.as_deref() {
        write_layout_dump(path, &layout)?;
    }

    let svg = render_svg(&layout, &config.theme, &config.render);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.layout.total_width = width;
    }
    if let Some(offset) = args.offset {
        config.layout.offset = offset;
    }
    if let Some(min_width) = args.min_width {
        config.layout.min_block_width = min_width;
    }
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_and_overrides() {
        let args = Args::parse_from([
            "blksched", "-i", "plan.json", "--levels", "1,3", "--width", "640", "--min-width", "12",
            "-vv",
        ]);
        assert_eq!(args.levels, vec![1, 3]);
        assert_eq!(args.verbose, 2);

        let mut config = Config::default();
        apply_overrides(&mut config, &args);
        assert_eq!(config.layout.total_width, 640.0);
        assert_eq!(config.layout.offset, 5.0);
        assert_eq!(config.layout.min_block_width, 12.0);
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("out.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }
}
