use crate::config::{Config, load_config};
use crate::detail::find_detail;
use crate::layout::{TraceLayout, layout_or_error};
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_trace;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tsr", version, about = "Render a distributed trace as a span waterfall")]
pub struct Args {
    /// Input trace JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Container width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Print the detail panel of one span (by id) as JSON instead of rendering
    #[arg(long = "span")]
    pub span: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }

    let input = read_input(args.input.as_deref())?;
    let spans = parse_trace(&input)?;
    tracing::info!(spans = spans.len(), "trace loaded");

    if let Some(span_id) = args.span.as_deref() {
        let detail = find_detail(&spans, span_id)
            .ok_or_else(|| anyhow::anyhow!("No span with id `{}` in trace", span_id))?;
        let json = serde_json::to_string_pretty(&detail)?;
        return write_text(&json, args.output.as_deref());
    }

    let layout = layout_or_error(&spans, &config.theme, &config.layout, config.render.width);
    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            write_layout_dump(args.output.as_deref(), &layout)?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&layout, &config, &output)?;
        }
    }

    if let Some(error) = &layout.error {
        return Err(anyhow::anyhow!("{}", error.message));
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(feature = "png")]
fn write_png(layout: &TraceLayout, config: &Config, output: &Path) -> Result<()> {
    let svg = render_svg(layout, &config.theme, &config.layout);
    write_output_png(&svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_layout: &TraceLayout, _config: &Config, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => println!("{}", text),
    }
    Ok(())
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
