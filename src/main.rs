use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Args, Parser, Subcommand};

use autograph::Config;
use autograph::config::ColorSpec;
use autograph::draw::{Color, PixelRatio, color::name_to_color};
use autograph::export::{ExportFormat, save_artifact};
use autograph::input::PointerSample;
use autograph::typed::{Alignment, FlourishKind, PangoMeasurer};
use autograph::{SignatureMode, SignatureSession};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("AUTOGRAPH_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "autograph")]
#[command(version = VERSION, about = "Render transparent signatures to PNG, SVG and PDF")]
struct Cli {
    /// Print the JSON schema of the config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    config_schema: bool,

    /// Read settings from FILE instead of ~/.config/autograph/config.toml
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a typed signature
    Typed(TypedArgs),
    /// Render freehand strokes recorded as JSON
    Freehand(FreehandArgs),
}

#[derive(Args, Debug)]
struct TypedArgs {
    /// Full name of the signer
    #[arg(long, default_value = "")]
    name: String,

    /// Initials (used for the file name, and as the text with --monogram)
    #[arg(long, default_value = "")]
    initials: String,

    /// Subtitle line such as a job title
    #[arg(long, default_value = "")]
    title: String,

    /// Render the initials instead of the full name
    #[arg(long, action = ArgAction::SetTrue)]
    monogram: bool,

    /// Font family
    #[arg(long)]
    font: Option<String>,

    /// Font size in canvas pixels
    #[arg(long)]
    size: Option<f64>,

    /// Numeric font weight (100-900)
    #[arg(long)]
    weight: Option<u16>,

    /// Glyph lean in degrees
    #[arg(long, allow_hyphen_values = true)]
    slant: Option<f64>,

    /// Clockwise rotation in degrees
    #[arg(long, allow_hyphen_values = true)]
    rotation: Option<f64>,

    /// Ink texture strength (0-100): soft shadow under the glyphs
    #[arg(long)]
    texture: Option<f64>,

    /// Alignment: left, center or right
    #[arg(long, value_parser = parse_alignment)]
    align: Option<Alignment>,

    /// Flourish: none, underline, double-underline, swoosh-left, swoosh-right, circle
    #[arg(long, value_parser = parse_flourish)]
    flourish: Option<FlourishKind>,

    /// Ink color (name or #rrggbb)
    #[arg(long, value_parser = parse_color)]
    color: Option<Color>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct FreehandArgs {
    /// JSON file: an array of gestures, each an array of [x, y] or [x, y, t_ms] samples
    #[arg(long, value_name = "FILE")]
    strokes: PathBuf,

    /// Pen color (name or #rrggbb)
    #[arg(long, value_parser = parse_color)]
    pen_color: Option<Color>,

    /// Pen width in pixels
    #[arg(long)]
    pen_size: Option<f64>,

    /// Smoothing percentage (0-100)
    #[arg(long)]
    smoothing: Option<f64>,

    /// Signer name, used only for the file name
    #[arg(long, default_value = "")]
    name: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format: png, svg or pdf (aliases: raster, vector, document)
    #[arg(long, value_parser = parse_format)]
    format: Option<ExportFormat>,

    /// Pixel ratio for raster output (1, 2 or 3)
    #[arg(long, value_parser = parse_ratio)]
    ratio: Option<PixelRatio>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Keep the full canvas instead of trimming to the signature
    #[arg(long, action = ArgAction::SetTrue)]
    no_trim: bool,

    /// Padding around trimmed content, in canvas pixels
    #[arg(long)]
    padding: Option<u32>,

    /// Directory to write the file to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    value.parse().map_err(|e: autograph::export::ExportError| e.to_string())
}

fn parse_ratio(value: &str) -> Result<PixelRatio, String> {
    let raw: u32 = value.parse().map_err(|_| format!("'{value}' is not a number"))?;
    PixelRatio::try_from(raw).map_err(|e| e.to_string())
}

fn parse_color(value: &str) -> Result<Color, String> {
    name_to_color(value)
        .or_else(|| Color::from_hex(value))
        .ok_or_else(|| format!("unknown color '{value}'"))
}

fn parse_kebab<T: serde::de::DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase()))
        .map_err(|_| format!("unknown value '{value}'"))
}

fn parse_alignment(value: &str) -> Result<Alignment, String> {
    parse_kebab(value)
}

fn parse_flourish(value: &str) -> Result<FlourishKind, String> {
    parse_kebab(value)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.config_schema {
        let schema = Config::json_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        println!("autograph: Transparent signature renderer");
        println!();
        println!("Usage:");
        println!("  autograph typed --name \"Jane Doe\"        Render a typed signature");
        println!("  autograph freehand --strokes pen.json    Render recorded strokes");
        println!("  autograph --config-schema                Print the config JSON schema");
        println!("  autograph --help                         Show help");
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Flag overrides go through the same range checks as the config file
    let output = match &command {
        Command::Typed(args) => {
            apply_typed_style(&mut config, args);
            &args.output
        }
        Command::Freehand(args) => {
            apply_pen(&mut config, args);
            &args.output
        }
    };
    apply_output(&mut config, output);
    config.validate_and_clamp();

    let mut session = SignatureSession::from_config(&config);
    match &command {
        Command::Typed(args) => apply_typed_text(&mut session, args),
        Command::Freehand(args) => apply_strokes(&mut session, args)?,
    }

    if !session.can_export() {
        bail!("Nothing to export: provide a name, initials or at least one stroke");
    }

    let artifact = session.export(&PangoMeasurer)?;
    let path = save_artifact(&artifact, &session.export.output_dir)
        .with_context(|| format!("Failed to save {}", artifact.file_name))?;

    log::info!("Wrote {}x{} {}", artifact.width, artifact.height, artifact.format);
    println!("{}", path.display());
    Ok(())
}

fn apply_typed_style(config: &mut Config, args: &TypedArgs) {
    let typed = &mut config.typed;
    if let Some(font) = &args.font {
        typed.font_family = font.clone();
    }
    if let Some(size) = args.size {
        typed.font_size = size;
    }
    if let Some(weight) = args.weight {
        typed.font_weight = weight;
    }
    if let Some(slant) = args.slant {
        typed.slant = slant;
    }
    if let Some(rotation) = args.rotation {
        typed.rotation = rotation;
    }
    if let Some(texture) = args.texture {
        typed.stroke_texture = texture;
    }
    if let Some(align) = args.align {
        typed.alignment = align;
    }
    if let Some(flourish) = args.flourish {
        typed.flourish = flourish;
    }
    if let Some(color) = args.color {
        typed.color = ColorSpec::from(color);
    }
}

fn apply_typed_text(session: &mut SignatureSession, args: &TypedArgs) {
    session.mode = SignatureMode::Typed;
    let spec = &mut session.typed;
    spec.full_name = args.name.clone();
    spec.initials = args.initials.clone();
    spec.title = args.title.clone();
    spec.monogram_mode = args.monogram;
}

fn apply_pen(config: &mut Config, args: &FreehandArgs) {
    let pen = &mut config.freehand;
    if let Some(color) = args.pen_color {
        pen.pen_color = ColorSpec::from(color);
    }
    if let Some(size) = args.pen_size {
        pen.pen_size = size;
    }
    if let Some(smoothing) = args.smoothing {
        pen.smoothing = smoothing;
    }
}

fn apply_strokes(session: &mut SignatureSession, args: &FreehandArgs) -> Result<()> {
    session.mode = SignatureMode::Freehand;
    session.typed.full_name = args.name.clone();

    for gesture in load_gestures(&args.strokes)? {
        let mut samples = gesture.into_iter();
        let Some(first) = samples.next() else {
            continue;
        };
        session.freehand.begin_gesture(first);
        for sample in samples {
            session.freehand.extend_gesture(sample);
        }
        if session.freehand.end_gesture().is_none() {
            log::warn!("Skipping gesture with fewer than two usable points");
        }
    }
    Ok(())
}

fn apply_output(config: &mut Config, output: &OutputArgs) {
    if let Some(format) = output.format {
        config.export.format = format;
    }
    if let Some(ratio) = output.ratio {
        config.canvas.pixel_ratio = ratio.get();
    }
    if let Some(width) = output.width {
        config.canvas.width = width;
    }
    if let Some(height) = output.height {
        config.canvas.height = height;
    }
    if output.no_trim {
        config.export.trim = false;
    }
    if let Some(padding) = output.padding {
        config.export.padding = padding;
    }
    if let Some(dir) = &output.output_dir {
        config.export.output_dir = dir.to_string_lossy().into_owned();
    }
}

/// Reads gestures from a JSON file; samples without a timestamp are spaced 16 ms apart.
fn load_gestures(path: &Path) -> Result<Vec<Vec<PointerSample>>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read strokes from {}", path.display()))?;
    let gestures: Vec<Vec<Vec<f64>>> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse strokes from {}", path.display()))?;

    gestures
        .into_iter()
        .enumerate()
        .map(|(g, gesture)| {
            gesture
                .into_iter()
                .enumerate()
                .map(|(i, sample)| match sample.as_slice() {
                    [x, y] => Ok(PointerSample::new(*x, *y, i as u64 * 16)),
                    [x, y, t] => Ok(PointerSample::new(*x, *y, t.max(0.0) as u64)),
                    other => Err(anyhow!(
                        "Gesture {} sample {} has {} values; expected [x, y] or [x, y, t]",
                        g,
                        i,
                        other.len()
                    )),
                })
                .collect()
        })
        .collect()
}
