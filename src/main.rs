//! `zenaspect` command-line front end.
//!
//! Loads one image, builds a [`Converter`] from config and flags, computes
//! the sampling plan, and writes `resized-{W}x{H}.{ext}` to the output
//! directory. `--print-plan` and `--svg` expose the plan itself.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use zenaspect::render::{self, ImageRenderer, RenderGateway};
use zenaspect::{
    Anchor, CanvasColor, Converter, Mode, Offset, SamplingPlan, Size, svg,
};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "zenaspect",
    about = "Resize an image to a target aspect ratio by letterboxing or cropping"
)]
struct Cli {
    /// Source image
    input: PathBuf,

    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Aspect ratio such as 16:9 or 2.35:1
    #[arg(long)]
    ratio: Option<String>,

    /// fit (letterbox) or crop (fill)
    #[arg(long)]
    mode: Option<String>,

    /// Crop window anchor, e.g. center, top-left, bottom
    #[arg(long)]
    anchor: Option<String>,

    /// Manual crop offset in source pixels, as X,Y
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Letterbox color: name, #rgb, #rrggbb, #rrggbbaa, or transparent
    #[arg(long)]
    background: Option<String>,

    /// Resampling filter: nearest, triangle, catmullrom, gaussian, lanczos3
    #[arg(long)]
    filter: Option<String>,

    /// Output format extension: png, jpg, webp, gif, bmp, tiff
    #[arg(long)]
    format: Option<String>,

    /// Directory for the output file
    #[arg(long, short, default_value = ".")]
    output: PathBuf,

    /// Print the sampling plan
    #[arg(long)]
    print_plan: bool,

    /// Also write an SVG diagram of the plan to this file
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load();
    log::debug!("config: {config:?}");
    run(&cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let image = image::open(&cli.input)
        .with_context(|| format!("Failed to open image: {:?}", cli.input))?;

    let converter = build_converter(cli, config, render::source_size(&image))?;
    let plan = converter.plan()?;

    if cli.print_plan {
        print_plan(&plan, converter.background());
    }
    if let Some(path) = &cli.svg {
        std::fs::write(path, svg::render_plan_svg(&plan, converter.background()))
            .with_context(|| format!("Failed to write {:?}", path))?;
        log::info!("wrote plan diagram to {}", path.display());
    }

    let filter = cli.filter.as_deref().unwrap_or(&config.resize_filter);
    let renderer = ImageRenderer::new(render::parse_filter(filter));
    let surface = renderer.draw(&image, &plan, converter.background())?;

    let format = render::parse_format(cli.format.as_deref().unwrap_or(&config.output_format))?;
    if converter.background().has_alpha() && format == image::ImageFormat::Jpeg && plan.needs_padding() {
        log::warn!("jpeg has no alpha channel; translucent background will be flattened");
    }
    let bytes = render::encode(&surface, format)?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create {:?}", cli.output))?;
    let path = cli
        .output
        .join(render::export_filename(converter.target(), format));
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {:?}", path))?;

    println!("{}", path.display());
    Ok(())
}

/// Apply config, then flags, in the order the converter's reset rules expect:
/// dimensions before mode, mode before anchor, anchor before offset.
fn build_converter(cli: &Cli, config: &Config, source: Size) -> Result<Converter> {
    let mut converter = Converter::default();
    converter.load_source(source)?;

    let ratio = cli.ratio.as_deref().unwrap_or(&config.ratio);
    converter
        .set_ratio_str(ratio)
        .with_context(|| format!("Invalid ratio: {ratio:?}"))?;

    match (cli.width, cli.height) {
        (Some(w), Some(h)) => converter.set_target(Size::new(w, h))?,
        (Some(w), None) => converter.set_width(w as f64)?,
        (None, Some(h)) => converter.set_height(h as f64)?,
        (None, None) => {}
    }

    let mode = cli.mode.as_deref().unwrap_or(&config.mode);
    let mode: Mode = mode
        .parse()
        .with_context(|| format!("Invalid mode: {mode:?}"))?;
    converter.set_mode(mode);

    let anchor = cli.anchor.as_deref().unwrap_or(&config.anchor);
    let anchor: Anchor = anchor
        .parse()
        .with_context(|| format!("Invalid anchor: {anchor:?}"))?;
    converter.set_anchor(anchor);

    if let Some(text) = cli.offset.as_deref() {
        let offset = parse_offset(text)?;
        if !converter.set_offset(offset) {
            log::warn!("--offset only applies in crop mode; ignored");
        }
    }

    let background = cli.background.as_deref().unwrap_or(&config.background);
    let background: CanvasColor = background
        .parse()
        .with_context(|| format!("Invalid background: {background:?}"))?;
    converter.set_background(background);

    Ok(converter)
}

fn parse_offset(text: &str) -> Result<Offset> {
    let Some((x, y)) = text.split_once(',') else {
        bail!("Offset must be X,Y: {text:?}");
    };
    let x: f64 = x.trim().parse().with_context(|| format!("Invalid offset x: {x:?}"))?;
    let y: f64 = y.trim().parse().with_context(|| format!("Invalid offset y: {y:?}"))?;
    if !x.is_finite() || !y.is_finite() {
        bail!("Offset must be finite: {text:?}");
    }
    Ok(Offset::new(x, y))
}

fn print_plan(plan: &SamplingPlan, background: CanvasColor) {
    let s = plan.source;
    let d = plan.destination;
    println!("source   {}", plan.source_size);
    println!("canvas   {}", plan.canvas);
    println!(
        "read     x={:.2} y={:.2} w={:.2} h={:.2}",
        s.x, s.y, s.width, s.height
    );
    println!(
        "write    x={:.2} y={:.2} w={:.2} h={:.2}",
        d.x, d.y, d.width, d.height
    );
    if plan.needs_padding() {
        println!("padding  {background:?}");
    }
    if let Some(axis) = plan.cropped_axis() {
        println!("cropped  {axis:?}");
    }
}
