use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use lutfx::{Canvas, EffectParams, FrameArgb, HeapAlloc, RenderThreading, Renderer, render_frames};

#[derive(Parser, Debug)]
#[command(name = "lutfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a frame sequence as numbered PNGs.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Elapsed time in seconds.
    #[arg(long, default_value_t = 2.0)]
    time: f32,

    /// Optional effect parameters JSON ({"scroll_rate": .., "fade_in_secs": ..}).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Number of frames to render, starting at frame 0.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Render frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Optional effect parameters JSON.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output directory for frame_%05d.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_params(path: Option<&Path>) -> anyhow::Result<EffectParams> {
    let Some(path) = path else {
        return Ok(EffectParams::default());
    };
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let params =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse params JSON")?;
    Ok(params)
}

fn write_png(frame: &FrameArgb, path: &Path) -> anyhow::Result<()> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_rgba8_bytes())
        .context("frame buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("write PNG '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let canvas = Canvas::new(args.width, args.height)?;
    let params = read_params(args.params.as_deref())?;
    let renderer = Renderer::new(canvas, params, &HeapAlloc)?;
    let frame = renderer.render_frame(args.time, &HeapAlloc)?;
    write_png(&frame, &args.out)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let canvas = Canvas::new(args.width, args.height)?;
    let params = read_params(args.params.as_deref())?;
    let renderer = Renderer::new(canvas, params, &HeapAlloc)?;

    let threading = RenderThreading {
        parallel: args.parallel,
        threads: None,
    };
    let frames = render_frames(&renderer, args.fps, 0..args.frames, &threading)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (idx, frame) in frames.iter().enumerate() {
        let path = args.out_dir.join(format!("frame_{idx:05}.png"));
        write_png(frame, &path)?;
    }
    println!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}
