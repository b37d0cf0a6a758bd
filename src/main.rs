use clap::Parser;
use std::path::PathBuf;

use rectsight::debug::DebugConfig;
use rectsight::{
    load_config, ConsoleRenderer, DetectorConfig, FrameSource, OverlayRenderer, PnmStream,
    RectangleDetector, Renderer, ReportFormat, Session, StillImage,
};

#[derive(Parser)]
#[command(name = "rectsight")]
#[command(about = "Find rectangular targets in an image or a stream of PNM frames on stdin")]
struct Cli {
    /// Still image to scan; without it, frames are read from stdin
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// JSON detector configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print one JSON report per frame instead of text
    #[arg(long)]
    json: bool,

    /// Save annotated frames to this directory
    #[arg(long, value_name = "DIR")]
    annotate: Option<PathBuf>,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    max_frames: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DetectorConfig::default(),
    };
    log::debug!("Detector config: {:?}", config);

    let mut session = Session::new(RectangleDetector::new().with_config(config));
    if let Some(debug_dir) = args.debug_out {
        session = session.with_debug(DebugConfig::new(debug_dir)?);
    }
    if let Some(max_frames) = args.max_frames {
        session = session.with_max_frames(max_frames);
    }

    let format = if args.json { ReportFormat::Json } else { ReportFormat::Text };
    let mut renderers: Vec<Box<dyn Renderer>> = vec![Box::new(ConsoleRenderer::stdout(format))];
    if let Some(dir) = args.annotate {
        renderers.push(Box::new(OverlayRenderer::new(dir)?));
    }

    let mut source: Box<dyn FrameSource> = match args.image_path {
        Some(path) => {
            log::info!("Loading image: {}", path.display());
            Box::new(StillImage::new(path))
        }
        None => {
            log::info!("Reading PNM frames from stdin");
            Box::new(PnmStream::new(std::io::stdin().lock()))
        }
    };

    let summary = session.run(source.as_mut(), &mut renderers)?;
    log::info!(
        "Processed {} frames, found {} rectangles",
        summary.frames,
        summary.rectangles
    );

    Ok(())
}
