use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use serde::Serialize;

use crate::models::Rectangle;

/// Consumer of per-frame detection results
pub trait Renderer {
    fn display(&mut self, frame: &RgbImage, rectangles: &[Rectangle]) -> Result<()>;
}

/// Send every frame to each renderer in turn; the first error is reported after all ran
impl Renderer for Vec<Box<dyn Renderer>> {
    fn display(&mut self, frame: &RgbImage, rectangles: &[Rectangle]) -> Result<()> {
        let mut first_err = None;
        for renderer in self.iter_mut() {
            if let Err(e) = renderer.display(frame, rectangles)
                && first_err.is_none()
            {
                first_err = Some(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct FrameReport<'a> {
    frame: usize,
    width: u32,
    height: u32,
    rectangles: &'a [Rectangle],
}

/// Writes a report of each frame's rectangles
pub struct ConsoleRenderer<W: Write> {
    out: W,
    format: ReportFormat,
    frames: usize,
}

impl ConsoleRenderer<std::io::Stdout> {
    pub fn stdout(format: ReportFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self {
            out,
            format,
            frames: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn display(&mut self, frame: &RgbImage, rectangles: &[Rectangle]) -> Result<()> {
        self.frames += 1;
        match self.format {
            ReportFormat::Json => {
                let report = FrameReport {
                    frame: self.frames,
                    width: frame.width(),
                    height: frame.height(),
                    rectangles,
                };
                serde_json::to_writer(&mut self.out, &report)?;
                writeln!(self.out)?;
            }
            ReportFormat::Text => {
                writeln!(
                    self.out,
                    "Frame {} ({}x{}): {} rectangles",
                    self.frames,
                    frame.width(),
                    frame.height(),
                    rectangles.len()
                )?;
                for (i, rect) in rectangles.iter().enumerate() {
                    let corners: Vec<String> = rect
                        .corners
                        .iter()
                        .map(|p| format!("({}, {})", p.x, p.y))
                        .collect();
                    writeln!(
                        self.out,
                        "  Rectangle {} [{}]: {} area={:.0} squareness={:.3} average height: {:.1}",
                        i + 1,
                        rect.channel.name(),
                        corners.join(" "),
                        rect.area,
                        rect.squareness,
                        rect.vertical_extent
                    )?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

const OUTLINE: Rgb<u8> = Rgb([0, 255, 0]);

/// Copy of `frame` with every rectangle outlined as a closed 3 px polyline
pub fn draw_overlay(frame: &RgbImage, rectangles: &[Rectangle]) -> RgbImage {
    let mut canvas = frame.clone();
    for rect in rectangles {
        for i in 0..4 {
            let a = rect.corners[i];
            let b = rect.corners[(i + 1) % 4];
            for oy in -1..=1 {
                for ox in -1..=1 {
                    draw_line_segment_mut(
                        &mut canvas,
                        ((a.x + ox) as f32, (a.y + oy) as f32),
                        ((b.x + ox) as f32, (b.y + oy) as f32),
                        OUTLINE,
                    );
                }
            }
        }
    }
    canvas
}

/// Saves an annotated copy of every frame as `frame_NNNNN.png`
pub struct OverlayRenderer {
    output_dir: PathBuf,
    frames: usize,
}

impl OverlayRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            frames: 0,
        })
    }
}

impl Renderer for OverlayRenderer {
    fn display(&mut self, frame: &RgbImage, rectangles: &[Rectangle]) -> Result<()> {
        self.frames += 1;
        let path = self.output_dir.join(format!("frame_{:05}.png", self.frames));
        draw_overlay(frame, rectangles)
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to save overlay {}: {}", path.display(), e))
    }
}
