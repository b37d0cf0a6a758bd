use std::collections::VecDeque;

use image::{Rgb, RgbImage};
use rectsight::{AcquisitionError, FrameSource, Rectangle, Renderer};
use tempfile::NamedTempFile;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// A `width` x `height` frame of `background` with a filled box covering
/// columns `x0..=x1` and rows `y0..=y1`
pub fn frame_with_box(
    width: u32,
    height: u32,
    background: Rgb<u8>,
    color: Rgb<u8>,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x0..=x1).contains(&x) && (y0..=y1).contains(&y) {
            color
        } else {
            background
        }
    })
}

/// The standard scene: an 80 x 60 white box on black
pub fn white_box_frame() -> RgbImage {
    frame_with_box(200, 160, BLACK, WHITE, (50, 40, 129, 99))
}

/// Saves `frame` as a PNG in a temp file.
/// The file will be automatically cleaned up when dropped.
pub fn write_png(frame: &RgbImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    frame
        .save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Binary PPM encoding of `frame`
pub fn ppm_bytes(frame: &RgbImage) -> Vec<u8> {
    let mut bytes = format!("P6\n{} {}\n255\n", frame.width(), frame.height()).into_bytes();
    bytes.extend_from_slice(frame.as_raw());
    bytes
}

/// Frames from memory, optionally failing once they run out
pub struct QueueSource {
    frames: VecDeque<RgbImage>,
    fail_at_end: bool,
}

impl QueueSource {
    pub fn new(frames: Vec<RgbImage>) -> Self {
        Self {
            frames: frames.into(),
            fail_at_end: false,
        }
    }

    pub fn failing_after(frames: Vec<RgbImage>) -> Self {
        Self {
            frames: frames.into(),
            fail_at_end: true,
        }
    }
}

impl FrameSource for QueueSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AcquisitionError> {
        match self.frames.pop_front() {
            Some(frame) => Ok(Some(frame)),
            None if self.fail_at_end => Err(AcquisitionError::Read(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "camera unplugged",
            ))),
            None => Ok(None),
        }
    }
}

/// Keeps every frame's rectangles; can be told to fail
#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Vec<Rectangle>>,
    pub fail: bool,
}

impl Renderer for RecordingRenderer {
    fn display(&mut self, _frame: &RgbImage, rectangles: &[Rectangle]) -> anyhow::Result<()> {
        self.frames.push(rectangles.to_vec());
        if self.fail {
            anyhow::bail!("window closed");
        }
        Ok(())
    }
}
