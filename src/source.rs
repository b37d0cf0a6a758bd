use std::io::BufRead;
use std::path::{Path, PathBuf};

use image::codecs::pnm::PnmDecoder;
use image::{DynamicImage, ImageReader, RgbImage};

use crate::error::AcquisitionError;

/// Supplier of frames for a detection session
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AcquisitionError>;
}

/// Load and decode a still image, converting it to 8-bit RGB
pub fn load_image(path: &Path) -> Result<RgbImage, AcquisitionError> {
    let open_err = |source| AcquisitionError::Open {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .map_err(open_err)?
        .with_guessed_format()
        .map_err(open_err)?
        .decode()
        .map_err(|source| AcquisitionError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(img.to_rgb8())
}

/// A single image file, yielded once
pub struct StillImage {
    path: PathBuf,
    consumed: bool,
}

impl StillImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            consumed: false,
        }
    }
}

impl FrameSource for StillImage {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AcquisitionError> {
        if self.consumed {
            return Ok(None);
        }
        self.consumed = true;
        load_image(&self.path).map(Some)
    }
}

/// Back-to-back binary PNM frames on a byte stream.
///
/// This is what capture tools emit when piping video as images, e.g.
/// `ffmpeg -i /dev/video0 -f image2pipe -vcodec ppm -`.
pub struct PnmStream<R> {
    reader: R,
    decoded: usize,
}

impl<R: BufRead> PnmStream<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, decoded: 0 }
    }

    /// Number of frames decoded so far
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// Consume whitespace between frames; false at end of stream
    fn skip_separators(&mut self) -> std::io::Result<bool> {
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(false);
            }
            let blank = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            if blank == 0 {
                return Ok(true);
            }
            self.reader.consume(blank);
        }
    }
}

impl<R: BufRead> FrameSource for PnmStream<R> {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, AcquisitionError> {
        if !self.skip_separators()? {
            return Ok(None);
        }
        let index = self.decoded;
        let stream_err = |source| AcquisitionError::StreamDecode { index, source };
        let decoder = PnmDecoder::new(&mut self.reader).map_err(stream_err)?;
        let img = DynamicImage::from_decoder(decoder).map_err(stream_err)?;
        self.decoded += 1;
        Ok(Some(img.to_rgb8()))
    }
}
