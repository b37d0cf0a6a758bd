use log::{info, warn};

use crate::debug::DebugConfig;
use crate::detection::RectangleDetector;
use crate::error::AcquisitionError;
use crate::render::Renderer;
use crate::source::FrameSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: usize,
    pub rectangles: usize,
}

/// Drives frames from a source through the detector into a renderer, one at a time
pub struct Session {
    detector: RectangleDetector,
    debug: Option<DebugConfig>,
    max_frames: Option<usize>,
}

impl Session {
    pub fn new(detector: RectangleDetector) -> Self {
        Self {
            detector,
            debug: None,
            max_frames: None,
        }
    }

    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Stop after `max_frames` frames even if the source has more
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Process frames until the source ends or the frame limit is hit.
    ///
    /// Acquisition errors end the session. Renderer failures are logged and the
    /// session carries on with the next frame.
    pub fn run<S, R>(
        &self,
        source: &mut S,
        renderer: &mut R,
    ) -> Result<SessionSummary, AcquisitionError>
    where
        S: FrameSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut summary = SessionSummary::default();

        loop {
            if self.max_frames.is_some_and(|max| summary.frames >= max) {
                info!("Frame limit reached after {} frames", summary.frames);
                break;
            }

            let Some(frame) = source.next_frame()? else {
                info!("End of input after {} frames", summary.frames);
                break;
            };
            summary.frames += 1;

            let rectangles = match &self.debug {
                Some(debug) => {
                    let dir = debug.frame_dir(summary.frames);
                    self.detector.detect_with_dump(&frame, &dir).unwrap_or_else(|e| {
                        warn!("Debug dump disabled for frame {}: {:#}", summary.frames, e);
                        self.detector.detect(&frame)
                    })
                }
                None => self.detector.detect(&frame),
            };
            summary.rectangles += rectangles.len();

            if let Err(e) = renderer.display(&frame, &rectangles) {
                warn!("Rendering frame {} failed: {:#}", summary.frames, e);
            }
        }

        Ok(summary)
    }
}
