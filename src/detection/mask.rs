use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::map::map_colors;
use imageproc::morphology::{dilate, erode};

use crate::config::{MorphologyParams, ThresholdParams};
use crate::models::Channel;

/// Copy one colour plane of `frame` into a new single-channel image
pub fn extract_channel(frame: &RgbImage, channel: Channel) -> GrayImage {
    let offset = channel.offset();
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        Luma([frame.get_pixel(x, y)[offset]])
    })
}

/// Binary threshold: `high` where intensity >= `low`, 0 elsewhere
pub fn binarize(plane: &GrayImage, params: ThresholdParams) -> GrayImage {
    map_colors(plane, |p| {
        if p[0] >= params.low {
            Luma([params.high])
        } else {
            Luma([0])
        }
    })
}

/// Dilate then erode with a square element.
///
/// `k` iterations of the 3x3 square element equal one pass with an
/// L-infinity ball of radius `k`. Dilation writes 255, so any non-zero value
/// must be read as foreground afterwards.
pub fn close(mask: &GrayImage, params: MorphologyParams) -> GrayImage {
    let grown = if params.dilate_iterations > 0 {
        dilate(mask, Norm::LInf, params.dilate_iterations)
    } else {
        mask.clone()
    };
    if params.erode_iterations > 0 {
        erode(&grown, Norm::LInf, params.erode_iterations)
    } else {
        grown
    }
}
