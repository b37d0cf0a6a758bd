//! Pyramid smoothing of incoming frames.
//!
//! One Gaussian pyramid reduction followed by one expansion acts as a cheap
//! low-pass filter: single-pixel noise disappears while edges of large
//! regions survive. Both passes use the 5-tap binomial kernel `[1 4 6 4 1]`
//! with a reflect-101 border.

use image::{ImageBuffer, Pixel, RgbImage};

const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];

/// Mirror an out-of-range index back into `0..len` without repeating the edge sample
fn reflect101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = i;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}

/// Source taps contributing to output sample `x` of a 2x upsampled signal
fn up_taps(x: usize, len: usize) -> [(usize, u32); 3] {
    let i = (x / 2) as isize;
    if x % 2 == 0 {
        [
            (reflect101(i - 1, len), 1),
            (reflect101(i, len), 6),
            (reflect101(i + 1, len), 1),
        ]
    } else {
        [
            (reflect101(i, len), 4),
            (reflect101(i + 1, len), 4),
            (0, 0),
        ]
    }
}

/// Largest top-left region with even width and height
pub fn crop_even<P>(frame: &ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = frame.dimensions();
    image::imageops::crop_imm(frame, 0, 0, width & !1, height & !1).to_image()
}

/// Blur with the 5x5 binomial kernel and keep every other row and column
pub fn pyr_down<P>(src: &ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let cn = P::CHANNEL_COUNT as usize;
    let (w, h) = (src.width() as usize, src.height() as usize);
    let (dw, dh) = (w.div_ceil(2), h.div_ceil(2));
    let mut out = ImageBuffer::<P, Vec<u8>>::new(dw as u32, dh as u32);
    if w == 0 || h == 0 {
        return out;
    }
    let raw: &[u8] = src.as_raw();

    // horizontal pass, evaluated only at the kept columns
    let mut rows = vec![0u32; h * dw * cn];
    for y in 0..h {
        for dx in 0..dw {
            for (k, &weight) in KERNEL.iter().enumerate() {
                let sx = reflect101(2 * dx as isize + k as isize - 2, w);
                for c in 0..cn {
                    rows[(y * dw + dx) * cn + c] += weight * raw[(y * w + sx) * cn + c] as u32;
                }
            }
        }
    }

    let dst: &mut [u8] = &mut out;
    for dy in 0..dh {
        for dx in 0..dw {
            for c in 0..cn {
                let acc: u32 = KERNEL
                    .iter()
                    .enumerate()
                    .map(|(k, &weight)| {
                        let sy = reflect101(2 * dy as isize + k as isize - 2, h);
                        weight * rows[(sy * dw + dx) * cn + c]
                    })
                    .sum();
                dst[(dy * dw + dx) * cn + c] = ((acc + 128) >> 8) as u8;
            }
        }
    }
    out
}

/// Upsample to `width` x `height` and interpolate with the binomial kernel
pub fn pyr_up<P>(src: &ImageBuffer<P, Vec<u8>>, width: u32, height: u32) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let cn = P::CHANNEL_COUNT as usize;
    let (sw, sh) = (src.width() as usize, src.height() as usize);
    let (w, h) = (width as usize, height as usize);
    let mut out = ImageBuffer::<P, Vec<u8>>::new(width, height);
    if sw == 0 || sh == 0 || w == 0 || h == 0 {
        return out;
    }
    let raw: &[u8] = src.as_raw();

    let mut rows = vec![0u32; sh * w * cn];
    for y in 0..sh {
        for x in 0..w {
            for (sx, weight) in up_taps(x, sw) {
                for c in 0..cn {
                    rows[(y * w + x) * cn + c] += weight * raw[(y * sw + sx) * cn + c] as u32;
                }
            }
        }
    }

    let dst: &mut [u8] = &mut out;
    for y in 0..h {
        let taps = up_taps(y, sh);
        for x in 0..w {
            for c in 0..cn {
                let acc: u32 = taps
                    .iter()
                    .map(|&(sy, weight)| weight * rows[(sy * w + x) * cn + c])
                    .sum();
                dst[(y * w + x) * cn + c] = ((acc + 32) >> 6) as u8;
            }
        }
    }
    out
}

/// Even-crop the frame and run one reduce/expand pyramid round trip.
///
/// Returns `None` for frames smaller than 2x2 after cropping.
pub fn smooth(frame: &RgbImage) -> Option<RgbImage> {
    let cropped = crop_even(frame);
    let (width, height) = cropped.dimensions();
    if width < 2 || height < 2 {
        return None;
    }
    Some(pyr_up(&pyr_down(&cropped), width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};

    #[test]
    fn test_reflect101() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(-2, 5), 2);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(6, 5), 2);
        assert_eq!(reflect101(-2, 2), 0);
        assert_eq!(reflect101(3, 2), 1);
        assert_eq!(reflect101(7, 1), 0);
    }

    #[test]
    fn test_crop_even_drops_odd_row_and_column() {
        let img = GrayImage::from_pixel(7, 5, Luma([9]));
        let cropped = crop_even(&img);
        assert_eq!(cropped.dimensions(), (6, 4));
    }

    #[test]
    fn test_uniform_image_survives_round_trip() {
        let img = RgbImage::from_pixel(10, 8, Rgb([12, 200, 255]));
        let smoothed = smooth(&img).expect("frame is large enough");
        assert_eq!(smoothed.dimensions(), (10, 8));
        assert!(smoothed.pixels().all(|p| *p == Rgb([12, 200, 255])));
    }

    #[test]
    fn test_pyr_down_halves_dimensions() {
        let img = GrayImage::from_pixel(8, 6, Luma([100]));
        let down = pyr_down(&img);
        assert_eq!(down.dimensions(), (4, 3));
        assert!(down.pixels().all(|p| p[0] == 100));
    }

    #[test]
    fn test_isolated_speck_is_suppressed() {
        let mut img = GrayImage::new(16, 16);
        img.put_pixel(7, 7, Luma([255]));
        let smoothed = pyr_up(&pyr_down(&img), 16, 16);
        assert!(smoothed.pixels().all(|p| p[0] < 230));
    }

    #[test]
    fn test_large_region_keeps_its_interior() {
        let mut img = GrayImage::new(32, 32);
        for y in 8..24 {
            for x in 8..24 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let smoothed = pyr_up(&pyr_down(&img), 32, 32);
        assert_eq!(smoothed.get_pixel(16, 16)[0], 255);
        assert_eq!(smoothed.get_pixel(1, 1)[0], 0);
    }

    #[test]
    fn test_tiny_frame_is_degenerate() {
        assert!(smooth(&RgbImage::new(1, 9)).is_none());
        assert!(smooth(&RgbImage::new(0, 0)).is_none());
        assert!(smooth(&RgbImage::new(3, 3)).is_some());
    }

    #[test]
    fn test_input_is_not_modified() {
        let mut img = RgbImage::new(9, 9);
        img.put_pixel(4, 4, Rgb([255, 0, 0]));
        let before = img.clone();
        let _ = smooth(&img);
        assert_eq!(img, before);
    }
}
