use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

fn main() -> anyhow::Result<()> {
    let mut img = RgbImage::from_pixel(640, 480, Rgb([30, 30, 40]));

    // Axis-aligned white target
    draw_filled_rect_mut(&mut img, Rect::at(80, 90).of_size(160, 110), Rgb([255, 255, 255]));

    // Skewed target, bright only in the green plane
    draw_polygon_mut(
        &mut img,
        &[
            Point::new(360, 120),
            Point::new(540, 140),
            Point::new(530, 300),
            Point::new(350, 280),
        ],
        Rgb([20, 250, 20]),
    );

    // Too small to count
    draw_filled_rect_mut(&mut img, Rect::at(120, 360).of_size(20, 20), Rgb([255, 255, 255]));

    img.save("test_image.png")?;
    println!("Created test_image.png (640x480 synthetic targets)");
    Ok(())
}
