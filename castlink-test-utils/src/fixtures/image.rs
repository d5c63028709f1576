//! Cover art fixtures for preview image tests.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use mockito::{Mock, ServerGuard};

const COVER_SIZE: u32 = 400;
const CENTER_SQUARE: u32 = 100;

/// A 400×400 PNG cover: red with a white square in the middle.
///
/// The two-tone layout lets composition tests tell the sharp center
/// composite apart from the blurred background by color alone.
pub fn test_cover_image_png() -> Vec<u8> {
    let mut cover = RgbaImage::from_pixel(COVER_SIZE, COVER_SIZE, Rgba([200, 30, 30, 255]));

    let start = (COVER_SIZE - CENTER_SQUARE) / 2;
    for y in start..start + CENTER_SQUARE {
        for x in start..start + CENTER_SQUARE {
            cover.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(cover)
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("encoding the fixture cover cannot fail");

    buffer.into_inner()
}

/// Serve the fixture cover at `path`.
pub fn mock_cover_image_endpoint(
    server: &mut ServerGuard,
    path: &str,
    expected_requests: usize,
) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(test_cover_image_png())
        .expect(expected_requests)
        .create()
}
