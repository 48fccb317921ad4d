use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgb;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_rgb_drops_alpha_and_keeps_layout() {
    let src = vec![
        100u8, 50, 200, 128, //
        1, 2, 3, 255, //
    ];
    let img = image::RgbaImage::from_raw(2, 1, src).unwrap();
    let fb = decode_rgb(&png_bytes(image::DynamicImage::ImageRgba8(img))).unwrap();

    assert_eq!(fb.width(), 2);
    assert_eq!(fb.height(), 1);
    assert_eq!(fb.pixel(0, 0), Some(Rgb::new(100, 50, 200)));
    assert_eq!(fb.pixel(1, 0), Some(Rgb::new(1, 2, 3)));
}

#[test]
fn decode_rgb_rejects_garbage() {
    let err = decode_rgb(b"not an image").unwrap_err();
    assert!(matches!(err, TurtleError::Other(_)));
}

#[test]
fn missing_file_is_not_found_with_absolute_path() {
    let err = ImageGrabber::grab_rgb(Path::new("definitely/missing/picture.png")).unwrap_err();
    match err {
        TurtleError::NotFound(p) => {
            assert!(Path::new(&p).is_absolute(), "{p}");
            assert!(p.ends_with("picture.png"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn gray_grid_uses_luma() {
    let canvas = Canvas::new(2, 1).unwrap();
    let fb = Framebuffer::from_rgb8(canvas, vec![0, 0, 0, 255, 0, 0]).unwrap();
    let gray = GrayGrid::from_framebuffer(&fb);
    assert_eq!(gray.get(0, 0), Some(0));
    // 0.299 * 255/256 * 256 = 76.245
    assert_eq!(gray.get(1, 0), Some(76));
    assert_eq!(gray.get(2, 0), None);
    assert_eq!(gray.rows(), vec![vec![0, 76]]);
}

#[test]
fn gray_grid_new_checks_length() {
    let canvas = Canvas::new(2, 2).unwrap();
    assert!(GrayGrid::new(canvas, vec![0; 3]).is_err());
    let g = GrayGrid::new(canvas, vec![1, 2, 3, 4]).unwrap();
    assert_eq!(g.get(1, 1), Some(4));
    assert_eq!(g.as_bytes().len(), 4);
}

#[test]
fn zero_width_gray_rows_are_empty() {
    let fb = Framebuffer::new(Canvas {
        width: 0,
        height: 2,
    });
    let gray = GrayGrid::from_framebuffer(&fb);
    assert!(gray.rows().is_empty());
    assert_eq!(gray.get(0, 0), None);
}
