//! Plans executed on real `image` buffers, through encode and decode.

#![cfg(feature = "render")]

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use zenaspect::render::{self, ImageRenderer, RenderGateway};
use zenaspect::*;

/// Four vertical stripes: red, green, blue, yellow.
fn stripes(w: u32, h: u32) -> DynamicImage {
    const COLORS: [[u8; 4]; 4] = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 0, 255],
    ];
    DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, _| {
        Rgba(COLORS[(x * 4 / w) as usize])
    }))
}

fn draw(c: &Converter, image: &DynamicImage) -> RgbaImage {
    ImageRenderer::new(FilterType::Nearest)
        .draw(image, &c.plan().unwrap(), c.background())
        .unwrap()
}

#[test]
fn crop_session_exports_middle_stripes() {
    let image = stripes(400, 100);
    let mut c = Converter::default();
    c.load_source(render::source_size(&image)).unwrap();
    c.set_target(Size::new(200, 100)).unwrap();
    c.set_mode(Mode::Crop);

    let out = draw(&c, &image);
    assert_eq!(out.dimensions(), (200, 100));
    assert_eq!(out.get_pixel(0, 50).0, [0, 255, 0, 255]);
    assert_eq!(out.get_pixel(199, 50).0, [0, 0, 255, 255]);

    let png = render::encode(&out, ImageFormat::Png).unwrap();
    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back, out);
    assert_eq!(
        render::export_filename(c.target(), ImageFormat::Png),
        "resized-200x100.png"
    );
}

#[test]
fn transparent_letterbox_survives_png() {
    let image = stripes(400, 100);
    let mut c = Converter::default();
    c.load_source(render::source_size(&image)).unwrap();
    c.set_target(Size::new(100, 100)).unwrap();
    c.set_background(CanvasColor::Transparent);

    let out = draw(&c, &image);
    // 4:1 into a square: 37.5px bars, rasterized to rows 0..38 and 63..100.
    assert_eq!(out.get_pixel(50, 0).0[3], 0);
    assert_eq!(out.get_pixel(50, 99).0[3], 0);
    assert_eq!(out.get_pixel(0, 50).0, [255, 0, 0, 255]);

    let png = render::encode(&out, ImageFormat::Png).unwrap();
    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.get_pixel(50, 0).0[3], 0);
}

#[test]
fn colored_letterbox_fills_bars() {
    let image = stripes(100, 400);
    let mut c = Converter::default();
    c.load_source(render::source_size(&image)).unwrap();
    c.set_target(Size::new(200, 200)).unwrap();
    c.set_background("#336699".parse().unwrap());

    let out = draw(&c, &image);
    // 1:4 into a square: 50px wide column centered, 75px bars.
    for y in [0, 100, 199] {
        assert_eq!(out.get_pixel(0, y).0, [0x33, 0x66, 0x99, 255]);
        assert_eq!(out.get_pixel(199, y).0, [0x33, 0x66, 0x99, 255]);
    }
    assert_ne!(out.get_pixel(100, 100).0, [0x33, 0x66, 0x99, 255]);
}

#[test]
fn jpeg_export_is_opaque() {
    let image = stripes(64, 32);
    let mut c = Converter::default();
    c.load_source(render::source_size(&image)).unwrap();
    c.set_target(Size::new(32, 32)).unwrap();
    c.set_background(CanvasColor::Transparent);

    let out = draw(&c, &image);
    let jpg = render::encode(&out, ImageFormat::Jpeg).unwrap();
    let back = image::load_from_memory(&jpg).unwrap();
    assert_eq!(render::source_size(&back), Size::new(32, 32));
    assert!(!back.color().has_alpha());
}

#[test]
fn stale_plan_is_rejected() {
    let mut c = Converter::default();
    c.load_source(Size::new(400, 100)).unwrap();
    let plan = c.plan().unwrap();
    let err = ImageRenderer::default()
        .draw(&stripes(300, 100), &plan, c.background())
        .unwrap_err();
    assert!(matches!(err, render::RenderError::PlanMismatch { .. }));
}
