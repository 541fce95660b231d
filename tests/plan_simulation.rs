//! Pixel simulation of sampling plans.
//!
//! Every pixel in the source stores its (x, y) origin coordinates, so a plan
//! executed against it shows exactly which source pixels landed where. Wrong
//! crop windows, wrong letterbox bands and out-of-bounds reads all show up
//! as mismatched coordinates or misplaced fill.
//!
//! Execution mirrors a draw-image primitive: rasterize both plan rects,
//! crop, nearest-neighbour resize, place on a fill-colored canvas.

use zenaspect::*;

// ---- Pixel simulation ----

/// A pixel that remembers where it came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pixel {
    /// Source pixel at (x, y) in the original image.
    Source(u32, u32),
    /// Background fill.
    Fill,
}

#[derive(Clone, Debug)]
struct Grid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Grid {
    /// Source image: pixel at (x,y) stores Source(x,y).
    fn source(w: u32, h: u32) -> Self {
        let pixels = (0..h)
            .flat_map(|y| (0..w).map(move |x| Pixel::Source(x, y)))
            .collect();
        Self {
            width: w,
            height: h,
            pixels,
        }
    }

    fn get(&self, x: u32, y: u32) -> Pixel {
        assert!(
            x < self.width && y < self.height,
            "({x},{y}) out of bounds {}x{}",
            self.width,
            self.height
        );
        self.pixels[(y * self.width + x) as usize]
    }

    fn crop(&self, r: PixelRect) -> Self {
        let mut pixels = Vec::with_capacity((r.width * r.height) as usize);
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                pixels.push(self.get(x, y));
            }
        }
        Self {
            width: r.width,
            height: r.height,
            pixels,
        }
    }

    fn resize_nn(&self, new_w: u32, new_h: u32) -> Self {
        assert!(new_w > 0 && new_h > 0);
        if new_w == self.width && new_h == self.height {
            return self.clone();
        }
        let mut pixels = Vec::with_capacity((new_w * new_h) as usize);
        for y in 0..new_h {
            let src_y = ((y as f64 + 0.5) * self.height as f64 / new_h as f64).floor() as u32;
            let src_y = src_y.min(self.height - 1);
            for x in 0..new_w {
                let src_x = ((x as f64 + 0.5) * self.width as f64 / new_w as f64).floor() as u32;
                let src_x = src_x.min(self.width - 1);
                pixels.push(self.get(src_x, src_y));
            }
        }
        Self {
            width: new_w,
            height: new_h,
            pixels,
        }
    }

    fn place_on_canvas(&self, cw: u32, ch: u32, px: u32, py: u32) -> Self {
        let mut pixels = vec![Pixel::Fill; (cw * ch) as usize];
        for sy in 0..self.height {
            for sx in 0..self.width {
                let (dx, dy) = (px + sx, py + sy);
                if dx < cw && dy < ch {
                    pixels[(dy * cw + dx) as usize] = self.get(sx, sy);
                }
            }
        }
        Self {
            width: cw,
            height: ch,
            pixels,
        }
    }

    fn fill_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p == Pixel::Fill).count()
    }

    /// Bounding box of all source coordinates present: (min_x, min_y, max_x, max_y).
    fn source_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        self.pixels.iter().fold(None, |acc, p| match (*p, acc) {
            (Pixel::Fill, acc) => acc,
            (Pixel::Source(x, y), None) => Some((x, y, x, y)),
            (Pixel::Source(x, y), Some((x0, y0, x1, y1))) => {
                Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y)))
            }
        })
    }
}

/// Run a plan against a provenance grid of its source size.
fn execute(plan: &SamplingPlan) -> Grid {
    let src = plan
        .source
        .to_pixels(plan.source_size.width, plan.source_size.height);
    let dst = plan.destination.to_pixels(plan.canvas.width, plan.canvas.height);
    Grid::source(plan.source_size.width, plan.source_size.height)
        .crop(src)
        .resize_nn(dst.width, dst.height)
        .place_on_canvas(plan.canvas.width, plan.canvas.height, dst.x, dst.y)
}

fn crop_plan(source: (u32, u32), target: (u32, u32), anchor: Anchor, offset: Offset) -> SamplingPlan {
    Target::new(Mode::Crop, target.0, target.1)
        .anchor(anchor)
        .offset(offset)
        .plan(Size::new(source.0, source.1))
        .unwrap()
}

fn fit_plan(source: (u32, u32), target: (u32, u32)) -> SamplingPlan {
    Target::new(Mode::Fit, target.0, target.1)
        .plan(Size::new(source.0, source.1))
        .unwrap()
}

// ---- Scenarios ----

#[test]
fn letterbox_bands_top_and_bottom() {
    // 2:1 source into a square: 25px of bars above and below.
    let out = execute(&fit_plan((200, 100), (100, 100)));
    for y in 0..100 {
        let row_fill = (0..100).all(|x| out.get(x, y) == Pixel::Fill);
        let row_image = (0..100).all(|x| out.get(x, y) != Pixel::Fill);
        if (25..75).contains(&y) {
            assert!(row_image, "row {y} should be image");
        } else {
            assert!(row_fill, "row {y} should be fill");
        }
    }
    // 200→100 nearest-neighbour samples odd columns.
    assert_eq!(out.source_bounds(), Some((1, 1, 199, 99)));
}

#[test]
fn pillarbox_bands_left_and_right() {
    let out = execute(&fit_plan((100, 200), (100, 100)));
    for x in 0..100 {
        let col_fill = (0..100).all(|y| out.get(x, y) == Pixel::Fill);
        if (25..75).contains(&x) {
            assert!(!col_fill, "column {x} should be image");
        } else {
            assert!(col_fill, "column {x} should be fill");
        }
    }
}

#[test]
fn center_crop_reads_middle() {
    let out = execute(&crop_plan((100, 50), (50, 50), Anchor::Center, Offset::ZERO));
    assert_eq!(out.fill_count(), 0);
    assert_eq!(out.source_bounds(), Some((25, 0, 74, 49)));
    assert_eq!(out.get(0, 0), Pixel::Source(25, 0));
}

#[test]
fn anchors_pick_window_along_cropped_axis() {
    let cases = [
        (Anchor::TopLeft, 0),
        (Anchor::Left, 0),
        (Anchor::BottomLeft, 0),
        (Anchor::Top, 25),
        (Anchor::Center, 25),
        (Anchor::Bottom, 25),
        (Anchor::TopRight, 50),
        (Anchor::Right, 50),
        (Anchor::BottomRight, 50),
    ];
    for (anchor, x0) in cases {
        let out = execute(&crop_plan((100, 50), (50, 50), anchor, Offset::ZERO));
        assert_eq!(
            out.source_bounds(),
            Some((x0, 0, x0 + 49, 49)),
            "anchor {anchor}"
        );
    }
}

#[test]
fn vertical_crop_follows_vertical_anchor() {
    let cases = [(Anchor::Top, 0), (Anchor::Center, 25), (Anchor::BottomRight, 50)];
    for (anchor, y0) in cases {
        let out = execute(&crop_plan((50, 100), (50, 50), anchor, Offset::ZERO));
        assert_eq!(
            out.source_bounds(),
            Some((0, y0, 49, y0 + 49)),
            "anchor {anchor}"
        );
    }
}

#[test]
fn offset_shifts_then_clamps() {
    // Positive offset moves the window toward the origin.
    let out = execute(&crop_plan((100, 50), (50, 50), Anchor::Center, Offset::new(10.0, 0.0)));
    assert_eq!(out.get(0, 0), Pixel::Source(15, 0));

    let out = execute(&crop_plan((100, 50), (50, 50), Anchor::Center, Offset::new(1e6, 0.0)));
    assert_eq!(out.source_bounds(), Some((0, 0, 49, 49)));

    let out = execute(&crop_plan((100, 50), (50, 50), Anchor::Center, Offset::new(-1e6, 0.0)));
    assert_eq!(out.source_bounds(), Some((50, 0, 99, 49)));
}

#[test]
fn offset_on_uncropped_axis_has_no_effect() {
    let a = crop_plan((100, 50), (50, 50), Anchor::Center, Offset::ZERO);
    let b = crop_plan((100, 50), (50, 50), Anchor::Center, Offset::new(0.0, 30.0));
    assert_eq!(a, b);
}

#[test]
fn identical_size_is_identity() {
    for mode in [Mode::Fit, Mode::Crop] {
        let plan = Target::new(mode, 13, 7).plan(Size::new(13, 7)).unwrap();
        assert!(plan.is_full_copy());
        let out = execute(&plan);
        for y in 0..7 {
            for x in 0..13 {
                assert_eq!(out.get(x, y), Pixel::Source(x, y));
            }
        }
    }
}

// ---- Sweeps ----

const DIMS: &[u32] = &[1, 2, 3, 5, 8, 13, 21, 34, 55];

#[test]
fn crop_never_pads_and_keeps_one_axis_whole() {
    for &sw in DIMS {
        for &sh in DIMS {
            for &tw in DIMS {
                for &th in DIMS {
                    let plan = crop_plan((sw, sh), (tw, th), Anchor::Center, Offset::ZERO);
                    let ctx = format!("{sw}x{sh} → {tw}x{th}");
                    assert!(plan.source.is_within(plan.source_size, 1e-9), "{ctx}");
                    assert!(!plan.needs_padding(), "{ctx}");

                    let out = execute(&plan);
                    assert_eq!(out.fill_count(), 0, "{ctx}");

                    let src = plan.source.to_pixels(sw, sh);
                    assert!(src.width == sw || src.height == sh, "{ctx}: {src:?}");
                    let (x0, y0, x1, y1) = out.source_bounds().unwrap();
                    assert!(x0 >= src.x && x1 < src.x + src.width, "{ctx}");
                    assert!(y0 >= src.y && y1 < src.y + src.height, "{ctx}");
                }
            }
        }
    }
}

#[test]
fn fit_fill_matches_destination_complement() {
    for &sw in DIMS {
        for &sh in DIMS {
            for &tw in DIMS {
                for &th in DIMS {
                    let plan = fit_plan((sw, sh), (tw, th));
                    let ctx = format!("{sw}x{sh} → {tw}x{th}");
                    assert!(plan.destination.is_within(plan.canvas, 1e-9), "{ctx}");
                    assert!(!plan.needs_crop(), "{ctx}");

                    let dst = plan.destination.to_pixels(tw, th);
                    assert!(dst.width == tw || dst.height == th, "{ctx}: {dst:?}");

                    let out = execute(&plan);
                    let expected_fill = (tw * th - dst.width * dst.height) as usize;
                    assert_eq!(out.fill_count(), expected_fill, "{ctx}");
                    for y in 0..th {
                        for x in 0..tw {
                            let inside = x >= dst.x
                                && x < dst.x + dst.width
                                && y >= dst.y
                                && y < dst.y + dst.height;
                            assert_eq!(out.get(x, y) != Pixel::Fill, inside, "{ctx} at ({x},{y})");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn letterbox_bars_are_balanced() {
    for &sw in DIMS {
        for &sh in DIMS {
            for &tw in DIMS {
                for &th in DIMS {
                    let d = fit_plan((sw, sh), (tw, th)).destination;
                    let left = d.x;
                    let right = tw as f64 - d.right();
                    let top = d.y;
                    let bottom = th as f64 - d.bottom();
                    assert!((left - right).abs() < 1e-9, "{sw}x{sh} → {tw}x{th}");
                    assert!((top - bottom).abs() < 1e-9, "{sw}x{sh} → {tw}x{th}");
                }
            }
        }
    }
}

// ---- Converter to pixels ----

#[test]
fn dragged_converter_plan_reads_shifted_window() {
    let mut c = Converter::default();
    c.load_source(Size::new(100, 50)).unwrap();
    c.set_target(Size::new(50, 50)).unwrap();
    c.set_mode(Mode::Crop);

    // Canvas shown 25px wide: 4 source px per screen px on x, 2 on y.
    let shown = DisplaySize::new(25.0, 25.0);
    assert!(c.pointer_down(Point::new(10.0, 10.0)));
    assert!(c.pointer_move(Point::new(12.0, 10.0), shown).unwrap());
    c.pointer_up();
    assert_eq!(c.offset(), Offset::new(8.0, 0.0));

    let out = execute(&c.plan().unwrap());
    assert_eq!(out.get(0, 0), Pixel::Source(17, 0));
    assert_eq!(out.fill_count(), 0);
}
