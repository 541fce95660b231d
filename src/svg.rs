//! SVG visualization of a sampling plan.
//!
//! Renders two annotated panels stacked vertically: the source image with
//! the region being read, and the canvas with the region being written and
//! the background fill around it.
//!
//! # Example
//!
//! ```
//! use zenaspect::{CanvasColor, Mode, Size, Target, svg::render_plan_svg};
//!
//! let plan = Target::new(Mode::Fit, 400, 400)
//!     .plan(Size::new(1600, 900))
//!     .unwrap();
//!
//! let svg = render_plan_svg(&plan, CanvasColor::white());
//! assert!(svg.starts_with("<svg"));
//! ```

use core::fmt::Write;

use crate::color::CanvasColor;
use crate::sampling::{Rect, SamplingPlan, Size};

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 50.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;

/// One panel of the visualization.
struct Panel {
    label: String,
    outer: Size,
    /// Fill of the outer box. `None` uses the neutral stylesheet fill.
    outer_fill: Option<CanvasColor>,
    inner: Rect,
    annotation: String,
}

/// Render a complete SVG document for `plan`.
///
/// `background` colors the canvas panel's padding so letterbox bars show up.
pub fn render_plan_svg(plan: &SamplingPlan, background: CanvasColor) -> String {
    let panels = build_panels(plan, background);
    render_panels(&panels)
}

fn build_panels(plan: &SamplingPlan, background: CanvasColor) -> [Panel; 2] {
    let s = plan.source;
    let d = plan.destination;
    let source_note = if plan.needs_crop() {
        format!(
            "read {:.1}×{:.1} at ({:.1}, {:.1})",
            s.width, s.height, s.x, s.y
        )
    } else {
        String::from("read whole image")
    };
    let canvas_note = if plan.needs_padding() {
        format!(
            "write {:.1}×{:.1} at ({:.1}, {:.1}), bg {}",
            d.width,
            d.height,
            d.x,
            d.y,
            hex(background)
        )
    } else {
        String::from("write whole canvas")
    };
    [
        Panel {
            label: format!("Source  {}", plan.source_size),
            outer: plan.source_size,
            outer_fill: None,
            inner: s,
            annotation: source_note,
        },
        Panel {
            label: format!("Canvas  {}", plan.canvas),
            outer: plan.canvas,
            outer_fill: Some(background),
            inner: d,
            annotation: canvas_note,
        },
    ]
}

/// Scale a Size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    let w = size.width as f64;
    let h = size.height as f64;
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

fn render_panels(panels: &[Panel]) -> String {
    let n = panels.len() as f64;
    let total_h = 2.0 * MARGIN_TOP + n * (LABEL_H + MAX_PANEL_H) + (n - 1.0) * PANEL_GAP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;
    let center_x = total_w / 2.0;

    let mut svg = String::with_capacity(2048);
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    );
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .inner { fill: #6ba3d6; fill-opacity: 0.85; stroke: #2c6faa; stroke-width: 1.5; }
  .arrow { stroke: #666; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .inner { fill: #3a72a4; stroke: #5a9fd4; }
    .arrow { stroke: #888; }
  }
</style>
"##,
    );

    let mut y = MARGIN_TOP;
    for (i, panel) in panels.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&panel.label)
        );
        y += LABEL_H;

        let (pw, ph, scale) = scale_to_fit(panel.outer);
        let px = center_x - pw / 2.0;
        let py = y;

        match panel.outer_fill {
            Some(color) => {
                let [_, _, _, a] = color.to_rgba();
                let _ = writeln!(
                    svg,
                    r#"<rect x="{px:.1}" y="{py:.1}" width="{pw:.1}" height="{ph:.1}" class="outer" style="fill:{};fill-opacity:{:.3}" rx="2"/>"#,
                    hex_rgb(color),
                    a as f64 / 255.0
                );
            }
            None => {
                let _ = writeln!(
                    svg,
                    r#"<rect x="{px:.1}" y="{py:.1}" width="{pw:.1}" height="{ph:.1}" class="outer" rx="2"/>"#
                );
            }
        }

        let r = panel.inner;
        let _ = writeln!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner" rx="1"/>"#,
            px + r.x * scale,
            py + r.y * scale,
            r.width * scale,
            r.height * scale
        );

        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
            center_x,
            py + ph + 14.0,
            escape_xml(&panel.annotation)
        );

        y += MAX_PANEL_H;
        if i + 1 < panels.len() {
            let _ = writeln!(
                svg,
                r#"<line x1="{0}" y1="{1:.1}" x2="{0}" y2="{2:.1}" class="arrow"/>"#,
                center_x,
                y + 20.0,
                y + PANEL_GAP - 8.0
            );
            y += PANEL_GAP;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn hex_rgb(color: CanvasColor) -> String {
    let [r, g, b, _] = color.to_rgba();
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn hex(color: CanvasColor) -> String {
    match color {
        CanvasColor::Transparent => String::from("transparent"),
        CanvasColor::Srgb { a: 255, .. } => hex_rgb(color),
        CanvasColor::Srgb { a, .. } => format!("{}{a:02x}", hex_rgb(color)),
    }
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{Anchor, Mode, Offset, Target};

    #[test]
    fn full_copy_says_so() {
        let plan = Target::new(Mode::Crop, 160, 90)
            .plan(Size::new(1920, 1080))
            .unwrap();
        let svg = render_plan_svg(&plan, CanvasColor::white());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Source  1920×1080"));
        assert!(svg.contains("Canvas  160×90"));
        assert!(svg.contains("read whole image"));
        assert!(svg.contains("write whole canvas"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn crop_annotates_source_window() {
        let plan = Target::new(Mode::Crop, 500, 500)
            .anchor(Anchor::Left)
            .offset(Offset::ZERO)
            .plan(Size::new(1000, 500))
            .unwrap();
        let svg = render_plan_svg(&plan, CanvasColor::white());
        assert!(svg.contains("read 500.0×500.0 at (0.0, 0.0)"));
    }

    #[test]
    fn fit_shows_background_fill() {
        let plan = Target::new(Mode::Fit, 500, 500)
            .plan(Size::new(1000, 500))
            .unwrap();
        let svg = render_plan_svg(&plan, CanvasColor::black());
        assert!(svg.contains("write 500.0×250.0 at (0.0, 125.0), bg #000000"));
        assert!(svg.contains("fill:#000000"));
    }

    #[test]
    fn translucent_background_keeps_alpha() {
        assert_eq!(
            hex(CanvasColor::Srgb {
                r: 255,
                g: 0,
                b: 0,
                a: 128
            }),
            "#ff000080"
        );
        assert_eq!(hex(CanvasColor::Transparent), "transparent");
    }

    #[test]
    fn svg_is_valid_xml() {
        let plan = Target::new(Mode::Fit, 300, 700)
            .plan(Size::new(640, 480))
            .unwrap();
        let svg = render_plan_svg(&plan, CanvasColor::Transparent);
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("<<"));
        assert_eq!(svg.matches("<text").count(), 4);
    }
}
