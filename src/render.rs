//! Executing sampling plans against real pixels, and exporting the result.
//!
//! [`RenderGateway`] is the seam between plan computation and any 2D
//! draw-image primitive. [`ImageRenderer`] implements it with the `image`
//! crate: fill the canvas, crop, resample, composite.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::color::CanvasColor;
use crate::error::LayoutError;
use crate::sampling::{SamplingPlan, Size};

/// Errors from drawing or encoding.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// The plan was computed for a different source size.
    #[error("plan was computed for a {planned} source, image is {actual}")]
    PlanMismatch { planned: Size, actual: Size },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Draws a source image onto a fresh surface according to a plan.
pub trait RenderGateway {
    /// Decoded source image handle.
    type Source: ?Sized;
    /// The raster surface produced.
    type Surface;
    type Error;

    /// Fill a `plan.canvas`-sized surface with `background`, then copy
    /// `plan.source` from `source` into `plan.destination`.
    fn draw(
        &self,
        source: &Self::Source,
        plan: &SamplingPlan,
        background: CanvasColor,
    ) -> Result<Self::Surface, Self::Error>;
}

/// [`RenderGateway`] over `image::DynamicImage`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageRenderer {
    /// Resampling filter used when the source region and destination differ in size.
    pub filter: FilterType,
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl ImageRenderer {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl RenderGateway for ImageRenderer {
    type Source = DynamicImage;
    type Surface = RgbaImage;
    type Error = RenderError;

    fn draw(
        &self,
        source: &DynamicImage,
        plan: &SamplingPlan,
        background: CanvasColor,
    ) -> Result<RgbaImage, RenderError> {
        let actual = source_size(source);
        if actual != plan.source_size {
            return Err(RenderError::PlanMismatch {
                planned: plan.source_size,
                actual,
            });
        }

        let canvas_size = plan.canvas;
        let mut canvas =
            RgbaImage::from_pixel(canvas_size.width, canvas_size.height, Rgba(background.to_rgba()));

        let src = plan.source.to_pixels(actual.width, actual.height);
        let dst = plan
            .destination
            .to_pixels(canvas_size.width, canvas_size.height);
        log::debug!("draw src {src:?} → dst {dst:?} on {canvas_size}");

        let region = source.crop_imm(src.x, src.y, src.width, src.height);
        let region = if (src.width, src.height) == (dst.width, dst.height) {
            region
        } else {
            region.resize_exact(dst.width, dst.height, self.filter)
        };
        imageops::overlay(&mut canvas, &region.to_rgba8(), dst.x as i64, dst.y as i64);
        Ok(canvas)
    }
}

/// Natural size of a decoded image.
pub fn source_size(image: &DynamicImage) -> Size {
    Size::new(image.width(), image.height())
}

/// Download file name: `resized-{W}x{H}.{ext}`.
pub fn export_filename(target: Size, format: ImageFormat) -> String {
    let ext = format.extensions_str().first().copied().unwrap_or("img");
    format!("resized-{}x{}.{ext}", target.width, target.height)
}

/// Formats the renderer exports.
const WRITABLE: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::WebP,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
];

/// Output format from a file extension such as `png` or `.jpg`.
pub fn parse_format(ext: &str) -> Result<ImageFormat, RenderError> {
    let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
    ImageFormat::from_extension(&ext)
        .filter(|f| WRITABLE.contains(f))
        .ok_or(RenderError::UnsupportedFormat(ext))
}

/// Encode a drawn surface. Formats without alpha get the alpha channel dropped.
pub fn encode(surface: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
    let image = DynamicImage::ImageRgba8(surface.clone());
    let image = if matches!(format, ImageFormat::Jpeg) {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    };
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format)?;
    Ok(out.into_inner())
}

/// Parse a resampling filter name. Returns Triangle as fallback for invalid values.
pub fn parse_filter(s: &str) -> FilterType {
    let s = s.trim();
    if s.eq_ignore_ascii_case("nearest") {
        FilterType::Nearest
    } else if s.eq_ignore_ascii_case("catmullrom") || s.eq_ignore_ascii_case("catmull-rom") {
        FilterType::CatmullRom
    } else if s.eq_ignore_ascii_case("gaussian") {
        FilterType::Gaussian
    } else if s.eq_ignore_ascii_case("lanczos3") || s.eq_ignore_ascii_case("lanczos") {
        FilterType::Lanczos3
    } else {
        if !s.eq_ignore_ascii_case("triangle") {
            log::warn!("unknown resize filter {s:?}, using triangle");
        }
        FilterType::Triangle
    }
}
