//! Sampling plan computation for aspect-ratio resize operations.
//!
//! Given a source image size, a target canvas size, a [`Mode`], an
//! [`Anchor`] and a manual [`Offset`], computes which region of the source
//! to read and where on the canvas to write it. Pure geometry: no pixel
//! operations, no allocations, `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use zenaspect::{Anchor, Mode, Rect, Size, Target};
//!
//! let plan = Target::new(Mode::Crop, 500, 500)
//!     .anchor(Anchor::Center)
//!     .plan(Size::new(1000, 500))
//!     .unwrap();
//!
//! // 2:1 source cropped to a centered 1:1 window, drawn over the full canvas.
//! assert_eq!(plan.source, Rect::new(250.0, 0.0, 500.0, 500.0));
//! assert_eq!(plan.destination, Rect::new(0.0, 0.0, 500.0, 500.0));
//! ```

use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::Float;

use crate::error::{LayoutError, positive};

/// How the source is mapped onto a canvas of a different aspect ratio.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Letterbox: the whole source is visible, the canvas is padded.
    #[default]
    Fit,
    /// Fill: the canvas is covered, the excess source axis is trimmed.
    Crop,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fit => "fit",
            Self::Crop => "crop",
        })
    }
}

impl FromStr for Mode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if ["fit", "letterbox", "pad"]
            .iter()
            .any(|k| s.eq_ignore_ascii_case(k))
        {
            Ok(Self::Fit)
        } else if ["crop", "fill"].iter().any(|k| s.eq_ignore_ascii_case(k)) {
            Ok(Self::Crop)
        } else {
            Err(LayoutError::Unparseable { field: "mode" })
        }
    }
}

/// Position along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Left or top edge.
    Near,
    /// Centered.
    Center,
    /// Right or bottom edge.
    Far,
}

impl Align {
    /// Offset of an item within `space` spare pixels.
    fn place(self, space: f64) -> f64 {
        match self {
            Self::Near => 0.0,
            Self::Center => space / 2.0,
            Self::Far => space,
        }
    }
}

/// Default position of the crop window when no manual offset is applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    /// All anchors in 3×3 grid order, row by row.
    pub const ALL: [Anchor; 9] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    /// Horizontal component: left column is `Near`, right column is `Far`.
    pub const fn horizontal(self) -> Align {
        match self {
            Self::TopLeft | Self::Left | Self::BottomLeft => Align::Near,
            Self::Top | Self::Center | Self::Bottom => Align::Center,
            Self::TopRight | Self::Right | Self::BottomRight => Align::Far,
        }
    }

    /// Vertical component: top row is `Near`, bottom row is `Far`.
    pub const fn vertical(self) -> Align {
        match self {
            Self::TopLeft | Self::Top | Self::TopRight => Align::Near,
            Self::Left | Self::Center | Self::Right => Align::Center,
            Self::BottomLeft | Self::Bottom | Self::BottomRight => Align::Far,
        }
    }

    /// Kebab-case name, e.g. `"top-left"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::BottomLeft => "bottom-left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = LayoutError;

    /// Accepts `top-left`, `top_left`, `topleft`, `tl`, and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Longest anchor name is "bottom-right".
        let mut buf = [0u8; 12];
        let mut len = 0;
        for b in s.trim().bytes().filter(|b| !matches!(b, b'-' | b'_' | b' ')) {
            if len == buf.len() {
                return Err(LayoutError::Unparseable { field: "anchor" });
            }
            buf[len] = b.to_ascii_lowercase();
            len += 1;
        }
        let anchor = match &buf[..len] {
            b"topleft" | b"tl" => Self::TopLeft,
            b"top" | b"t" | b"topcenter" => Self::Top,
            b"topright" | b"tr" => Self::TopRight,
            b"left" | b"l" | b"middleleft" => Self::Left,
            b"center" | b"centre" | b"c" | b"middle" => Self::Center,
            b"right" | b"r" | b"middleright" => Self::Right,
            b"bottomleft" | b"bl" => Self::BottomLeft,
            b"bottom" | b"b" | b"bottomcenter" => Self::Bottom,
            b"bottomright" | b"br" => Self::BottomRight,
            _ => return Err(LayoutError::Unparseable { field: "anchor" }),
        };
        Ok(anchor)
    }
}

/// Manual adjustment of the crop window, in source pixels.
///
/// Positive values move the window toward the origin (the image content
/// appears to move right/down), matching a drag of the image itself.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    /// No adjustment.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new offset.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Whether both dimensions are non-zero.
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Same aspect ratio as `other`, compared exactly by cross multiplication.
    pub fn same_aspect(&self, other: Size) -> bool {
        self.width as u64 * other.height as u64 == self.height as u64 * other.width as u64
    }

    fn check(self, width_field: &'static str, height_field: &'static str) -> Result<Self, LayoutError> {
        positive(width_field, self.width as f64)?;
        positive(height_field, self.height as f64)?;
        Ok(self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle with fractional coordinates.
///
/// Plan rectangles are not snapped to whole pixels; a draw-image primitive
/// accepts them as-is. Use [`to_pixels`](Self::to_pixels) for raster work.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rect covering `(0, 0, size.width, size.height)`.
    pub fn full(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f64, size.height as f64)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether this rect lies within `(0, 0, bounds)`, allowing `eps` of float slack.
    pub fn is_within(&self, bounds: Size, eps: f64) -> bool {
        self.x >= -eps
            && self.y >= -eps
            && self.right() <= bounds.width as f64 + eps
            && self.bottom() <= bounds.height as f64 + eps
    }

    /// Round to whole pixels and clamp into `(0, 0, max_w, max_h)`.
    /// Width and height are clamped to at least 1.
    pub fn to_pixels(&self, max_w: u32, max_h: u32) -> PixelRect {
        PixelRect {
            x: self.x.round().max(0.0) as u32,
            y: self.y.round().max(0.0) as u32,
            width: self.width.round().max(0.0) as u32,
            height: self.height.round().max(0.0) as u32,
        }
        .clamp_to(max_w, max_h)
    }
}

/// Axis-aligned rectangle in whole pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Create a new pixel rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamp this rect to fit within `(0, 0, max_w, max_h)`.
    /// Width and height are clamped to at least 1.
    pub fn clamp_to(self, max_w: u32, max_h: u32) -> Self {
        let x = self.x.min(max_w.saturating_sub(1));
        let y = self.y.min(max_h.saturating_sub(1));
        let w = self.width.min(max_w.saturating_sub(x)).max(1);
        let h = self.height.min(max_h.saturating_sub(y)).max(1);
        Self {
            x,
            y,
            width: w,
            height: h,
        }
    }
}

/// Which source axis a crop trims.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Source and destination rectangles for one resample operation.
///
/// `source` always lies within `source_size`; `destination` always lies
/// within `canvas`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplingPlan {
    /// Natural size of the source image.
    pub source_size: Size,
    /// Target canvas size.
    pub canvas: Size,
    /// Region read from the source.
    pub source: Rect,
    /// Region written on the canvas.
    pub destination: Rect,
}

impl SamplingPlan {
    /// Whether part of the canvas is left for the background fill.
    pub fn needs_padding(&self) -> bool {
        self.destination != Rect::full(self.canvas)
    }

    /// Whether part of the source is discarded.
    pub fn needs_crop(&self) -> bool {
        self.source != Rect::full(self.source_size)
    }

    /// Whole source onto whole canvas: no crop and no padding.
    pub fn is_full_copy(&self) -> bool {
        !self.needs_crop() && !self.needs_padding()
    }

    /// The source axis that was trimmed, if any. At most one axis is ever cropped.
    pub fn cropped_axis(&self) -> Option<Axis> {
        if self.source.width < self.source_size.width as f64 {
            Some(Axis::Horizontal)
        } else if self.source.height < self.source_size.height as f64 {
            Some(Axis::Vertical)
        } else {
            None
        }
    }
}

/// Canvas size and mode to plan toward, with optional crop framing.
///
/// # Example
///
/// ```
/// use zenaspect::{Mode, Rect, Size, Target};
///
/// let plan = Target::new(Mode::Fit, 500, 500)
///     .plan(Size::new(1000, 500))
///     .unwrap();
///
/// assert_eq!(plan.source, Rect::new(0.0, 0.0, 1000.0, 500.0));
/// assert_eq!(plan.destination, Rect::new(0.0, 125.0, 500.0, 250.0));
/// assert!(plan.needs_padding());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Target {
    pub mode: Mode,
    pub width: u32,
    pub height: u32,
    pub anchor: Anchor,
    pub offset: Offset,
}

impl Target {
    /// Create a target with centered anchor and no offset.
    pub fn new(mode: Mode, width: u32, height: u32) -> Self {
        Self {
            mode,
            width,
            height,
            anchor: Anchor::Center,
            offset: Offset::ZERO,
        }
    }

    /// Set the anchor for Crop mode.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the manual offset for Crop mode.
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Compute the sampling plan for a source of the given size.
    pub fn plan(&self, source: Size) -> Result<SamplingPlan, LayoutError> {
        plan(
            source,
            Size::new(self.width, self.height),
            self.mode,
            self.anchor,
            self.offset,
        )
    }
}

/// Compute the sampling plan.
///
/// Deterministic in its five inputs. Zero dimensions are rejected with
/// [`LayoutError::InvalidDimension`]; no plan is produced.
pub fn plan(
    source: Size,
    target: Size,
    mode: Mode,
    anchor: Anchor,
    offset: Offset,
) -> Result<SamplingPlan, LayoutError> {
    let source = source.check("source width", "source height")?;
    let target = target.check("target width", "target height")?;

    let full_copy = SamplingPlan {
        source_size: source,
        canvas: target,
        source: Rect::full(source),
        destination: Rect::full(target),
    };
    if source.same_aspect(target) {
        log::trace!("plan {source} → {target}: same aspect, full copy");
        return Ok(full_copy);
    }

    let plan = match mode {
        Mode::Fit => SamplingPlan {
            destination: fit_destination(source, target),
            ..full_copy
        },
        Mode::Crop => SamplingPlan {
            source: crop_source(source, target, anchor, offset),
            ..full_copy
        },
    };
    log::trace!(
        "plan {source} → {target} {mode} {anchor}: src {:?} dst {:?}",
        plan.source,
        plan.destination
    );
    Ok(plan)
}

/// Letterbox: scale the whole source into the canvas, centered.
fn fit_destination(source: Size, target: Size) -> Rect {
    let (sw, sh) = (source.width as f64, source.height as f64);
    let (tw, th) = (target.width as f64, target.height as f64);
    if wider_than(source, target) {
        let dh = tw * sh / sw;
        Rect::new(0.0, (th - dh) / 2.0, tw, dh)
    } else {
        let dw = th * sw / sh;
        Rect::new((tw - dw) / 2.0, 0.0, dw, th)
    }
}

/// Fill: trim the source axis that exceeds the target ratio.
fn crop_source(source: Size, target: Size, anchor: Anchor, offset: Offset) -> Rect {
    let (sw, sh) = (source.width as f64, source.height as f64);
    let (tw, th) = (target.width as f64, target.height as f64);
    if wider_than(source, target) {
        let w = sh * tw / th;
        let space = (sw - w).max(0.0);
        let base = anchor.horizontal().place(space);
        let x = clamp_position(base - nan_to_zero(offset.x), space);
        Rect::new(x, 0.0, w, sh)
    } else {
        let h = sw * th / tw;
        let space = (sh - h).max(0.0);
        let base = anchor.vertical().place(space);
        let y = clamp_position(base - nan_to_zero(offset.y), space);
        Rect::new(0.0, y, sw, h)
    }
}

/// Whether `source` is relatively wider than `target`, compared exactly.
fn wider_than(source: Size, target: Size) -> bool {
    source.width as u64 * target.height as u64 > source.height as u64 * target.width as u64
}

/// Clamp into `[0, max]`.
fn clamp_position(v: f64, max: f64) -> f64 {
    v.min(max).max(0.0)
}

/// NaN offsets count as no offset. Infinities clamp like any large value.
fn nan_to_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}
