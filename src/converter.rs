//! Caller-owned converter state.
//!
//! [`Converter`] holds everything an interactive resize tool edits: the
//! loaded source size, target dimensions, ratio, mode, anchor, manual offset,
//! drag state, and background fill. Each event handler calls one method;
//! plans are computed fresh from current fields on every [`Converter::plan`]
//! call and never cached.
//!
//! Changing the image, the target dimensions, or the mode resets the offset
//! to zero, the anchor to center, and cancels any drag. Rejected edits leave
//! every field untouched.
//!
//! # Example
//!
//! ```
//! use zenaspect::{Converter, Mode, Rect, Size};
//!
//! let mut c = Converter::default();
//! c.load_source(Size::new(1000, 500)).unwrap();
//! c.set_ratio_str("1:1").unwrap();
//! c.set_width(500.0).unwrap();
//! c.set_mode(Mode::Crop);
//!
//! let plan = c.plan().unwrap();
//! assert_eq!(plan.source, Rect::new(250.0, 0.0, 500.0, 500.0));
//! ```

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{format, string::String};

use crate::color::CanvasColor;
use crate::drag::{DisplaySize, DragController, Point};
use crate::error::{LayoutError, positive};
use crate::ratio::{self, Ratio};
use crate::sampling::{self, Anchor, Mode, Offset, SamplingPlan, Size};

/// Interactive resize/crop state.
#[derive(Clone, Debug, PartialEq)]
pub struct Converter {
    source: Option<Size>,
    target: Size,
    ratio: Ratio,
    mode: Mode,
    anchor: Anchor,
    offset: Offset,
    drag: DragController,
    background: CanvasColor,
}

impl Default for Converter {
    /// 1920×1080 at 16:9, Fit mode, white background.
    fn default() -> Self {
        Self {
            source: None,
            target: Size::new(1920, 1080),
            ratio: Ratio::new(16.0, 9.0),
            mode: Mode::Fit,
            anchor: Anchor::Center,
            offset: Offset::ZERO,
            drag: DragController::new(),
            background: CanvasColor::white(),
        }
    }
}

impl Converter {
    /// Start from explicit target dimensions; the ratio is derived from them.
    pub fn new(target: Size) -> Result<Self, LayoutError> {
        let ratio = ratio::solve_ratio(target.width, target.height)?;
        Ok(Self {
            target,
            ratio,
            ..Self::default()
        })
    }

    /// Replace the drag controller, e.g. to set a sensitivity.
    pub fn with_drag(mut self, drag: DragController) -> Self {
        self.drag = drag;
        self
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Natural size of the loaded image, if any.
    pub fn source(&self) -> Option<Size> {
        self.source
    }

    /// Target canvas dimensions.
    pub fn target(&self) -> Size {
        self.target
    }

    /// Current ratio, as entered (not reduced).
    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    /// Fit or Crop.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Base position of the crop window.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Manual offset layered on the anchor, in source pixels.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// The pointer-drag state machine.
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Letterbox fill color.
    pub fn background(&self) -> CanvasColor {
        self.background
    }

    /// Whether pointer dragging is currently possible.
    pub fn drag_enabled(&self) -> bool {
        self.mode == Mode::Crop && self.source.is_some()
    }

    // ── Source image ────────────────────────────────────────────────────

    /// A new image was decoded. Replaces any previous one.
    pub fn load_source(&mut self, natural: Size) -> Result<(), LayoutError> {
        positive("source width", natural.width as f64)?;
        positive("source height", natural.height as f64)?;
        log::debug!("source loaded: {natural}");
        self.source = Some(natural);
        self.reset_framing();
        Ok(())
    }

    /// The image was removed.
    pub fn clear_source(&mut self) {
        log::debug!("source cleared");
        self.source = None;
        self.reset_framing();
    }

    // ── Target dimensions and ratio ─────────────────────────────────────

    /// Set the width; the height follows from the current ratio.
    pub fn set_width(&mut self, width: f64) -> Result<(), LayoutError> {
        let width = positive("width", width).inspect_err(warn_rejected)?;
        let whole = ratio::round_px("width", width).inspect_err(warn_rejected)?;
        let height = ratio::solve_height(width, self.ratio.w, self.ratio.h)
            .inspect_err(warn_rejected)?;
        self.apply_target(Size::new(whole, height));
        Ok(())
    }

    /// Set the height; the width follows from the current ratio.
    pub fn set_height(&mut self, height: f64) -> Result<(), LayoutError> {
        let height = positive("height", height).inspect_err(warn_rejected)?;
        let whole = ratio::round_px("height", height).inspect_err(warn_rejected)?;
        let width = ratio::solve_width(height, self.ratio.w, self.ratio.h)
            .inspect_err(warn_rejected)?;
        self.apply_target(Size::new(width, whole));
        Ok(())
    }

    /// Set both dimensions; the ratio becomes their reduced quotient.
    pub fn set_target(&mut self, target: Size) -> Result<(), LayoutError> {
        let ratio = ratio::solve_ratio(target.width, target.height).inspect_err(warn_rejected)?;
        self.ratio = ratio;
        self.apply_target(target);
        Ok(())
    }

    /// Change the ratio. The width is kept and the height re-derived.
    pub fn set_ratio(&mut self, ratio: Ratio) -> Result<(), LayoutError> {
        let ratio = Ratio::checked(ratio.w, ratio.h).inspect_err(warn_rejected)?;
        let height = ratio::solve_ratio_change(self.target.width as f64, ratio.w, ratio.h)
            .inspect_err(warn_rejected)?;
        self.ratio = ratio;
        self.apply_target(Size::new(self.target.width, height));
        Ok(())
    }

    /// Change the ratio from user text such as `"16:9"` or `"2.35:1"`.
    pub fn set_ratio_str(&mut self, text: &str) -> Result<(), LayoutError> {
        let ratio: Ratio = text.parse().inspect_err(warn_rejected)?;
        self.set_ratio(ratio)
    }

    /// Select one of [`ratio::PRESETS`] by label.
    pub fn select_preset(&mut self, label: &str) -> Result<(), LayoutError> {
        let preset = ratio::preset(label).ok_or(LayoutError::Unparseable { field: "preset" })?;
        self.set_ratio(preset.ratio)
    }

    /// Adopt the loaded image's own aspect ratio.
    pub fn match_source_ratio(&mut self) -> Result<(), LayoutError> {
        let source = self.source.ok_or(LayoutError::NoSourceImage)?;
        let ratio = ratio::solve_ratio(source.width, source.height)?;
        self.set_ratio(ratio)
    }

    /// The current ratio in lowest terms, for display.
    pub fn simplified_ratio(&self) -> Ratio {
        self.ratio.reduced()
    }

    // ── Mode, anchor, offset, background ────────────────────────────────

    /// Switch between Fit and Crop. A real change resets the framing.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        log::debug!("mode {} → {mode}", self.mode);
        self.mode = mode;
        self.reset_framing();
    }

    /// Pick the default crop window position. Clears any manual offset.
    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
        self.offset = Offset::ZERO;
    }

    /// Set the manual offset directly. Ignored outside Crop mode.
    pub fn set_offset(&mut self, offset: Offset) -> bool {
        if self.mode != Mode::Crop {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Change the letterbox fill. Does not affect framing.
    pub fn set_background(&mut self, color: CanvasColor) {
        self.background = color;
    }

    // ── Pointer events ──────────────────────────────────────────────────

    /// Returns whether a drag started.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        self.source.is_some() && self.drag.pointer_down(self.mode, at)
    }

    /// Returns whether the offset changed (the plan should be redrawn).
    pub fn pointer_move(&mut self, at: Point, displayed: DisplaySize) -> Result<bool, LayoutError> {
        let Some(source) = self.source else {
            return Ok(false);
        };
        self.drag.pointer_move(at, source, displayed, &mut self.offset)
    }

    /// Release the pointer, ending any drag.
    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    /// The pointer left the canvas; ends any drag.
    pub fn pointer_leave(&mut self) {
        self.drag.pointer_leave();
    }

    // ── Output ──────────────────────────────────────────────────────────

    /// Compute the sampling plan from the current state.
    pub fn plan(&self) -> Result<SamplingPlan, LayoutError> {
        let source = self.source.ok_or(LayoutError::NoSourceImage)?;
        sampling::plan(source, self.target, self.mode, self.anchor, self.offset)
    }

    /// Download file name: `resized-{W}x{H}.{ext}`.
    #[cfg(feature = "alloc")]
    pub fn export_filename(&self, ext: &str) -> String {
        format!(
            "resized-{}x{}.{}",
            self.target.width,
            self.target.height,
            ext.trim_start_matches('.')
        )
    }

    fn apply_target(&mut self, target: Size) {
        if target != self.target {
            log::debug!("target {} → {target}", self.target);
            self.target = target;
            self.reset_framing();
        }
    }

    fn reset_framing(&mut self) {
        self.offset = Offset::ZERO;
        self.anchor = Anchor::Center;
        self.drag.reset();
    }
}

fn warn_rejected(e: &LayoutError) {
    log::warn!("edit rejected: {e}");
}
