//! Pointer-drag repositioning of the crop window.
//!
//! Pointer positions arrive in screen space. The canvas is usually displayed
//! at a different size than its raster, so each incremental delta is scaled
//! by `source size / displayed size` before it is added to the [`Offset`].
//!
//! ```text
//!     Idle ──pointer_down (Crop)──▶ Dragging ◀─┐
//!      ▲                              │        │ pointer_move
//!      └──pointer_up / leave / reset──┘────────┘
//! ```

use crate::error::{LayoutError, positive};
use crate::sampling::{Mode, Offset, Size};

/// A pointer position in screen space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen size of the displayed canvas, in screen units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    /// Create a new display size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Drag state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// A drag is in progress; `last` is the previous pointer position.
    Dragging { last: Point },
}

/// Converts pointer drags into source-space offset adjustments.
///
/// Only [`Mode::Crop`] starts a drag. Deltas are incremental: each move is
/// measured from the previous move, not from where the drag began.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragController {
    state: DragState,
    sensitivity: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    /// Idle controller with sensitivity 1 (pointer tracks the image exactly).
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
            sensitivity: 1.0,
        }
    }

    /// Scale every source-space delta by `sensitivity`.
    ///
    /// Non-finite or non-positive values fall back to 1.
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = positive("drag sensitivity", sensitivity).unwrap_or(1.0);
        self
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Configured sensitivity multiplier.
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begin a drag at `at`. Returns `false` (and stays idle) outside Crop mode.
    pub fn pointer_down(&mut self, mode: Mode, at: Point) -> bool {
        if mode != Mode::Crop {
            return false;
        }
        log::trace!("drag start at ({}, {})", at.x, at.y);
        self.state = DragState::Dragging { last: at };
        true
    }

    /// Move the pointer to `at`, accumulating the scaled delta into `offset`.
    ///
    /// Returns `Ok(true)` when the offset changed and the plan should be
    /// recomputed. An invalid `displayed` size is rejected and nothing changes.
    pub fn pointer_move(
        &mut self,
        at: Point,
        source: Size,
        displayed: DisplaySize,
        offset: &mut Offset,
    ) -> Result<bool, LayoutError> {
        let DragState::Dragging { last } = self.state else {
            return Ok(false);
        };
        let display_w = positive("displayed width", displayed.width)?;
        let display_h = positive("displayed height", displayed.height)?;

        let scale_x = source.width as f64 / display_w * self.sensitivity;
        let scale_y = source.height as f64 / display_h * self.sensitivity;
        let dx = (at.x - last.x) * scale_x;
        let dy = (at.y - last.y) * scale_y;

        self.state = DragState::Dragging { last: at };
        if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
            return Ok(false);
        }
        offset.x += dx;
        offset.y += dy;
        log::trace!("drag delta ({dx:.2}, {dy:.2}) → offset ({:.2}, {:.2})", offset.x, offset.y);
        Ok(true)
    }

    /// Release the pointer.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// The pointer left the canvas; same as release.
    pub fn pointer_leave(&mut self) {
        self.state = DragState::Idle;
    }

    /// Abandon any drag in progress.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
