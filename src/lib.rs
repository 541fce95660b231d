//! Aspect-ratio resize and crop planning.
//!
//! Pure geometry at the core: no pixel operations, `no_std` compatible.
//! Given a source image size and target dimensions, compute which source
//! rectangle to read and which canvas rectangle to write.
//!
//! # Modules
//!
//! - [`ratio`]: dimension/ratio solving, GCD reduction, ratio presets
//! - [`sampling`]: Fit (letterbox) and Crop (fill) sampling plans, anchors, offsets
//! - [`drag`]: pointer-drag repositioning of the crop window
//! - [`converter`]: caller-owned editing state with reset rules
//! - [`color`]: canvas background color
//! - `svg`: plan visualization (feature `svg`)
//! - `render`: executing plans with the `image` crate (feature `render`)
//!
//! # Example
//!
//! ```
//! use zenaspect::{Anchor, Mode, Rect, Size, Target};
//!
//! let plan = Target::new(Mode::Crop, 500, 500)
//!     .anchor(Anchor::Left)
//!     .plan(Size::new(1000, 500))
//!     .unwrap();
//! assert_eq!(plan.source, Rect::new(0.0, 0.0, 500.0, 500.0));
//! assert_eq!(plan.destination, Rect::new(0.0, 0.0, 500.0, 500.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod color;
pub mod converter;
pub mod drag;
pub mod error;
pub mod ratio;
pub mod sampling;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "render")]
pub mod render;

pub use color::CanvasColor;
pub use converter::Converter;
pub use drag::{DisplaySize, DragController, DragState, Point};
pub use error::LayoutError;
pub use ratio::{PRESETS, Ratio, RatioPreset};
pub use sampling::{
    Align, Anchor, Axis, Mode, Offset, PixelRect, Rect, SamplingPlan, Size, Target, plan,
};
