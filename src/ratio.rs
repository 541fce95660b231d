//! Ratio solving: derive the missing side of a `width:height = w:h` relation.
//!
//! Editing is width-anchored. When the ratio changes, the width is kept and
//! the height is re-derived; never the other way around.
//!
//! # Example
//!
//! ```
//! use zenaspect::ratio::{self, Ratio};
//!
//! assert_eq!(ratio::solve_height(1920.0, 16.0, 9.0).unwrap(), 1080);
//! assert_eq!(ratio::solve_width(1080.0, 16.0, 9.0).unwrap(), 1920);
//! assert_eq!(ratio::reduce(1920, 1080), (16, 9));
//!
//! let r: Ratio = "21:9".parse().unwrap();
//! assert_eq!(r.quotient(), 21.0 / 9.0);
//! ```

use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::Float;

use crate::error::{LayoutError, positive};

/// A width-to-height proportion. Need not be in lowest terms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ratio {
    /// Width component.
    pub w: f64,
    /// Height component.
    pub h: f64,
}

impl Ratio {
    /// Create a ratio without validation.
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// Create a ratio, rejecting zero, negative, and non-finite components.
    pub fn checked(w: f64, h: f64) -> Result<Self, LayoutError> {
        check_components(w, h)?;
        Ok(Self { w, h })
    }

    /// The quotient `w / h`. This is the only value solving depends on.
    pub fn quotient(&self) -> f64 {
        self.w / self.h
    }

    /// Lowest terms when both components are whole numbers, otherwise `self`.
    ///
    /// Display only; solving always uses the unreduced components.
    pub fn reduced(&self) -> Self {
        match (as_whole(self.w), as_whole(self.h)) {
            (Some(w), Some(h)) => {
                let (w, h) = reduce(w, h);
                Self::new(w as f64, h as f64)
            }
            _ => *self,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (as_whole(self.w), as_whole(self.h)) {
            (Some(w), Some(h)) => write!(f, "{w}:{h}"),
            _ => write!(f, "{}:{}", self.w, self.h),
        }
    }
}

impl FromStr for Ratio {
    type Err = LayoutError;

    /// Parse `w:h` or `w/h`, e.g. `16:9`, `2.35 : 1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .or_else(|| s.split_once('/'))
            .ok_or(LayoutError::Unparseable { field: "ratio" })?;
        let w: f64 = w
            .trim()
            .parse()
            .map_err(|_| LayoutError::Unparseable { field: "ratio" })?;
        let h: f64 = h
            .trim()
            .parse()
            .map_err(|_| LayoutError::Unparseable { field: "ratio" })?;
        Self::checked(w, h)
    }
}

/// A named entry in the ratio selector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RatioPreset {
    /// Label shown to the user, e.g. `"16:9"`.
    pub label: &'static str,
    /// The ratio it selects.
    pub ratio: Ratio,
}

/// Built-in presets, in selector order.
pub const PRESETS: &[RatioPreset] = &[
    RatioPreset {
        label: "1:1",
        ratio: Ratio::new(1.0, 1.0),
    },
    RatioPreset {
        label: "16:9",
        ratio: Ratio::new(16.0, 9.0),
    },
    RatioPreset {
        label: "4:3",
        ratio: Ratio::new(4.0, 3.0),
    },
    RatioPreset {
        label: "5:4",
        ratio: Ratio::new(5.0, 4.0),
    },
    RatioPreset {
        label: "3:2",
        ratio: Ratio::new(3.0, 2.0),
    },
    RatioPreset {
        label: "9:16",
        ratio: Ratio::new(9.0, 16.0),
    },
    RatioPreset {
        label: "21:9",
        ratio: Ratio::new(21.0, 9.0),
    },
];

/// Look up a preset by its label.
pub fn preset(label: &str) -> Option<&'static RatioPreset> {
    let label = label.trim();
    PRESETS.iter().find(|p| p.label == label)
}

/// Height matching `width` at `ratio_w:ratio_h`, rounded to whole pixels.
pub fn solve_height(width: f64, ratio_w: f64, ratio_h: f64) -> Result<u32, LayoutError> {
    let width = positive("width", width)?;
    check_components(ratio_w, ratio_h)?;
    round_px("height", width * ratio_h / ratio_w)
}

/// Width matching `height` at `ratio_w:ratio_h`, rounded to whole pixels.
pub fn solve_width(height: f64, ratio_w: f64, ratio_h: f64) -> Result<u32, LayoutError> {
    let height = positive("height", height)?;
    check_components(ratio_w, ratio_h)?;
    round_px("width", height * ratio_w / ratio_h)
}

/// New height after the ratio itself changes. The width is held constant.
pub fn solve_ratio_change(
    current_width: f64,
    new_ratio_w: f64,
    new_ratio_h: f64,
) -> Result<u32, LayoutError> {
    solve_height(current_width, new_ratio_w, new_ratio_h)
}

/// Ratio of two known pixel dimensions, in lowest terms.
pub fn solve_ratio(width: u32, height: u32) -> Result<Ratio, LayoutError> {
    positive("width", width as f64)?;
    positive("height", height as f64)?;
    let (w, h) = reduce(width as u64, height as u64);
    Ok(Ratio::new(w as f64, h as f64))
}

/// Greatest common divisor (Euclid). `gcd(a, 0) == a`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Reduce `w:h` to lowest terms. `(0, 0)` is returned unchanged.
pub fn reduce(w: u64, h: u64) -> (u64, u64) {
    match gcd(w, h) {
        0 => (w, h),
        g => (w / g, h / g),
    }
}

fn check_components(ratio_w: f64, ratio_h: f64) -> Result<(), LayoutError> {
    if ratio_w == 0.0 {
        return Err(LayoutError::DivisionByZero {
            field: "ratio width",
        });
    }
    if ratio_h == 0.0 {
        return Err(LayoutError::DivisionByZero {
            field: "ratio height",
        });
    }
    positive("ratio width", ratio_w)?;
    positive("ratio height", ratio_h)?;
    Ok(())
}

/// Round to a whole pixel count, never below 1.
///
/// Counts that do not fit in a `u32` are rejected rather than saturated,
/// so a solved dimension always keeps the requested proportion.
pub(crate) fn round_px(field: &'static str, v: f64) -> Result<u32, LayoutError> {
    let px = v.round().max(1.0);
    if px > u32::MAX as f64 {
        return Err(LayoutError::invalid(field, v));
    }
    Ok(px as u32)
}

/// `Some(n)` when `v` is a non-negative whole number exactly representable as `u64`.
fn as_whole(v: f64) -> Option<u64> {
    if !(0.0..9_007_199_254_740_992.0).contains(&v) {
        return None;
    }
    let n = v as u64;
    (n as f64 == v).then_some(n)
}
