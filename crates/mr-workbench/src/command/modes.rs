//! Command variants and their keyboard mapping
//!
//! Each command that has variants takes an explicit mode. Hosts that
//! drive variants from modifier keys convert a [`Modifiers`] snapshot; the
//! conversions compare the exact key combination, so any extra key falls
//! back to the default variant.

use serde::{Deserialize, Serialize};

/// Modifier keys held when a command was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Control key
    pub ctrl: bool,
    /// Shift key
    pub shift: bool,
    /// Alt key
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Self = Self::new(false, false, false);
    /// Control only
    pub const CTRL: Self = Self::new(true, false, false);
    /// Shift only
    pub const SHIFT: Self = Self::new(false, true, false);
    /// Alt only
    pub const ALT: Self = Self::new(false, false, true);
    /// Control and Shift
    pub const CTRL_SHIFT: Self = Self::new(true, true, false);
    /// Shift and Alt
    pub const SHIFT_ALT: Self = Self::new(false, true, true);

    /// Create a modifier set
    pub const fn new(ctrl: bool, shift: bool, alt: bool) -> Self {
        Self { ctrl, shift, alt }
    }
}

/// Variants of the line command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineMode {
    /// Create the line only
    #[default]
    Line,
    /// Create the line and a point at its midpoint
    LineAndMidpoint,
    /// Create only the midpoint
    MidpointOnly,
}

impl LineMode {
    /// Whether the line itself is created
    pub fn creates_line(self) -> bool {
        !matches!(self, LineMode::MidpointOnly)
    }

    /// Whether a midpoint is created
    pub fn creates_midpoint(self) -> bool {
        !matches!(self, LineMode::Line)
    }
}

impl From<Modifiers> for LineMode {
    fn from(modifiers: Modifiers) -> Self {
        match modifiers {
            Modifiers::CTRL => LineMode::LineAndMidpoint,
            Modifiers::CTRL_SHIFT => LineMode::MidpointOnly,
            _ => LineMode::Line,
        }
    }
}

/// Variants of the circle and arc commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CenterMode {
    /// Create the curve only
    #[default]
    Curve,
    /// Create the curve and a point at its center
    CurveAndCenter,
    /// Create only the center point
    CenterOnly,
}

impl CenterMode {
    /// Whether the curve itself is created
    pub fn creates_curve(self) -> bool {
        !matches!(self, CenterMode::CenterOnly)
    }

    /// Whether a center point is created
    pub fn creates_center(self) -> bool {
        !matches!(self, CenterMode::Curve)
    }
}

impl From<Modifiers> for CenterMode {
    fn from(modifiers: Modifiers) -> Self {
        match modifiers {
            Modifiers::CTRL => CenterMode::CurveAndCenter,
            Modifiers::CTRL_SHIFT => CenterMode::CenterOnly,
            _ => CenterMode::Curve,
        }
    }
}

/// Variants of the polygon and B-spline commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathMode {
    /// Points in selection order, closed back to the first
    #[default]
    Closed,
    /// Points in selection order, left open
    Open,
    /// Points in nearest-neighbor order, closed back to the first
    SortedClosed,
    /// Points in nearest-neighbor order, left open
    SortedOpen,
}

impl PathMode {
    /// Whether the path returns to its first point
    pub fn is_closed(self) -> bool {
        matches!(self, PathMode::Closed | PathMode::SortedClosed)
    }

    /// Whether points are reordered by nearest neighbor
    pub fn is_sorted(self) -> bool {
        matches!(self, PathMode::SortedClosed | PathMode::SortedOpen)
    }

    /// Mode for the polygon command
    ///
    /// Shift leaves the polygon open, Alt sorts the points.
    pub fn for_polygon(modifiers: Modifiers) -> Self {
        match modifiers {
            Modifiers::SHIFT => PathMode::Open,
            Modifiers::ALT => PathMode::SortedClosed,
            Modifiers::SHIFT_ALT => PathMode::SortedOpen,
            _ => PathMode::Closed,
        }
    }

    /// Mode for the B-spline command
    ///
    /// Same as the polygon mapping except that Shift alone also sorts.
    pub fn for_bspline(modifiers: Modifiers) -> Self {
        match modifiers {
            Modifiers::SHIFT | Modifiers::SHIFT_ALT => PathMode::SortedOpen,
            Modifiers::ALT => PathMode::SortedClosed,
            _ => PathMode::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_mode_mapping() {
        assert_eq!(LineMode::from(Modifiers::NONE), LineMode::Line);
        assert_eq!(LineMode::from(Modifiers::CTRL), LineMode::LineAndMidpoint);
        assert_eq!(LineMode::from(Modifiers::CTRL_SHIFT), LineMode::MidpointOnly);
        // Extra keys fall back to the default
        assert_eq!(LineMode::from(Modifiers::new(true, false, true)), LineMode::Line);
    }

    #[test]
    fn test_line_mode_outputs() {
        assert!(LineMode::Line.creates_line());
        assert!(!LineMode::Line.creates_midpoint());
        assert!(LineMode::LineAndMidpoint.creates_line());
        assert!(LineMode::LineAndMidpoint.creates_midpoint());
        assert!(!LineMode::MidpointOnly.creates_line());
        assert!(LineMode::MidpointOnly.creates_midpoint());
    }

    #[test]
    fn test_center_mode_mapping() {
        assert_eq!(CenterMode::from(Modifiers::NONE), CenterMode::Curve);
        assert_eq!(CenterMode::from(Modifiers::CTRL), CenterMode::CurveAndCenter);
        assert_eq!(CenterMode::from(Modifiers::CTRL_SHIFT), CenterMode::CenterOnly);
        assert_eq!(CenterMode::from(Modifiers::SHIFT), CenterMode::Curve);

        assert!(!CenterMode::Curve.creates_center());
        assert!(!CenterMode::CenterOnly.creates_curve());
    }

    #[test]
    fn test_polygon_mode_mapping() {
        assert_eq!(PathMode::for_polygon(Modifiers::NONE), PathMode::Closed);
        assert_eq!(PathMode::for_polygon(Modifiers::SHIFT), PathMode::Open);
        assert_eq!(PathMode::for_polygon(Modifiers::ALT), PathMode::SortedClosed);
        assert_eq!(PathMode::for_polygon(Modifiers::SHIFT_ALT), PathMode::SortedOpen);
        assert_eq!(PathMode::for_polygon(Modifiers::CTRL), PathMode::Closed);
    }

    #[test]
    fn test_bspline_mode_mapping() {
        assert_eq!(PathMode::for_bspline(Modifiers::NONE), PathMode::Closed);
        assert_eq!(PathMode::for_bspline(Modifiers::SHIFT), PathMode::SortedOpen);
        assert_eq!(PathMode::for_bspline(Modifiers::ALT), PathMode::SortedClosed);
        assert_eq!(PathMode::for_bspline(Modifiers::SHIFT_ALT), PathMode::SortedOpen);
    }

    #[test]
    fn test_path_mode_flags() {
        assert!(PathMode::Closed.is_closed() && !PathMode::Closed.is_sorted());
        assert!(!PathMode::Open.is_closed() && !PathMode::Open.is_sorted());
        assert!(PathMode::SortedClosed.is_closed() && PathMode::SortedClosed.is_sorted());
        assert!(!PathMode::SortedOpen.is_closed() && PathMode::SortedOpen.is_sorted());
    }
}
