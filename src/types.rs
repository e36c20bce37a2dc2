//! Core types for spark-layouts.
//!
//! Geometry and attribute types shared by the document, the render pass and
//! the layout engines. All lengths are whole CSS pixels.

use std::fmt;

// =============================================================================
// Orientation
// =============================================================================

/// Primary axis of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Orientation {
    /// Children flow left to right (columns).
    #[default]
    Horizontal,
    /// Children flow top to bottom (rows).
    Vertical,
}

impl Orientation {
    /// Legacy box-orient keyword.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// CSS size property along this axis.
    pub const fn dimension(self) -> &'static str {
        match self {
            Self::Horizontal => "width",
            Self::Vertical => "height",
        }
    }

    /// CSS size property across this axis.
    pub const fn cross_dimension(self) -> &'static str {
        match self {
            Self::Horizontal => "height",
            Self::Vertical => "width",
        }
    }

    /// Leading and trailing edges along this axis.
    pub const fn sides(self) -> (Side, Side) {
        match self {
            Self::Horizontal => (Side::Left, Side::Right),
            Self::Vertical => (Side::Top, Side::Bottom),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

// =============================================================================
// Side
// =============================================================================

/// One edge of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Suffix used by longhand properties (`margin-left`, ...).
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

// =============================================================================
// Pack / Align
// =============================================================================

/// Legacy box pack/align keyword.
///
/// The same keyword set is used for both `box-pack` (main axis) and
/// `box-align` (cross axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Pack {
    #[default]
    Start,
    Center,
    End,
    Baseline,
    Stretch,
}

impl Pack {
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Baseline => "baseline",
            Self::Stretch => "stretch",
        }
    }

    /// Parse a keyword, accepting both legacy and modern spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "start" | "flex-start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" | "flex-end" => Some(Self::End),
            "baseline" => Some(Self::Baseline),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }
}

impl fmt::Display for Pack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

// =============================================================================
// Flex weight
// =============================================================================

/// The `flex` attribute of a child.
///
/// `Flag(true)` stands for "flexible with the default weight"; the concrete
/// number comes from [`LayoutConfig::default_flex`](crate::LayoutConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWeight {
    #[default]
    Unset,
    Flag(bool),
    Weight(u32),
}

impl From<bool> for FlexWeight {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<u32> for FlexWeight {
    fn from(value: u32) -> Self {
        Self::Weight(value)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A rectangle relative to the document (or to an offset parent).
///
/// `bottom` and `right` are distances from the document's bottom/right edges,
/// matching what absolute positioning would need to pin the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Leading edge along an axis.
    pub const fn start(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    /// Extent along an axis.
    pub const fn extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Trailing edge along an axis (`start + extent`).
    pub const fn end(&self, orientation: Orientation) -> i32 {
        self.start(orientation) + self.extent(orientation)
    }
}

/// Per-side pixel values (padding extents, borders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    pub const fn side(&self, side: Side) -> i32 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Summed margin, border and padding along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxSums {
    pub margin: i32,
    pub border: i32,
    pub padding: i32,
}

impl BoxSums {
    /// Everything that sits outside the content box along this axis.
    pub const fn offset(&self) -> i32 {
        self.margin + self.border + self.padding
    }
}

/// Box-model sums for both axes of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SumStyles {
    /// Left + right.
    pub h: BoxSums,
    /// Top + bottom.
    pub v: BoxSums,
}

impl SumStyles {
    /// Sums along the given axis.
    pub const fn along(&self, orientation: Orientation) -> BoxSums {
        match orientation {
            Orientation::Horizontal => self.h,
            Orientation::Vertical => self.v,
        }
    }

    /// Sums across the given axis.
    pub const fn across(&self, orientation: Orientation) -> BoxSums {
        match orientation {
            Orientation::Horizontal => self.v,
            Orientation::Vertical => self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_names() {
        assert_eq!(Orientation::Horizontal.dimension(), "width");
        assert_eq!(Orientation::Vertical.dimension(), "height");
        assert_eq!(Orientation::Horizontal.cross_dimension(), "height");
        assert_eq!(Orientation::Vertical.sides(), (Side::Top, Side::Bottom));
    }

    #[test]
    fn test_pack_parse() {
        assert_eq!(Pack::parse("flex-start"), Some(Pack::Start));
        assert_eq!(Pack::parse(" end "), Some(Pack::End));
        assert_eq!(Pack::parse("justify"), None);
        assert_eq!(Pack::Stretch.to_string(), "stretch");
    }

    #[test]
    fn test_box_sums_offset() {
        let sums = BoxSums { margin: 4, border: 2, padding: 6 };
        assert_eq!(sums.offset(), 12);

        let styles = SumStyles { h: sums, v: BoxSums::default() };
        assert_eq!(styles.along(Orientation::Horizontal).offset(), 12);
        assert_eq!(styles.across(Orientation::Horizontal).offset(), 0);
    }

    #[test]
    fn test_bounds_axis_accessors() {
        let b = Bounds { top: 5, left: 10, width: 30, height: 20, ..Default::default() };
        assert_eq!(b.end(Orientation::Horizontal), 40);
        assert_eq!(b.end(Orientation::Vertical), 25);
    }
}
