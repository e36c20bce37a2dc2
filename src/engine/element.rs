//! Element - one node of the document tree.
//!
//! Elements are not objects the layouts hold on to. They are slots in the
//! document's arena, addressed by [`ElementId`]; everything a layout needs is
//! read and written through the [`Document`](super::Document).

use crate::types::{FlexWeight, Pack};

/// Index of an element in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

/// Layout attributes the widget framework exposes on every control.
///
/// These are the "published properties" the layout engines consult; they are
/// not styles and never appear in computed style.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutAttrs {
    /// Whether the element is displayed at all.
    pub showing: bool,
    /// Fittable: this child takes the remaining space.
    pub fit: bool,
    /// Flex: weight of this child.
    pub flex: FlexWeight,
    /// Explicit direction; `None` inherits the document direction.
    pub rtl: Option<bool>,
    /// Container opts in to native flexbox when available.
    pub use_flex: bool,
    /// Container opts out of stretching children across the cross axis.
    pub no_stretch: bool,
    /// Flex: main-axis packing override.
    pub pack: Option<Pack>,
    /// Flex: cross-axis alignment override.
    pub align: Option<Pack>,
}

impl Default for LayoutAttrs {
    fn default() -> Self {
        Self {
            showing: true,
            fit: false,
            flex: FlexWeight::Unset,
            rtl: None,
            use_flex: false,
            no_stretch: false,
            pack: None,
            align: None,
        }
    }
}

/// A node in the document arena.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) classes: Vec<String>,
    /// Inline styles in insertion order, longhands only.
    pub(crate) styles: Vec<(String, String)>,
    pub(crate) content: String,
    /// Natural size of replaced/measured content (width, height).
    pub(crate) intrinsic: Option<(f32, f32)>,
    pub(crate) scroll: (i32, i32),
    pub(crate) attrs: LayoutAttrs,
}

impl Element {
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn attrs(&self) -> &LayoutAttrs {
        &self.attrs
    }

    /// Inline value of a longhand property.
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Inline styles serialized as `name: value; ...`.
    pub fn css_text(&self) -> String {
        self.styles
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
