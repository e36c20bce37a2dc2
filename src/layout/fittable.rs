//! Fittable Layout - one child fills whatever its siblings leave over.
//!
//! Children keep their natural size along the layout axis except the first
//! showing child marked `fit`, which is sized explicitly to take the rest of
//! the container's content box. Columns lay out along the width, rows along
//! the height. Horizontal containers honour right-to-left direction, where
//! the first child is rendered rightmost.
//!
//! Containers that opt in with `use_flex` on a platform with native flexbox
//! get flex classes in `flow` and skip measurement entirely. Note that the
//! native path lets several fit children share the space while the manual
//! path only ever sizes one.
//!
//! # Example
//!
//! ```ignore
//! let mut layout = FittableLayout::columns(container, &mut cx);
//! layout.flow(&mut cx);
//! layout.reflow(&mut cx);
//! ```

use log::debug;

use crate::engine::{Document, ElementId};
use crate::style::{classes, px};
use crate::types::Orientation;

use super::context::{Layout, LayoutContext};
use super::geometry::{bounds, computed_box_value, padding_extents};

/// Fittable columns or rows bound to one container.
#[derive(Debug, Clone)]
pub struct FittableLayout {
    container: ElementId,
    orient: Orientation,
    use_flex: bool,
    /// Index of the last resolved fit child.
    fit_index: Option<usize>,
}

impl FittableLayout {
    /// Attach a fittable layout and apply its container classes.
    ///
    /// Whether native flexbox is used is decided here, once.
    pub fn new(container: ElementId, orient: Orientation, cx: &mut LayoutContext<'_>) -> Self {
        let doc = &mut *cx.document;
        let use_flex =
            cx.platform.flex_available() && doc.attrs(container).is_some_and(|a| a.use_flex);

        // An explicitly LTR container inside an RTL document
        let force_ltr = doc.document_rtl() && !doc.is_rtl(container);
        doc.add_remove_class(container, classes::FORCE_LTR, force_ltr);

        if use_flex {
            doc.add_class(container, &flex_layout_class(orient));
        } else {
            doc.add_class(container, fit_layout_class(orient));
        }

        Self {
            container,
            orient,
            use_flex,
            fit_index: None,
        }
    }

    /// Fit child takes the remaining width.
    pub fn columns(container: ElementId, cx: &mut LayoutContext<'_>) -> Self {
        Self::new(container, Orientation::Horizontal, cx)
    }

    /// Fit child takes the remaining height.
    pub fn rows(container: ElementId, cx: &mut LayoutContext<'_>) -> Self {
        Self::new(container, Orientation::Vertical, cx)
    }

    pub fn orient(&self) -> Orientation {
        self.orient
    }

    /// Native flexbox does the fitting; `reflow` is a no-op.
    pub fn uses_flex(&self) -> bool {
        self.use_flex
    }

    /// The child to expand: the cached one while it is still fit and
    /// showing, otherwise the first child that is.
    pub fn resolve_fit_child(&mut self, doc: &Document) -> Option<ElementId> {
        let children = doc.children(self.container);
        let is_fit = |c: ElementId| doc.fit(c) && doc.showing(c);

        if let Some(child) = self.fit_index.and_then(|i| children.get(i).copied())
            && is_fit(child)
        {
            return Some(child);
        }

        self.fit_index = children.iter().position(|&c| is_fit(c));
        self.fit_index.and_then(|i| children.get(i).copied())
    }

    fn should_reverse(&self, doc: &Document, axis: Orientation) -> bool {
        axis.is_horizontal() && doc.is_rtl(self.container)
    }

    /// Size the fit child along `axis`.
    ///
    /// A missing fit child or an unrendered container makes this a no-op.
    pub fn oriented_reflow(&mut self, doc: &mut Document, axis: Orientation) {
        let Some(fit) = self.resolve_fit_child(doc) else {
            debug!("no fit child in {:?}", self.container);
            return;
        };
        if !doc.has_node(self.container) {
            debug!("fittable container {:?} not rendered", self.container);
            return;
        }

        let (before_side, after_side) = axis.sides();
        let padding = padding_extents(doc, self.container);
        let pad_before = padding.side(before_side);
        let client = match axis {
            Orientation::Horizontal => doc.client_width(self.container),
            Orientation::Vertical => doc.client_height(self.container),
        };
        let total = client - (pad_before + padding.side(after_side));

        let fit_bounds = bounds(doc, fit);
        let showing = doc.showing_children(self.container);

        let (before, after) = if self.should_reverse(doc, axis) {
            // Reversed: the last child in document order renders first
            let Some(&first) = showing.last() else { return };
            let after = total - (fit_bounds.start(axis) - pad_before + fit_bounds.extent(axis));
            let first_margin = computed_box_value(doc, first, "margin", before_side);
            let before = if first == fit {
                first_margin
            } else {
                fit_bounds.start(axis) + first_margin - bounds(doc, first).start(axis)
            };
            (before, after)
        } else {
            let Some(&last) = showing.last() else { return };
            let before = fit_bounds.start(axis) - pad_before;
            let last_margin = computed_box_value(doc, last, "margin", after_side);
            let after = if last == fit {
                last_margin
            } else {
                bounds(doc, last).end(axis) + last_margin - fit_bounds.end(axis)
            };
            (before, after)
        };

        let size = (total - before - after).max(0);
        doc.set_style(fit, axis.dimension(), &px(size));
    }
}

fn fit_layout_class(orient: Orientation) -> &'static str {
    match orient {
        Orientation::Horizontal => classes::FITTABLE_COLUMNS,
        Orientation::Vertical => classes::FITTABLE_ROWS,
    }
}

fn flex_layout_class(orient: Orientation) -> String {
    let axis = match orient {
        Orientation::Horizontal => classes::COLUMNS,
        Orientation::Vertical => classes::ROWS,
    };
    format!("{} {axis}", classes::FLEX_CONTAINER)
}

impl Layout for FittableLayout {
    fn container(&self) -> ElementId {
        self.container
    }

    fn flow(&mut self, cx: &mut LayoutContext<'_>) {
        let doc = &mut *cx.document;
        let no_stretch = doc.attrs(self.container).is_some_and(|a| a.no_stretch);
        doc.add_remove_class(self.container, classes::STRETCH, !no_stretch);

        if self.use_flex {
            doc.add_class(self.container, &flex_layout_class(self.orient));
            doc.add_remove_class(self.container, classes::NO_STRETCH, no_stretch);
            for child in doc.children(self.container).to_vec() {
                doc.add_class(child, classes::FLEX_ITEM);
                let fit = doc.fit(child);
                doc.add_remove_class(child, classes::FLEX, fit);
            }
        }
    }

    fn reflow(&mut self, cx: &mut LayoutContext<'_>) {
        if !self.use_flex {
            self.oriented_reflow(cx.document, self.orient);
        }
    }
}
