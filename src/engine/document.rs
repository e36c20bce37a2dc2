//! Document - the element arena and its rendered geometry.
//!
//! Stands in for the DOM: it owns every element, resolves computed styles
//! from inline styles plus the class stylesheet, and answers measurement
//! queries (`offset_*`, `client_*`) from a render pass that runs lazily the
//! first time geometry is read after a mutation, the way a browser forces a
//! synchronous layout.
//!
//! # Example
//!
//! ```ignore
//! use spark_layouts::Document;
//!
//! let mut doc = Document::new(800, 600);
//! let row = doc.create_element();
//! doc.append_child(doc.body(), row);
//! doc.set_style(row, "height", "40px");
//! assert_eq!(doc.offset_width(row), 800);
//! ```

use std::cell::RefCell;

use log::trace;

use crate::config::GLYPH_SIZE;
use crate::layout::render::{self, RenderBox, RenderedTree};
use crate::style::{StyleSheet, expand_shorthand, px};
use crate::types::{FlexWeight, Pack};

use super::element::{Element, ElementId, LayoutAttrs};

/// The element tree plus its stylesheet and render cache.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    body: ElementId,
    sheet: StyleSheet,
    rtl: bool,
    glyph_size: (f32, f32),
    /// Geometry of the last render; `None` once anything that affects layout changes.
    rendered: RefCell<Option<RenderedTree>>,
}

impl Document {
    /// Create a document whose body has the given viewport size.
    pub fn new(width: i32, height: i32) -> Self {
        let mut body = Element::default();
        body.styles.push(("width".to_string(), px(width)));
        body.styles.push(("height".to_string(), px(height)));

        Self {
            elements: vec![body],
            body: ElementId(0),
            sheet: StyleSheet::framework(),
            rtl: false,
            glyph_size: GLYPH_SIZE,
            rendered: RefCell::new(None),
        }
    }

    /// Replace the class stylesheet.
    pub fn with_stylesheet(mut self, sheet: StyleSheet) -> Self {
        self.sheet = sheet;
        self.invalidate();
        self
    }

    /// The root element; every rendered element descends from it.
    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn stylesheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn stylesheet_mut(&mut self) -> &mut StyleSheet {
        self.invalidate();
        &mut self.sheet
    }

    pub(crate) fn set_glyph_size(&mut self, size: (f32, f32)) {
        self.glyph_size = size;
        self.invalidate();
    }

    pub(crate) fn glyph_size(&self) -> (f32, f32) {
        self.glyph_size
    }

    /// Drop cached geometry.
    fn invalidate(&mut self) {
        *self.rendered.get_mut() = None;
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Allocate a detached element.
    pub fn create_element(&mut self) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::default());
        id
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns false if either id is unknown or the move would create a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.contains(parent) || !self.contains(child) || self.is_ancestor(child, parent) {
            return false;
        }

        if let Some(old_parent) = self.elements[child.0].parent {
            self.elements[old_parent.0].children.retain(|c| *c != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
        self.invalidate();
        true
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_ancestor(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.elements[id.0].parent;
        }
        false
    }

    pub fn contains(&self, id: ElementId) -> bool {
        id.0 < self.elements.len()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.parent)
    }

    /// Children in document order (empty for unknown ids).
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Children whose `showing` attribute is set.
    pub fn showing_children(&self, id: ElementId) -> Vec<ElementId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.showing(c))
            .collect()
    }

    /// Whether the element is connected to the body, i.e. has a rendered node.
    pub fn has_node(&self, id: ElementId) -> bool {
        self.contains(id) && self.is_ancestor(self.body, id)
    }

    // =========================================================================
    // Layout attributes
    // =========================================================================

    pub fn attrs(&self, id: ElementId) -> Option<&LayoutAttrs> {
        self.get(id).map(|e| &e.attrs)
    }

    /// Mutable attributes. Cached geometry is dropped since `showing` and
    /// `rtl` affect rendering.
    pub fn attrs_mut(&mut self, id: ElementId) -> Option<&mut LayoutAttrs> {
        self.invalidate();
        self.elements.get_mut(id.0).map(|e| &mut e.attrs)
    }

    pub fn showing(&self, id: ElementId) -> bool {
        self.attrs(id).is_some_and(|a| a.showing)
    }

    /// Show or hide an element. Returns true if the value changed.
    pub fn set_showing(&mut self, id: ElementId, showing: bool) -> bool {
        match self.elements.get_mut(id.0) {
            Some(e) if e.attrs.showing != showing => {
                e.attrs.showing = showing;
                self.invalidate();
                true
            }
            _ => false,
        }
    }

    pub fn fit(&self, id: ElementId) -> bool {
        self.attrs(id).is_some_and(|a| a.fit)
    }

    pub fn set_fit(&mut self, id: ElementId, fit: bool) {
        if let Some(attrs) = self.attrs_mut(id) {
            attrs.fit = fit;
        }
    }

    pub fn flex(&self, id: ElementId) -> FlexWeight {
        self.attrs(id).map(|a| a.flex).unwrap_or_default()
    }

    pub fn set_flex(&mut self, id: ElementId, flex: impl Into<FlexWeight>) {
        if let Some(attrs) = self.attrs_mut(id) {
            attrs.flex = flex.into();
        }
    }

    pub fn pack(&self, id: ElementId) -> Option<Pack> {
        self.attrs(id).and_then(|a| a.pack)
    }

    pub fn align(&self, id: ElementId) -> Option<Pack> {
        self.attrs(id).and_then(|a| a.align)
    }

    /// Document-wide direction.
    pub fn document_rtl(&self) -> bool {
        self.rtl
    }

    pub fn set_document_rtl(&mut self, rtl: bool) {
        self.rtl = rtl;
        self.invalidate();
    }

    /// Effective direction of an element: its own override or the document's.
    pub fn is_rtl(&self, id: ElementId) -> bool {
        self.attrs(id).and_then(|a| a.rtl).unwrap_or(self.rtl)
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Add one or more space-separated classes. Returns true if any was new.
    pub fn add_class(&mut self, id: ElementId, classes: &str) -> bool {
        let Some(element) = self.elements.get_mut(id.0) else {
            return false;
        };
        let mut changed = false;
        for class in classes.split_whitespace() {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
                changed = true;
            }
        }
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Remove one or more space-separated classes. Returns true if any was present.
    pub fn remove_class(&mut self, id: ElementId, classes: &str) -> bool {
        let Some(element) = self.elements.get_mut(id.0) else {
            return false;
        };
        let before = element.classes.len();
        element
            .classes
            .retain(|c| !classes.split_whitespace().any(|r| r == c.as_str()));
        let changed = element.classes.len() != before;
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Add the classes when `add` is true, remove them otherwise.
    pub fn add_remove_class(&mut self, id: ElementId, classes: &str, add: bool) -> bool {
        if add {
            self.add_class(id, classes)
        } else {
            self.remove_class(id, classes)
        }
    }

    // =========================================================================
    // Styles
    // =========================================================================

    /// Inline value of a longhand property.
    pub fn style(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.style(name))
    }

    /// Set one inline property; shorthands are expanded. Returns true on change.
    pub fn set_style(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        let Some(element) = self.elements.get_mut(id.0) else {
            return false;
        };
        let mut changed = false;
        for (longhand, value) in expand_shorthand(name, value) {
            match element.styles.iter_mut().find(|(n, _)| *n == longhand) {
                Some((_, existing)) if *existing == value => {}
                Some((_, existing)) => {
                    *existing = value;
                    changed = true;
                }
                None => {
                    element.styles.push((longhand, value));
                    changed = true;
                }
            }
        }
        if changed {
            trace!("style {:?} {} = {}", id, name, value);
            self.invalidate();
        }
        changed
    }

    /// Merge several inline properties at once.
    pub fn set_styles<S: AsRef<str>>(&mut self, id: ElementId, styles: &[(&str, S)]) -> bool {
        let mut changed = false;
        for (name, value) in styles {
            changed |= self.set_style(id, name, value.as_ref());
        }
        changed
    }

    /// Remove an inline property (and the longhands of a shorthand).
    pub fn clear_style(&mut self, id: ElementId, name: &str) -> bool {
        let Some(element) = self.elements.get_mut(id.0) else {
            return false;
        };
        let longhands: Vec<String> = expand_shorthand(name, "0").into_iter().map(|(n, _)| n).collect();
        let before = element.styles.len();
        element.styles.retain(|(n, _)| !longhands.contains(n));
        let changed = element.styles.len() != before;
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Resolved value: inline style first, then the class stylesheet.
    pub fn computed_style(&self, id: ElementId, name: &str) -> Option<&str> {
        let element = self.get(id)?;
        element
            .style(name)
            .or_else(|| self.sheet.lookup(&element.classes, name))
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn content(&self, id: ElementId) -> &str {
        self.get(id).map(|e| e.content.as_str()).unwrap_or("")
    }

    /// Replace the text content. Returns true if it changed.
    pub fn set_content(&mut self, id: ElementId, content: &str) -> bool {
        match self.elements.get_mut(id.0) {
            Some(e) if e.content != content => {
                e.content = content.to_string();
                self.invalidate();
                true
            }
            _ => false,
        }
    }

    pub fn intrinsic_size(&self, id: ElementId) -> Option<(f32, f32)> {
        self.get(id).and_then(|e| e.intrinsic)
    }

    /// Give a leaf a natural size, as an image or embedded widget would have.
    pub fn set_intrinsic_size(&mut self, id: ElementId, width: f32, height: f32) {
        if let Some(e) = self.elements.get_mut(id.0) {
            e.intrinsic = Some((width, height));
            self.invalidate();
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll_left(&self, id: ElementId) -> i32 {
        self.get(id).map(|e| e.scroll.0).unwrap_or(0)
    }

    pub fn scroll_top(&self, id: ElementId) -> i32 {
        self.get(id).map(|e| e.scroll.1).unwrap_or(0)
    }

    /// Scrolling moves content but not the layout, so geometry stays cached.
    pub fn set_scroll(&mut self, id: ElementId, left: i32, top: i32) {
        if let Some(e) = self.elements.get_mut(id.0) {
            e.scroll = (left, top);
        }
    }

    // =========================================================================
    // Geometry (forces a render when stale)
    // =========================================================================

    fn render_box(&self, id: ElementId) -> Option<RenderBox> {
        if self.rendered.borrow().is_none() {
            let tree = render::render(self);
            *self.rendered.borrow_mut() = Some(tree);
        }
        self.rendered.borrow().as_ref().and_then(|tree| tree.get(id))
    }

    /// Element whose padding box offsets are measured against.
    ///
    /// Every element establishes a containing block here, so this is simply the
    /// parent of a rendered element.
    pub fn offset_parent(&self, id: ElementId) -> Option<ElementId> {
        if !self.has_node(id) || !self.showing(id) {
            return None;
        }
        self.parent(id)
    }

    /// Distance from the offset parent's padding edge to the border edge.
    pub fn offset_left(&self, id: ElementId) -> i32 {
        let Some(b) = self.render_box(id) else { return 0 };
        let parent_border = self
            .offset_parent(id)
            .and_then(|p| self.render_box(p))
            .map(|p| p.border.left)
            .unwrap_or(0);
        b.x - parent_border
    }

    pub fn offset_top(&self, id: ElementId) -> i32 {
        let Some(b) = self.render_box(id) else { return 0 };
        let parent_border = self
            .offset_parent(id)
            .and_then(|p| self.render_box(p))
            .map(|p| p.border.top)
            .unwrap_or(0);
        b.y - parent_border
    }

    /// Border-box width.
    pub fn offset_width(&self, id: ElementId) -> i32 {
        self.render_box(id).map(|b| b.width).unwrap_or(0)
    }

    /// Border-box height.
    pub fn offset_height(&self, id: ElementId) -> i32 {
        self.render_box(id).map(|b| b.height).unwrap_or(0)
    }

    /// Padding-box width.
    pub fn client_width(&self, id: ElementId) -> i32 {
        self.render_box(id)
            .map(|b| b.width - b.border.horizontal())
            .unwrap_or(0)
    }

    /// Padding-box height.
    pub fn client_height(&self, id: ElementId) -> i32 {
        self.render_box(id)
            .map(|b| b.height - b.border.vertical())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, ElementId) {
        let mut doc = Document::new(400, 300);
        let el = doc.create_element();
        doc.append_child(doc.body(), el);
        (doc, el)
    }

    #[test]
    fn test_tree_building() {
        let (mut doc, el) = setup();
        let child = doc.create_element();
        assert!(!doc.has_node(child));

        assert!(doc.append_child(el, child));
        assert!(doc.has_node(child));
        assert_eq!(doc.parent(child), Some(el));
        assert_eq!(doc.children(el), &[child]);

        // Cycles are refused
        assert!(!doc.append_child(child, el));
    }

    #[test]
    fn test_reparent_moves_child() {
        let (mut doc, el) = setup();
        let other = doc.create_element();
        doc.append_child(doc.body(), other);
        let child = doc.create_element();
        doc.append_child(el, child);
        doc.append_child(other, child);
        assert!(doc.children(el).is_empty());
        assert_eq!(doc.children(other), &[child]);
    }

    #[test]
    fn test_classes() {
        let (mut doc, el) = setup();
        assert!(doc.add_class(el, "enyo-flex-container columns"));
        assert!(doc.has_class(el, "columns"));
        assert!(!doc.add_class(el, "columns"));
        assert!(doc.add_remove_class(el, "columns", false));
        assert!(!doc.has_class(el, "columns"));
        assert!(!doc.remove_class(el, "columns"));
    }

    #[test]
    fn test_inline_styles_and_shorthands() {
        let (mut doc, el) = setup();
        assert!(doc.set_style(el, "margin", "0"));
        assert_eq!(doc.style(el, "margin-left"), Some("0"));
        assert!(!doc.set_style(el, "margin", "0"));

        assert!(doc.set_style(el, "margin-left", "5px"));
        assert_eq!(doc.style(el, "margin-left"), Some("5px"));

        assert_eq!(
            doc.get(el).map(Element::css_text).as_deref(),
            Some("margin-top: 0; margin-right: 0; margin-bottom: 0; margin-left: 5px;")
        );

        assert!(doc.clear_style(el, "margin"));
        assert_eq!(doc.style(el, "margin-top"), None);
    }

    #[test]
    fn test_computed_style_prefers_inline() {
        let (mut doc, el) = setup();
        doc.add_class(el, "enyo-fittable-columns-layout");
        assert_eq!(doc.computed_style(el, "display"), Some("flex"));
        doc.set_style(el, "display", "block");
        assert_eq!(doc.computed_style(el, "display"), Some("block"));
    }

    #[test]
    fn test_content_change_detection() {
        let (mut doc, el) = setup();
        assert!(doc.set_content(el, "hello"));
        assert!(!doc.set_content(el, "hello"));
        assert_eq!(doc.content(el), "hello");
    }

    #[test]
    fn test_showing_change_detection() {
        let (mut doc, el) = setup();
        assert!(!doc.set_showing(el, true));
        assert!(doc.set_showing(el, false));
        assert!(!doc.showing(el));
        assert_eq!(doc.offset_parent(el), None);
    }

    #[test]
    fn test_rtl_inheritance() {
        let (mut doc, el) = setup();
        assert!(!doc.is_rtl(el));
        doc.set_document_rtl(true);
        assert!(doc.is_rtl(el));
        if let Some(attrs) = doc.attrs_mut(el) {
            attrs.rtl = Some(false);
        }
        assert!(!doc.is_rtl(el));
    }

    #[test]
    fn test_intrinsic_size_measures_leaf() {
        let (mut doc, el) = setup();
        doc.set_style(el, "display", "flex");
        let image = doc.create_element();
        doc.append_child(el, image);
        doc.set_intrinsic_size(image, 64.0, 48.0);

        assert_eq!(doc.offset_width(image), 64);
        assert_eq!(doc.offset_height(el), 48);
    }

    #[test]
    fn test_geometry_of_block_child() {
        let (mut doc, el) = setup();
        doc.set_style(el, "height", "40px");
        assert_eq!(doc.offset_width(el), 400);
        assert_eq!(doc.offset_height(el), 40);
        assert_eq!(doc.offset_left(el), 0);

        doc.set_style(el, "border", "2px solid black");
        assert_eq!(doc.offset_width(el), 400);
        assert_eq!(doc.client_width(el), 396);
        assert_eq!(doc.client_height(el), 36);
    }
}
