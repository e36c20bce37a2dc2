//! Arrangers - position panels during animated transitions.
//!
//! An external scheduler drives every arranger through the same protocol:
//! `start` once, `arrange` for each keyframe it interpolates, `finish` at
//! the end, and `destroy` when the container goes away. [`ArrangerBase`]
//! carries the state every arranger shares plus the style helpers used to
//! place panels.

mod slide;

pub use slide::{PanelSlideArranger, SlideState, TransitionPoint};

use crate::engine::{Document, ElementId};
use crate::error::{LayoutError, Result};
use crate::layout::geometry::bounds;
use crate::style::px;
use crate::types::Bounds;

/// Transition protocol driven by an external scheduler.
pub trait Arranger {
    /// Begin a transition from panel `from` to panel `to`.
    ///
    /// `on_resize` is called for every panel that becomes visible.
    fn start(
        &mut self,
        doc: &mut Document,
        from: usize,
        to: usize,
        on_resize: &mut dyn FnMut(ElementId),
    ) -> Result<()>;

    /// Position panels for the named keyframe.
    fn arrange(&mut self, doc: &mut Document, name: &str) -> Result<()>;

    /// Settle on the target panel.
    fn finish(&mut self, doc: &mut Document);

    /// Undo everything the arranger applied.
    fn destroy(&mut self, doc: &mut Document);
}

/// State shared by arrangers.
#[derive(Debug, Clone)]
pub struct ArrangerBase {
    pub container: ElementId,
    /// Container bounds measured when the transition started.
    pub container_bounds: Bounds,
    pub from_index: usize,
    pub to_index: usize,
    /// Keyframe names of the running transition.
    pub transition_points: Vec<String>,
}

impl ArrangerBase {
    pub fn new(container: ElementId) -> Self {
        Self {
            container,
            container_bounds: Bounds::default(),
            from_index: 0,
            to_index: 0,
            transition_points: Vec::new(),
        }
    }

    /// Panels in order: the container's children.
    pub fn panels(&self, doc: &Document) -> Vec<ElementId> {
        doc.children(self.container).to_vec()
    }

    /// Record the endpoints and measure the container.
    pub fn start(&mut self, doc: &Document, from: usize, to: usize) -> Result<()> {
        if !doc.contains(self.container) {
            return Err(LayoutError::UnknownElement(self.container));
        }
        self.from_index = from;
        self.to_index = to;
        self.container_bounds = bounds(doc, self.container);
        Ok(())
    }

    /// Transition complete.
    pub fn finish(&mut self) {
        self.transition_points.clear();
    }

    pub fn destroy(&mut self) {
        self.transition_points.clear();
    }

    /// Place a panel at a horizontal offset.
    pub fn arrange_control(doc: &mut Document, control: ElementId, left: i32) {
        Self::position_control(doc, control, Some(left));
    }

    /// Set or (with `None`) clear a panel's `left` style.
    pub fn position_control(doc: &mut Document, control: ElementId, left: Option<i32>) {
        match left {
            Some(left) => {
                doc.set_style(control, "left", &px(left));
            }
            None => {
                doc.clear_style(control, "left");
            }
        }
    }
}
