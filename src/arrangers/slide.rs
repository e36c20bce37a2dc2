//! Panel slide arranger - the next panel slides in over the current one.
//!
//! Only the two panels taking part in a transition are shown while it runs;
//! once it finishes only the target remains. New panels always come in from
//! the right.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::engine::{Document, ElementId};
use crate::error::{LayoutError, Result};

use super::{Arranger, ArrangerBase};

/// Where the arranger is in its transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideState {
    #[default]
    Idle,
    Starting,
    Finishing,
}

/// A keyframe name `"to.from.s"` or `"to.from.f"`, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPoint {
    pub to: usize,
    pub from: usize,
    pub starting: bool,
}

impl TransitionPoint {
    pub fn start(from: usize, to: usize) -> Self {
        Self { to, from, starting: true }
    }

    pub fn finish(from: usize, to: usize) -> Self {
        Self { to, from, starting: false }
    }

    /// Parse a keyframe name.
    pub fn parse(name: &str) -> Result<Self> {
        let malformed = |reason: &str| LayoutError::MalformedTransition {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = name.split('.').collect();
        let [to, from, phase] = parts.as_slice() else {
            return Err(malformed("expected three dot-separated parts"));
        };
        let to = to.parse::<usize>().map_err(|_| malformed("target index is not a number"))?;
        let from = from.parse::<usize>().map_err(|_| malformed("source index is not a number"))?;
        let starting = match *phase {
            "s" => true,
            "f" => false,
            _ => return Err(malformed("phase must be 's' or 'f'")),
        };

        Ok(Self { to, from, starting })
    }

    /// Horizontal offset of panel `index` at this keyframe, for a container
    /// `width` wide.
    pub fn offset(&self, index: usize, width: i32) -> i32 {
        if index == self.from && index == self.to {
            0
        } else if index == self.to {
            if self.starting { width } else { 0 }
        } else if index == self.from {
            if self.starting { 0 } else { -width }
        } else {
            width
        }
    }
}

impl FromStr for TransitionPoint {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TransitionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = if self.starting { "s" } else { "f" };
        write!(f, "{}.{}.{}", self.to, self.from, phase)
    }
}

/// Card slide-in arranger.
#[derive(Debug, Clone)]
pub struct PanelSlideArranger {
    base: ArrangerBase,
    state: SlideState,
}

impl PanelSlideArranger {
    pub fn new(container: ElementId) -> Self {
        Self {
            base: ArrangerBase::new(container),
            state: SlideState::Idle,
        }
    }

    pub fn state(&self) -> SlideState {
        self.state
    }

    pub fn base(&self) -> &ArrangerBase {
        &self.base
    }

    pub fn transition_points(&self) -> &[String] {
        &self.base.transition_points
    }
}

impl Arranger for PanelSlideArranger {
    fn start(
        &mut self,
        doc: &mut Document,
        from: usize,
        to: usize,
        on_resize: &mut dyn FnMut(ElementId),
    ) -> Result<()> {
        for (i, panel) in self.base.panels(doc).into_iter().enumerate() {
            let was_showing = doc.showing(panel);
            let showing = i == from || i == to;
            doc.set_showing(panel, showing);
            if showing && !was_showing {
                on_resize(panel);
            }
        }

        self.base.start(doc, from, to)?;
        self.base.transition_points = vec![
            TransitionPoint::start(from, to).to_string(),
            TransitionPoint::finish(from, to).to_string(),
        ];
        self.state = SlideState::Starting;
        debug!("slide {from} -> {to}, width {}", self.base.container_bounds.width);
        Ok(())
    }

    fn arrange(&mut self, doc: &mut Document, name: &str) -> Result<()> {
        let point = TransitionPoint::parse(name)?;
        let width = self.base.container_bounds.width;

        for (i, panel) in self.base.panels(doc).into_iter().enumerate() {
            ArrangerBase::arrange_control(doc, panel, point.offset(i, width));
        }

        self.state = if point.starting {
            SlideState::Starting
        } else {
            SlideState::Finishing
        };
        Ok(())
    }

    fn finish(&mut self, doc: &mut Document) {
        self.base.finish();
        let to = self.base.to_index;
        for (i, panel) in self.base.panels(doc).into_iter().enumerate() {
            doc.set_showing(panel, i == to);
        }
        self.state = SlideState::Idle;
    }

    fn destroy(&mut self, doc: &mut Document) {
        for panel in self.base.panels(doc) {
            ArrangerBase::position_control(doc, panel, None);
        }
        self.base.destroy();
        self.state = SlideState::Idle;
    }
}
