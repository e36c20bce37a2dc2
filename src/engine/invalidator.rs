//! Layout invalidation - re-run manual flex layouts when elements change.
//!
//! On platforms without native box layout the manual flex pass has to be
//! repeated whenever something that affects measurement changes. Content
//! and class changes do so; inline style changes never do, since layouts
//! themselves write styles and would otherwise retrigger forever.
//!
//! The behaviour is picked once per runtime with [`for_platform`].

use log::trace;

use crate::layout::{LayoutContext, Platform};

bitflags::bitflags! {
    /// What about an element changed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ChangeKind: u8 {
        const CONTENT = 1 << 0;
        const CLASSES = 1 << 1;
        const STYLES = 1 << 2;
    }
}

impl ChangeKind {
    /// Changes that can move registered flex layouts.
    pub const INVALIDATING: Self = Self::CONTENT.union(Self::CLASSES);

    pub fn invalidates(self) -> bool {
        self.intersects(Self::INVALIDATING)
    }
}

/// Reaction to element changes, called after the change has been applied.
pub trait Invalidatable {
    /// Re-run whatever layouts depend on element measurements.
    fn invalidate_layout(&self, cx: &mut LayoutContext<'_>);

    /// Notify of an applied change.
    fn changed(&self, kind: ChangeKind, cx: &mut LayoutContext<'_>) {
        if kind.invalidates() {
            self.invalidate_layout(cx);
        }
    }
}

/// Native layout keeps itself up to date.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl Invalidatable for NoopInvalidator {
    fn invalidate_layout(&self, _cx: &mut LayoutContext<'_>) {}
}

/// Reflows every registered flex layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexInvalidator;

impl Invalidatable for FlexInvalidator {
    fn invalidate_layout(&self, cx: &mut LayoutContext<'_>) {
        trace!("invalidating registered flex layouts");
        let registry = cx.registry;
        registry.reflow_all(cx);
    }
}

/// The invalidator a platform needs.
pub fn for_platform(platform: &Platform) -> Box<dyn Invalidatable> {
    if platform.needs_manual_flex() {
        Box::new(FlexInvalidator)
    } else {
        Box::new(NoopInvalidator)
    }
}
