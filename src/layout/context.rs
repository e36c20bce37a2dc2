//! Layout context and the base layout capability.
//!
//! A [`LayoutContext`] bundles everything a layout engine needs for one call:
//! the document it mutates plus the shared runtime services. Services are
//! injected here rather than looked up globally, so several independent
//! runtimes can coexist (one per test, for instance).

use crate::config::LayoutConfig;
use crate::engine::{Document, ElementId};

use super::detect::Platform;
use super::registry::FlexRegistry;
use super::timers::Timers;

/// Borrowed runtime state handed to `flow`/`reflow`.
pub struct LayoutContext<'a> {
    pub document: &'a mut Document,
    pub registry: &'a FlexRegistry,
    pub timers: &'a Timers,
    pub platform: &'a Platform,
    pub config: &'a LayoutConfig,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        document: &'a mut Document,
        registry: &'a FlexRegistry,
        timers: &'a Timers,
        platform: &'a Platform,
        config: &'a LayoutConfig,
    ) -> Self {
        Self {
            document,
            registry,
            timers,
            platform,
            config,
        }
    }
}

/// A layout strategy attached to one container.
///
/// `flow` applies static, size-independent setup once per structural change.
/// `reflow` recomputes size-dependent values and may run any number of times.
pub trait Layout {
    /// The element being laid out.
    fn container(&self) -> ElementId;

    fn flow(&mut self, cx: &mut LayoutContext<'_>);

    fn reflow(&mut self, cx: &mut LayoutContext<'_>);
}
