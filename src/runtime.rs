//! Layout runtime - the root object a host application owns.
//!
//! Holds the document together with the services layouts share: the flex
//! registry, the deferred-pass timers, the detected platform, configuration
//! and the invalidation strategy. Element mutations that layouts must hear
//! about go through the runtime so the invalidator sees them.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Instant;
//! use spark_layouts::{Document, LayoutRuntime, Platform};
//!
//! let mut runtime = LayoutRuntime::new(Document::new(800, 600), Platform::manual());
//! let flex = runtime.hflex(container);
//! runtime.reflow_flex(&flex);
//!
//! // Host loop
//! runtime.tick(Instant::now());
//! ```

use std::time::Instant;

use log::debug;

use crate::config::LayoutConfig;
use crate::engine::{ChangeKind, Document, ElementId, Invalidatable, invalidator};
use crate::layout::{
    FeatureProbe, FittableLayout, FlexHandle, FlexLayout, FlexRegistry, Layout, LayoutContext,
    Platform, Timers,
};

/// Document plus layout services.
pub struct LayoutRuntime {
    document: Document,
    registry: FlexRegistry,
    timers: Timers,
    platform: Platform,
    config: LayoutConfig,
    invalidator: Box<dyn Invalidatable>,
}

impl LayoutRuntime {
    /// Runtime for a known platform with default configuration.
    pub fn new(document: Document, platform: Platform) -> Self {
        Self::with_config(document, platform, LayoutConfig::default())
    }

    pub fn with_config(mut document: Document, platform: Platform, config: LayoutConfig) -> Self {
        document.set_glyph_size(config.glyph_size);
        debug!("layout runtime on {:?} platform", platform.family);
        Self {
            document,
            registry: FlexRegistry::new(),
            timers: Timers::new(),
            platform,
            config,
            invalidator: invalidator::for_platform(&platform),
        }
    }

    /// Runtime for the process-wide detected platform.
    pub fn detect(document: Document, probe: &dyn FeatureProbe) -> Self {
        Self::new(document, Platform::cached(probe))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access. Changes made here do not notify the invalidator.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn registry(&self) -> &FlexRegistry {
        &self.registry
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Borrow everything a layout call needs.
    pub fn context(&mut self) -> LayoutContext<'_> {
        LayoutContext::new(
            &mut self.document,
            &self.registry,
            &self.timers,
            &self.platform,
            &self.config,
        )
    }

    fn notify(&mut self, kind: ChangeKind) {
        let mut cx = LayoutContext::new(
            &mut self.document,
            &self.registry,
            &self.timers,
            &self.platform,
            &self.config,
        );
        self.invalidator.changed(kind, &mut cx);
    }

    // =========================================================================
    // Observed mutations
    // =========================================================================

    /// Replace an element's text content, then invalidate.
    pub fn set_content(&mut self, id: ElementId, content: &str) -> bool {
        let changed = self.document.set_content(id, content);
        if changed {
            self.notify(ChangeKind::CONTENT);
        }
        changed
    }

    pub fn add_class(&mut self, id: ElementId, classes: &str) -> bool {
        let changed = self.document.add_class(id, classes);
        if changed {
            self.notify(ChangeKind::CLASSES);
        }
        changed
    }

    pub fn remove_class(&mut self, id: ElementId, classes: &str) -> bool {
        let changed = self.document.remove_class(id, classes);
        if changed {
            self.notify(ChangeKind::CLASSES);
        }
        changed
    }

    /// Set an inline style. Reported, but style changes never invalidate.
    pub fn apply_style(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        let changed = self.document.set_style(id, name, value);
        if changed {
            self.notify(ChangeKind::STYLES);
        }
        changed
    }

    // =========================================================================
    // Layouts
    // =========================================================================

    pub fn fittable_columns(&mut self, container: ElementId) -> FittableLayout {
        FittableLayout::columns(container, &mut self.context())
    }

    pub fn fittable_rows(&mut self, container: ElementId) -> FittableLayout {
        FittableLayout::rows(container, &mut self.context())
    }

    pub fn hflex(&mut self, container: ElementId) -> FlexHandle {
        FlexLayout::horizontal(container, &mut self.context())
    }

    pub fn vflex(&mut self, container: ElementId) -> FlexHandle {
        FlexLayout::vertical(container, &mut self.context())
    }

    pub fn flow(&mut self, layout: &mut dyn Layout) {
        layout.flow(&mut self.context());
    }

    pub fn reflow(&mut self, layout: &mut dyn Layout) {
        layout.reflow(&mut self.context());
    }

    /// Reflow a shared flex layout.
    pub fn reflow_flex(&mut self, layout: &FlexHandle) {
        layout.borrow_mut().reflow(&mut self.context());
    }

    /// Unregister a flex layout.
    pub fn destroy_flex(&mut self, layout: &FlexHandle) {
        layout.borrow().destroy(&mut self.context());
    }

    /// Reflow every registered flex layout.
    pub fn reflow_all(&mut self) -> usize {
        let mut cx = LayoutContext::new(
            &mut self.document,
            &self.registry,
            &self.timers,
            &self.platform,
            &self.config,
        );
        self.registry.reflow_all(&mut cx)
    }

    /// Advance the clock and run deferred passes that are due.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut cx = LayoutContext::new(
            &mut self.document,
            &self.registry,
            &self.timers,
            &self.platform,
            &self.config,
        );
        self.timers.run_due(now, &mut cx)
    }

    /// Time of the last tick.
    pub fn now(&self) -> Instant {
        self.timers.now()
    }
}

impl std::fmt::Debug for LayoutRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutRuntime")
            .field("platform", &self.platform)
            .field("config", &self.config)
            .field("registered", &self.registry.len())
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}
