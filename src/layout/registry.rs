//! Flex Registry - live manual-fallback flex layouts.
//!
//! Every flex layout that sizes its children by hand registers itself here,
//! so that a content or class change anywhere can re-run all of them. Entries
//! are weak, type-erased [`Layout`]s; the registry never keeps one alive.
//!
//! # Iteration safety
//!
//! Removal leaves a tombstone instead of shifting entries, and tombstones are
//! compacted only when no [`FlexRegistry::reflow_all`] pass is running. A
//! layout that unregisters itself (or another) mid-pass therefore never
//! causes an entry to be skipped or visited twice.

use std::cell::{Cell, RefCell};
use std::rc::Weak;

use log::{debug, trace};

use super::context::{Layout, LayoutContext};

/// Weak handle to a registered layout.
pub type FlexRef = Weak<RefCell<dyn Layout>>;

/// Ordered, duplicate-free set of layouts.
#[derive(Debug, Default)]
pub struct FlexRegistry {
    entries: RefCell<Vec<Option<FlexRef>>>,
    /// Number of `reflow_all` passes currently on the stack.
    passes: Cell<usize>,
}

impl FlexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layout. Returns false if it was already registered.
    pub fn register(&self, layout: FlexRef) -> bool {
        let mut entries = self.entries.borrow_mut();
        if entries.iter().flatten().any(|e| e.ptr_eq(&layout)) {
            return false;
        }
        entries.push(Some(layout));
        true
    }

    /// Remove a layout. Returns false if it was not registered.
    pub fn unregister(&self, layout: &FlexRef) -> bool {
        let removed = {
            let mut entries = self.entries.borrow_mut();
            match entries
                .iter_mut()
                .find(|e| e.as_ref().is_some_and(|e| e.ptr_eq(layout)))
            {
                Some(slot) => {
                    *slot = None;
                    true
                }
                None => false,
            }
        };
        if removed && self.passes.get() == 0 {
            self.compact();
        }
        removed
    }

    /// Registered and still alive.
    pub fn is_registered(&self, layout: &FlexRef) -> bool {
        self.entries
            .borrow()
            .iter()
            .flatten()
            .any(|e| e.ptr_eq(layout) && e.strong_count() > 0)
    }

    /// Number of registered layouts that are still alive.
    pub fn len(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .flatten()
            .filter(|e| e.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots including tombstones; equals `len()` whenever no pass is running.
    pub fn capacity_used(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Drop tombstones and layouts that no longer exist.
    fn compact(&self) {
        self.entries
            .borrow_mut()
            .retain(|e| e.as_ref().is_some_and(|e| e.strong_count() > 0));
    }

    /// Reflow every registered layout once, in registration order.
    ///
    /// Layouts registered during the pass are visited too. A layout that is
    /// already mid-reflow further up the stack is skipped.
    pub fn reflow_all(&self, cx: &mut LayoutContext<'_>) -> usize {
        self.passes.set(self.passes.get() + 1);

        let mut visited = 0;
        let mut index = 0;
        loop {
            let entry = match self.entries.borrow().get(index) {
                Some(entry) => entry.clone(),
                None => break,
            };
            index += 1;

            let Some(layout) = entry.and_then(|e| e.upgrade()) else {
                continue;
            };
            match layout.try_borrow_mut() {
                Ok(mut layout) => {
                    layout.reflow(cx);
                    visited += 1;
                }
                Err(_) => trace!("flex layout busy, skipped"),
            }
        }

        self.passes.set(self.passes.get() - 1);
        if self.passes.get() == 0 {
            self.compact();
        }
        debug!("reflowed {visited} registered flex layout(s)");
        visited
    }
}
