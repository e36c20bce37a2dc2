//! Timers - deferred re-runs of manual flex passes.
//!
//! A single-threaded, fire-and-forget queue. Nothing is ever cancelled: each
//! task holds a weak reference and turns into a no-op when its layout has
//! been dropped or unregistered by the time it comes due. The host drives
//! the clock through [`LayoutRuntime::tick`](crate::LayoutRuntime::tick).

use std::cell::{Cell, RefCell};
use std::rc::Weak;
use std::time::{Duration, Instant};

use log::trace;

use super::context::LayoutContext;
use super::flex::FlexLayout;
use super::registry::FlexRef;

struct Pending {
    due: Instant,
    layout: Weak<RefCell<FlexLayout>>,
}

/// Queue of deferred manual passes.
pub struct Timers {
    now: Cell<Instant>,
    queue: RefCell<Vec<Pending>>,
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Timers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timers")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Timers {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
            queue: RefCell::new(Vec::new()),
        }
    }

    /// Time of the last tick (or of creation).
    pub fn now(&self) -> Instant {
        self.now.get()
    }

    /// Queue a re-run of `layout`'s manual pass `delay` after now.
    pub fn schedule_repeat(&self, delay: Duration, layout: Weak<RefCell<FlexLayout>>) {
        self.queue.borrow_mut().push(Pending {
            due: self.now.get() + delay,
            layout,
        });
    }

    /// Tasks not yet run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Advance the clock to `now` and run every task that is due, oldest first.
    ///
    /// Returns the number of tasks that did work.
    pub fn run_due(&self, now: Instant, cx: &mut LayoutContext<'_>) -> usize {
        if now > self.now.get() {
            self.now.set(now);
        }

        let due: Vec<Pending> = {
            let mut queue = self.queue.borrow_mut();
            let (due, waiting): (Vec<Pending>, Vec<Pending>) =
                queue.drain(..).partition(|p| p.due <= now);
            *queue = waiting;
            due
        };

        let mut ran = 0;
        for task in due {
            let Some(layout) = task.layout.upgrade() else {
                trace!("deferred flex pass dropped: layout gone");
                continue;
            };
            let registered: FlexRef = task.layout.clone();
            if !cx.registry.is_registered(&registered) {
                trace!("deferred flex pass dropped: layout unregistered");
                continue;
            }
            let Ok(mut layout) = layout.try_borrow_mut() else {
                continue;
            };
            layout.repeat_manual(cx);
            ran += 1;
        }
        ran
    }
}
