//! Flex Layout - weighted space distribution along one axis.
//!
//! Three strategies, picked once from the detected [`Platform`]:
//!
//! - **Webkit**: write the legacy `-webkit-box` properties and let the engine
//!   distribute space.
//! - **Mozilla**: the same through `-moz-box`.
//! - **Manual**: measure every child and write explicit pixel sizes. The pass
//!   runs again once after a short delay, and the layout registers itself so
//!   later content or class changes can re-run it.
//!
//! Unlike fittable layouts, every weighted child shares the leftover space.
//!
//! # Example
//!
//! ```ignore
//! let layout = FlexLayout::horizontal(container, &mut cx);
//! layout.borrow_mut().reflow(&mut cx);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use crate::engine::{Document, ElementId};
use crate::style::{classes, px};
use crate::types::{FlexWeight, Orientation, Pack};

use super::context::{Layout, LayoutContext};
use super::detect::{EngineFamily, Platform};
use super::geometry::{absolute_bounds, sum_styles};
use super::registry::FlexRef;

/// Shared handle to a flex layout; the registry and timers hold weak copies.
pub type FlexHandle = Rc<RefCell<FlexLayout>>;

/// How a flex layout sizes its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlexStrategy {
    Webkit,
    Mozilla,
    Manual,
}

impl FlexStrategy {
    pub fn for_platform(platform: &Platform) -> Self {
        match platform.family {
            EngineFamily::Webkit => Self::Webkit,
            EngineFamily::Mozilla => Self::Mozilla,
            EngineFamily::Manual => Self::Manual,
        }
    }
}

/// Flex polyfill bound to one container.
#[derive(Debug)]
pub struct FlexLayout {
    container: ElementId,
    orient: Orientation,
    pack: Pack,
    align: Pack,
    default_flex: u32,
    strategy: FlexStrategy,
    /// The deferred second manual pass has been scheduled.
    repeat_scheduled: bool,
    this: Weak<RefCell<FlexLayout>>,
}

impl FlexLayout {
    /// Create a layout. Pack and align come from the container's attributes,
    /// defaulting to `start` and `stretch`.
    pub fn new(container: ElementId, orient: Orientation, cx: &mut LayoutContext<'_>) -> FlexHandle {
        let pack = cx.document.pack(container).unwrap_or(Pack::Start);
        let align = cx.document.align(container).unwrap_or(Pack::Stretch);
        let strategy = FlexStrategy::for_platform(cx.platform);
        let default_flex = cx.config.default_flex;

        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                container,
                orient,
                pack,
                align,
                default_flex,
                strategy,
                repeat_scheduled: false,
                this: this.clone(),
            })
        })
    }

    /// Horizontal flex layout (`enyo-hflex-layout`).
    pub fn horizontal(container: ElementId, cx: &mut LayoutContext<'_>) -> FlexHandle {
        cx.document.add_class(container, classes::HFLEX);
        Self::new(container, Orientation::Horizontal, cx)
    }

    /// Vertical flex layout (`enyo-vflex-layout`).
    pub fn vertical(container: ElementId, cx: &mut LayoutContext<'_>) -> FlexHandle {
        cx.document.add_class(container, classes::VFLEX);
        Self::new(container, Orientation::Vertical, cx)
    }

    pub fn orient(&self) -> Orientation {
        self.orient
    }

    pub fn pack(&self) -> Pack {
        self.pack
    }

    pub fn align(&self) -> Pack {
        self.align
    }

    pub fn strategy(&self) -> FlexStrategy {
        self.strategy
    }

    /// Weak handle as stored by the registry.
    pub fn handle(&self) -> FlexRef {
        self.this.clone()
    }

    /// Weight of a child: 0 when unset or false, the default for `true`.
    pub fn compute_flex_weight(&self, doc: &Document, child: ElementId) -> u32 {
        match doc.flex(child) {
            FlexWeight::Unset | FlexWeight::Flag(false) => 0,
            FlexWeight::Flag(true) => self.default_flex,
            FlexWeight::Weight(n) => n,
        }
    }

    /// Stop taking part in registry-wide reflows.
    pub fn destroy(&self, cx: &mut LayoutContext<'_>) {
        if cx.registry.unregister(&self.handle()) {
            debug!("flex layout on {:?} unregistered", self.container);
        }
    }

    // =========================================================================
    // Legacy box strategies
    // =========================================================================

    fn reflow_webkit(&self, doc: &mut Document) {
        doc.set_styles(
            self.container,
            &[
                ("display", "-webkit-box"),
                ("-webkit-box-pack", self.pack.as_css()),
                ("-webkit-box-align", self.align.as_css()),
                ("-webkit-box-orient", self.orient.as_css()),
                ("box-sizing", "border-box"),
                ("overflow", "hidden"),
            ],
        );

        let dimension = self.orient.dimension();
        for child in doc.children(self.container).to_vec() {
            doc.set_style(child, "display", "block");

            let weight = self.compute_flex_weight(doc, child);
            if weight == 0 {
                continue;
            }
            doc.set_styles(child, &[("-webkit-box-flex", weight.to_string().as_str()), ("overflow", "hidden")]);
            // Weighted children get exactly the leftover space, not natural size plus a share
            if doc.style(child, dimension).is_none() {
                doc.set_style(child, dimension, "0px");
            }
        }
    }

    fn reflow_mozilla(&self, doc: &mut Document) {
        doc.set_styles(
            self.container,
            &[
                ("display", "-moz-box"),
                ("-moz-box-pack", self.pack.as_css()),
                ("-moz-box-align", self.align.as_css()),
                ("-moz-box-orient", self.orient.as_css()),
                ("-moz-box-sizing", "border-box"),
                ("position", "relative"),
                ("overflow", "visible"),
            ],
        );
        if self.orient.is_horizontal() {
            doc.set_style(self.container, "height", "100%");
        }

        for child in doc.children(self.container).to_vec() {
            let weight = self.compute_flex_weight(doc, child);
            if weight == 0 {
                continue;
            }
            doc.set_styles(child, &[("-moz-box-flex", weight.to_string().as_str()), ("overflow", "hidden")]);
        }
    }

    // =========================================================================
    // Manual strategy
    // =========================================================================

    /// Measure children and write explicit sizes.
    fn manual_pass(&self, doc: &mut Document) {
        let orient = self.orient;
        let container_sums = sum_styles(doc, self.container);
        let container_bounds = absolute_bounds(doc, self.container);
        let cross_sums = container_sums.across(orient);
        let cross_content = container_bounds.extent(cross_orientation(orient)) - cross_sums.padding - cross_sums.border;

        let mut occupied = 0;
        let mut flexible = Vec::new();

        // Pass 1: occupied space of fixed children, cross size of everyone.
        // Hidden children take no space and get no share.
        for child in doc.showing_children(self.container) {
            let sums = sum_styles(doc, child);
            let bounds = absolute_bounds(doc, child);

            if self.compute_flex_weight(doc, child) > 0 {
                flexible.push(child);
            } else {
                let along = sums.along(orient);
                occupied += bounds.extent(orient) + along.margin + along.border;
            }

            let cross_size = px((cross_content - sums.across(orient).offset()).max(0));
            if orient.is_horizontal() {
                doc.set_styles(
                    child,
                    &[("overflow", "hidden"), ("float", "left"), ("height", cross_size.as_str())],
                );
            } else {
                doc.set_styles(child, &[("overflow", "hidden"), ("width", cross_size.as_str())]);
            }
        }

        if flexible.is_empty() {
            return;
        }

        // Pass 2: equal floor shares of what is left
        let remaining = container_bounds.extent(orient) - container_sums.along(orient).offset() - occupied;
        let share = remaining.div_euclid(flexible.len() as i32);
        for child in flexible {
            let offset = sum_styles(doc, child).along(orient).offset();
            doc.set_style(child, orient.dimension(), &px((share - offset).max(0)));
        }
    }

    fn reflow_manual(&mut self, cx: &mut LayoutContext<'_>) {
        cx.document.set_styles(
            self.container,
            &[("box-sizing", "border-box"), (self.orient.dimension(), "100%")],
        );
        self.manual_pass(cx.document);

        // Sizes can shift once late content settles; measure once more later
        if !self.repeat_scheduled {
            self.repeat_scheduled = true;
            cx.timers.schedule_repeat(cx.config.manual_repeat_delay, self.this.clone());
        }

        cx.registry.register(self.handle());
    }

    /// Deferred second manual pass.
    pub(crate) fn repeat_manual(&mut self, cx: &mut LayoutContext<'_>) {
        debug!("repeating manual flex pass on {:?}", self.container);
        self.reflow_manual(cx);
    }
}

fn cross_orientation(orient: Orientation) -> Orientation {
    match orient {
        Orientation::Horizontal => Orientation::Vertical,
        Orientation::Vertical => Orientation::Horizontal,
    }
}

impl Layout for FlexLayout {
    fn container(&self) -> ElementId {
        self.container
    }

    /// Nothing is size independent here; the layout class is added on creation.
    fn flow(&mut self, _cx: &mut LayoutContext<'_>) {}

    fn reflow(&mut self, cx: &mut LayoutContext<'_>) {
        cx.document.set_styles(
            self.container,
            &[("margin", "0"), ("padding", "0"), ("border", "0"), ("overflow", "hidden")],
        );

        match self.strategy {
            FlexStrategy::Webkit => self.reflow_webkit(cx.document),
            FlexStrategy::Mozilla => self.reflow_mozilla(cx.document),
            FlexStrategy::Manual => self.reflow_manual(cx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::{FlexRegistry, Timers};

    struct Fixture {
        doc: Document,
        registry: FlexRegistry,
        timers: Timers,
        platform: Platform,
        config: LayoutConfig,
        container: ElementId,
    }

    impl Fixture {
        fn cx(&mut self) -> LayoutContext<'_> {
            LayoutContext::new(&mut self.doc, &self.registry, &self.timers, &self.platform, &self.config)
        }

        fn child(&mut self, width: Option<&str>, flex: FlexWeight) -> ElementId {
            let c = self.doc.create_element();
            self.doc.append_child(self.container, c);
            if let Some(width) = width {
                self.doc.set_style(c, "width", width);
            }
            self.doc.set_flex(c, flex);
            c
        }
    }

    fn setup(platform: Platform) -> Fixture {
        let mut doc = Document::new(400, 300);
        let container = doc.create_element();
        doc.append_child(doc.body(), container);
        doc.set_style(container, "height", "100px");
        Fixture {
            doc,
            registry: FlexRegistry::new(),
            timers: Timers::new(),
            platform,
            config: LayoutConfig::default(),
            container,
        }
    }

    #[test]
    fn test_compute_flex_weight() {
        let mut f = setup(Platform::webkit());
        let unset = f.child(None, FlexWeight::Unset);
        let off = f.child(None, FlexWeight::Flag(false));
        let on = f.child(None, FlexWeight::Flag(true));
        let three = f.child(None, FlexWeight::Weight(3));
        let container = f.container;
        let layout = FlexLayout::horizontal(container, &mut f.cx());
        let layout = layout.borrow();

        assert_eq!(layout.compute_flex_weight(&f.doc, unset), 0);
        assert_eq!(layout.compute_flex_weight(&f.doc, off), 0);
        assert_eq!(layout.compute_flex_weight(&f.doc, on), 10);
        assert_eq!(layout.compute_flex_weight(&f.doc, three), 3);
    }

    #[test]
    fn test_strategy_from_platform() {
        assert_eq!(FlexStrategy::for_platform(&Platform::webkit()), FlexStrategy::Webkit);
        assert_eq!(FlexStrategy::for_platform(&Platform::mozilla()), FlexStrategy::Mozilla);
        assert_eq!(FlexStrategy::for_platform(&Platform::manual()), FlexStrategy::Manual);
    }

    #[test]
    fn test_pack_and_align_from_container() {
        let mut f = setup(Platform::webkit());
        if let Some(attrs) = f.doc.attrs_mut(f.container) {
            attrs.pack = Some(Pack::Center);
        }
        let container = f.container;
        let layout = FlexLayout::vertical(container, &mut f.cx());
        assert_eq!(layout.borrow().pack(), Pack::Center);
        assert_eq!(layout.borrow().align(), Pack::Stretch);
        assert!(f.doc.has_class(container, classes::VFLEX));
    }

    #[test]
    fn test_reflow_resets_container() {
        let mut f = setup(Platform::webkit());
        f.doc.set_styles(f.container, &[("margin", "4px"), ("padding", "6px")]);
        let container = f.container;
        let layout = FlexLayout::horizontal(container, &mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());

        assert_eq!(f.doc.style(container, "margin-left"), Some("0"));
        assert_eq!(f.doc.style(container, "padding-top"), Some("0"));
        assert_eq!(f.doc.style(container, "border-left-width"), Some("0"));
        assert_eq!(f.doc.style(container, "overflow"), Some("hidden"));
    }

    #[test]
    fn test_webkit_styles() {
        let mut f = setup(Platform::webkit());
        let fixed = f.child(Some("100px"), FlexWeight::Unset);
        let grow = f.child(None, FlexWeight::Weight(2));
        let sized = f.child(Some("30px"), FlexWeight::Flag(true));
        let container = f.container;
        let layout = FlexLayout::horizontal(container, &mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());

        assert_eq!(f.doc.style(container, "display"), Some("-webkit-box"));
        assert_eq!(f.doc.style(container, "-webkit-box-orient"), Some("horizontal"));
        assert_eq!(f.doc.style(fixed, "display"), Some("block"));
        assert_eq!(f.doc.style(fixed, "-webkit-box-flex"), None);
        assert_eq!(f.doc.style(grow, "-webkit-box-flex"), Some("2"));
        assert_eq!(f.doc.style(grow, "width"), Some("0px"));
        assert_eq!(f.doc.style(sized, "width"), Some("30px"));
        assert_eq!(f.doc.style(sized, "-webkit-box-flex"), Some("10"));

        // Rendered: 270px left over, split 2:10 on top of the basis widths
        assert_eq!(f.doc.offset_width(grow), 45);
        assert_eq!(f.doc.offset_width(sized), 255);
        assert!(f.registry.is_empty());
    }

    #[test]
    fn test_mozilla_styles() {
        let mut f = setup(Platform::mozilla());
        let grow = f.child(None, FlexWeight::Flag(true));
        let container = f.container;
        let layout = FlexLayout::horizontal(container, &mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());

        assert_eq!(f.doc.style(container, "display"), Some("-moz-box"));
        assert_eq!(f.doc.style(container, "height"), Some("100%"));
        assert_eq!(f.doc.style(container, "position"), Some("relative"));
        assert_eq!(f.doc.style(grow, "-moz-box-flex"), Some("10"));
        assert_eq!(f.doc.style(grow, "width"), None);
    }

    #[test]
    fn test_manual_distribution() {
        let mut f = setup(Platform::manual());
        let fixed = f.child(Some("100px"), FlexWeight::Unset);
        let a = f.child(None, FlexWeight::Flag(true));
        let b = f.child(None, FlexWeight::Weight(1));
        let c = f.child(None, FlexWeight::Weight(1));
        f.doc.set_style(c, "margin-left", "4px");
        let container = f.container;
        let layout = FlexLayout::horizontal(container, &mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());

        // (400 - 100) / 3 = 100 each, minus each child's own offset
        assert_eq!(f.doc.style(a, "width"), Some("100px"));
        assert_eq!(f.doc.style(b, "width"), Some("100px"));
        assert_eq!(f.doc.style(c, "width"), Some("96px"));
        assert_eq!(f.doc.style(fixed, "float"), Some("left"));
        assert_eq!(f.doc.style(fixed, "height"), Some("100px"));

        assert_eq!(f.registry.len(), 1);
        assert_eq!(f.timers.pending(), 1);
    }

    #[test]
    fn test_manual_skips_hidden_children() {
        let mut f = setup(Platform::manual());
        let hidden = f.child(None, FlexWeight::Flag(true));
        f.doc.set_showing(hidden, false);
        let a = f.child(None, FlexWeight::Flag(true));
        let b = f.child(None, FlexWeight::Flag(true));
        let container = f.container;
        let layout = FlexLayout::horizontal(container, &mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());

        assert_eq!(f.doc.style(a, "width"), Some("200px"));
        assert_eq!(f.doc.style(b, "width"), Some("200px"));
        assert_eq!(f.doc.style(hidden, "width"), None);
        assert_eq!(f.doc.style(hidden, "float"), None);
    }

    #[test]
    fn test_manual_floor_slack() {
        let mut f = setup(Platform::manual());
        let fixed = f.child(Some("99px"), FlexWeight::Unset);
        let flexible: Vec<_> = (0..3).map(|_| f.child(None, FlexWeight::Flag(true))).collect();
        let container = f.container;
        let layout = FlexLayout::horizontal(container, &mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());

        // 301 / 3 floors to 100, leaving 1px unassigned
        let assigned: i32 = flexible
            .iter()
            .map(|&c| f.doc.offset_width(c))
            .sum();
        assert_eq!(assigned, 300);
        assert!(assigned + f.doc.offset_width(fixed) <= 400);
    }

    #[test]
    fn test_manual_repeat_scheduled_once() {
        let mut f = setup(Platform::manual());
        f.child(None, FlexWeight::Flag(true));
        let container = f.container;
        let layout = FlexLayout::vertical(container, &mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());

        assert_eq!(f.timers.pending(), 1);
        assert_eq!(f.registry.len(), 1);
    }

    #[test]
    fn test_destroy_unregisters() {
        let mut f = setup(Platform::manual());
        let container = f.container;
        let layout = FlexLayout::horizontal(container, &mut f.cx());
        layout.borrow_mut().reflow(&mut f.cx());
        assert!(f.registry.is_registered(&layout.borrow().handle()));

        layout.borrow().destroy(&mut f.cx());
        assert!(f.registry.is_empty());
    }
}
