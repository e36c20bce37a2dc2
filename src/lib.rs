//! # spark-layouts
//!
//! Fittable and flex layouts plus panel transitions for a widget framework.
//!
//! ## Architecture
//!
//! Layouts operate on a [`Document`]: an arena of elements with classes,
//! inline styles and layout attributes. Geometry comes from a lazy render
//! pass backed by [Taffy](https://github.com/DioxusLabs/taffy), so layouts
//! measure, compute and write styles exactly as they would against a live
//! page:
//!
//! ```text
//! Document (styles) → render → offsets / client sizes → layout → inline styles
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Geometry and attribute types (Bounds, Orientation, Pack, ...)
//! - [`style`] - Class stylesheet, computed values, CSS value parsing
//! - [`engine`] - Element arena, document, invalidation hooks
//! - [`layout`] - Platform detection, fittable and flex layouts, registry
//! - [`arrangers`] - Panel transition arrangers
//! - [`runtime`] - The root object owning document and services

pub mod arrangers;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod runtime;
pub mod style;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::LayoutConfig;
pub use error::{LayoutError, Result};

pub use engine::{
    ChangeKind, Document, Element, ElementId, FlexInvalidator, Invalidatable, LayoutAttrs,
    NoopInvalidator,
};

pub use layout::{
    EngineFamily, FeatureProbe, FittableLayout, FlexHandle, FlexLayout, FlexRegistry,
    FlexStrategy, FlexSupport, Layout, LayoutContext, Platform, Timers, UserAgentProbe,
};

pub use arrangers::{Arranger, ArrangerBase, PanelSlideArranger, SlideState, TransitionPoint};

pub use runtime::LayoutRuntime;

pub use style::{StyleSheet, classes};
