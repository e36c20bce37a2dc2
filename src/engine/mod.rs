//! Engine - the element tree layouts operate on.
//!
//! - Element: one node, addressed by [`ElementId`]
//! - Document: the arena, computed styles and measurement
//! - Invalidator: change notifications that re-run manual layouts
//!
//! # Architecture
//!
//! Elements are not objects. They are slots in the document's arena, and
//! layouts hold only ids:
//!
//! ```text
//! 0: body  (children=[1],    width=800px, height=600px)
//! 1: row   (children=[2, 3], classes=[enyo-fittable-columns-layout])
//! 2: label (content="Name")
//! 3: input (fit=true)
//! ```

mod document;
mod element;
pub mod invalidator;

pub use document::Document;
pub use element::{Element, ElementId, LayoutAttrs};
pub use invalidator::{ChangeKind, FlexInvalidator, Invalidatable, NoopInvalidator};
