//! Layout Module - fittable and flex layouts over the document tree.
//!
//! # Architecture
//!
//! Layout engines never compute geometry themselves. They read measurements
//! from the [`Document`](crate::Document), which renders lazily through
//! [Taffy](https://github.com/DioxusLabs/taffy), and write inline styles
//! back:
//!
//! 1. `render` converts computed styles to Taffy styles and lays out the tree
//! 2. `geometry` turns rendered boxes into bounds and box-model sums
//! 3. `fittable` and `flex` measure, compute and write sizes
//! 4. `registry` and `timers` keep manual flex layouts up to date
//!
//! # Example
//!
//! ```ignore
//! use spark_layouts::{Document, LayoutRuntime, Platform};
//!
//! let mut runtime = LayoutRuntime::new(Document::new(800, 600), Platform::webkit());
//! let mut layout = runtime.fittable_columns(container);
//! runtime.flow(&mut layout);
//! runtime.reflow(&mut layout);
//! ```

mod context;
mod detect;
mod fittable;
mod flex;
pub mod geometry;
mod registry;
pub(crate) mod render;
mod timers;

pub use context::{Layout, LayoutContext};
pub use detect::{EngineFamily, FeatureProbe, FlexSupport, Platform, UserAgentProbe};
pub use fittable::FittableLayout;
pub use flex::{FlexHandle, FlexLayout, FlexStrategy};
pub use registry::{FlexRef, FlexRegistry};
pub use render::{RenderBox, RenderedTree};
pub use timers::Timers;
