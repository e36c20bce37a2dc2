//! Styles - class stylesheet, computed values and CSS value parsing.
//!
//! An element's computed value for a property is its inline style when set,
//! otherwise the last stylesheet rule matching one of its classes.

mod sheet;
pub mod value;

pub use sheet::{StyleRule, StyleSheet};
pub use value::{Length, expand_shorthand, parse_length, parse_px, parse_translate, px};

/// Class names applied by the layout engines.
pub mod classes {
    /// Manual fittable container, horizontal.
    pub const FITTABLE_COLUMNS: &str = "enyo-fittable-columns-layout";
    /// Manual fittable container, vertical.
    pub const FITTABLE_ROWS: &str = "enyo-fittable-rows-layout";
    /// Native flex container (paired with [`COLUMNS`] or [`ROWS`]).
    pub const FLEX_CONTAINER: &str = "enyo-flex-container";
    pub const COLUMNS: &str = "columns";
    pub const ROWS: &str = "rows";
    /// Children stretch across the cross axis.
    pub const STRETCH: &str = "enyo-stretch";
    /// Native flex container opted out of stretching.
    pub const NO_STRETCH: &str = "nostretch";
    /// Every child of a native flex container.
    pub const FLEX_ITEM: &str = "enyo-flex-item";
    /// Fit children of a native flex container.
    pub const FLEX: &str = "flex";
    /// Container that stays LTR inside an RTL document.
    pub const FORCE_LTR: &str = "force-left-to-right";
    /// Horizontal flex-polyfill container.
    pub const HFLEX: &str = "enyo-hflex-layout";
    /// Vertical flex-polyfill container.
    pub const VFLEX: &str = "enyo-vflex-layout";
}
