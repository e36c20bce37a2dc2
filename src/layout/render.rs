//! Render Bridge - geometry for the document tree via Taffy.
//!
//! Plays the part of the browser's rendering engine: converts each element's
//! computed style into a Taffy style, builds a Taffy tree from the document,
//! runs layout and extracts border boxes back into a [`RenderedTree`].
//!
//! The style model is deliberately small:
//!
//! - `display: flex` and the legacy `-webkit-box` / `-moz-box` values become
//!   flex containers; everything else is block.
//! - `box-orient`, `box-pack`, `box-align` and `box-flex` map onto their
//!   modern equivalents so both legacy dialects render.
//! - A block whose showing children all float becomes a single row.
//! - Boxes are border-box sized and items do not shrink unless
//!   `flex-shrink` says so.
//! - Hidden elements (`showing == false`) are not rendered.

use std::collections::HashMap;

use log::warn;
use taffy::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, JustifyContent,
    LengthPercentage, LengthPercentageAuto, NodeId, Rect, Size, Style, TaffyTree,
};

use crate::engine::{Document, ElementId};
use crate::error::{LayoutError, Result};
use crate::style::{Length, parse_length, parse_px};
use crate::types::Edges;

// =============================================================================
// OUTPUT
// =============================================================================

/// Border box of one rendered element, relative to its parent's border box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub border: Edges,
}

/// Geometry of every rendered element.
#[derive(Debug, Clone, Default)]
pub struct RenderedTree {
    boxes: HashMap<ElementId, RenderBox>,
}

impl RenderedTree {
    pub fn get(&self, id: ElementId) -> Option<RenderBox> {
        self.boxes.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

// =============================================================================
// VALUE CONVERSION
// =============================================================================

fn to_dimension(length: Length) -> Dimension {
    match length {
        Length::Auto => Dimension::Auto,
        Length::Px(n) => Dimension::Length(n),
        Length::Percent(p) => Dimension::Percent(p),
    }
}

fn to_lpa(value: Option<&str>) -> LengthPercentageAuto {
    match value.map(parse_length) {
        Some(Length::Px(n)) => LengthPercentageAuto::Length(n),
        Some(Length::Percent(p)) => LengthPercentageAuto::Percent(p),
        _ => LengthPercentageAuto::Auto,
    }
}

/// Margins are 0 unless set; only an explicit `auto` is auto.
fn to_margin(value: Option<&str>) -> LengthPercentageAuto {
    match value.map(str::trim) {
        None => LengthPercentageAuto::Length(0.0),
        Some("auto") => LengthPercentageAuto::Auto,
        Some(value) => match parse_length(value) {
            Length::Px(n) => LengthPercentageAuto::Length(n),
            Length::Percent(p) => LengthPercentageAuto::Percent(p),
            Length::Auto => LengthPercentageAuto::Length(0.0),
        },
    }
}

fn to_lp(value: Option<&str>) -> LengthPercentage {
    LengthPercentage::Length(value.and_then(parse_px).unwrap_or(0) as f32)
}

fn is_flex_display(value: &str) -> bool {
    matches!(
        value,
        "flex" | "inline-flex" | "-webkit-box" | "-moz-box" | "-ms-flexbox" | "-webkit-flex"
    )
}

fn to_justify(value: &str) -> Option<JustifyContent> {
    match value {
        "start" | "flex-start" => Some(JustifyContent::FlexStart),
        "center" => Some(JustifyContent::Center),
        "end" | "flex-end" => Some(JustifyContent::FlexEnd),
        "justify" | "space-between" => Some(JustifyContent::SpaceBetween),
        _ => None,
    }
}

fn to_align_items(value: &str) -> Option<AlignItems> {
    match value {
        "start" | "flex-start" => Some(AlignItems::FlexStart),
        "center" => Some(AlignItems::Center),
        "end" | "flex-end" => Some(AlignItems::FlexEnd),
        "baseline" => Some(AlignItems::Baseline),
        "stretch" => Some(AlignItems::Stretch),
        _ => None,
    }
}

/// First computed value among a property and its vendor aliases.
fn first_of<'a>(doc: &'a Document, id: ElementId, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| doc.computed_style(id, name))
}

/// Border widths of an element, in px.
pub(crate) fn border_edges(doc: &Document, id: ElementId) -> Edges {
    let width = |side: &str| {
        doc.computed_style(id, &format!("border-{side}-width"))
            .and_then(parse_px)
            .unwrap_or(0)
    };
    Edges {
        top: width("top"),
        right: width("right"),
        bottom: width("bottom"),
        left: width("left"),
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn box_rect<T>(doc: &Document, id: ElementId, prefix: &str, suffix: &str, f: impl Fn(Option<&str>) -> T) -> Rect<T> {
    let value = |side: &str| f(doc.computed_style(id, &format!("{prefix}-{side}{suffix}")));
    Rect {
        top: value("top"),
        right: value("right"),
        bottom: value("bottom"),
        left: value("left"),
    }
}

/// Whether every showing child of `id` floats.
fn children_float(doc: &Document, id: ElementId) -> bool {
    let children = doc.showing_children(id);
    !children.is_empty()
        && children
            .iter()
            .all(|&c| matches!(doc.computed_style(c, "float"), Some("left" | "right")))
}

fn flex_direction(doc: &Document, id: ElementId) -> FlexDirection {
    let row = match doc.computed_style(id, "flex-direction") {
        Some("column") => return FlexDirection::Column,
        Some("column-reverse") => return FlexDirection::ColumnReverse,
        Some("row-reverse") => return FlexDirection::RowReverse,
        Some(_) => true,
        None => !matches!(
            first_of(doc, id, &["-webkit-box-orient", "-moz-box-orient"]),
            Some("vertical" | "block-axis")
        ),
    };

    let rtl = match doc.computed_style(id, "direction") {
        Some(direction) => direction == "rtl",
        None => doc.is_rtl(id),
    };

    match (row, rtl) {
        (true, true) => FlexDirection::RowReverse,
        (true, false) => FlexDirection::Row,
        (false, _) => FlexDirection::Column,
    }
}

/// Convert an element's computed style to a Taffy style.
fn build_style(doc: &Document, id: ElementId) -> Style {
    let cs = |name: &str| doc.computed_style(id, name);

    let mut style = Style {
        display: Display::Block,
        size: Size {
            width: to_dimension(cs("width").map(parse_length).unwrap_or(Length::Auto)),
            height: to_dimension(cs("height").map(parse_length).unwrap_or(Length::Auto)),
        },
        margin: box_rect(doc, id, "margin", "", to_margin),
        padding: box_rect(doc, id, "padding", "", to_lp),
        border: box_rect(doc, id, "border", "-width", to_lp),
        inset: Rect {
            top: to_lpa(cs("top")),
            right: to_lpa(cs("right")),
            bottom: to_lpa(cs("bottom")),
            left: to_lpa(cs("left")),
        },
        flex_grow: first_of(doc, id, &["flex-grow", "-webkit-box-flex", "-moz-box-flex"])
            .and_then(|v| v.trim().parse::<f32>().ok())
            .unwrap_or(0.0),
        flex_shrink: cs("flex-shrink")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .unwrap_or(0.0),
        flex_basis: to_dimension(cs("flex-basis").map(parse_length).unwrap_or(Length::Auto)),
        ..Default::default()
    };

    match cs("display") {
        Some("none") => style.display = Display::None,
        Some(display) if is_flex_display(display) => {
            style.display = Display::Flex;
            style.flex_direction = flex_direction(doc, id);
            style.justify_content = first_of(doc, id, &["justify-content", "-webkit-box-pack", "-moz-box-pack"])
                .and_then(to_justify);
            style.align_items = first_of(doc, id, &["align-items", "-webkit-box-align", "-moz-box-align"])
                .and_then(to_align_items);
        }
        _ if children_float(doc, id) => {
            style.display = Display::Flex;
            style.flex_direction = FlexDirection::Row;
            style.align_items = Some(AlignItems::FlexStart);
        }
        _ => {}
    }

    style
}

// =============================================================================
// MEASUREMENT
// =============================================================================

/// Natural size of a leaf: its intrinsic size, or one line of glyphs.
fn measure_leaf(
    doc: &Document,
    id: ElementId,
    known_dimensions: Size<Option<f32>>,
) -> Size<f32> {
    let natural = doc.intrinsic_size(id).unwrap_or_else(|| {
        let content = doc.content(id);
        if content.is_empty() {
            (0.0, 0.0)
        } else {
            let (glyph_w, glyph_h) = doc.glyph_size();
            (content.chars().count() as f32 * glyph_w, glyph_h)
        }
    });

    Size {
        width: known_dimensions.width.unwrap_or(natural.0),
        height: known_dimensions.height.unwrap_or(natural.1),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out the whole document.
///
/// Failures inside Taffy are logged and produce an empty tree, so every
/// measurement reads as zero rather than panicking mid-layout.
pub fn render(doc: &Document) -> RenderedTree {
    match compute(doc) {
        Ok(tree) => tree,
        Err(err) => {
            warn!("{err}");
            RenderedTree::default()
        }
    }
}

fn build_node(
    doc: &Document,
    tree: &mut TaffyTree<ElementId>,
    id: ElementId,
    nodes: &mut Vec<(ElementId, NodeId)>,
) -> Result<NodeId> {
    let style = build_style(doc, id);
    let children = doc.showing_children(id);

    let created = if children.is_empty() {
        tree.new_leaf_with_context(style, id)
    } else {
        let mut child_nodes = Vec::with_capacity(children.len());
        for child in children {
            child_nodes.push(build_node(doc, tree, child, nodes)?);
        }
        tree.new_with_children(style, &child_nodes)
    };
    let node = created.map_err(|e| LayoutError::Render(e.to_string()))?;

    nodes.push((id, node));
    Ok(node)
}

fn compute(doc: &Document) -> Result<RenderedTree> {
    let mut tree: TaffyTree<ElementId> = TaffyTree::new();
    let mut nodes: Vec<(ElementId, NodeId)> = Vec::new();

    let body = doc.body();
    let root = build_node(doc, &mut tree, body, &mut nodes)?;

    let viewport = |name: &str| {
        doc.style(body, name)
            .and_then(parse_px)
            .map(|n| AvailableSpace::Definite(n as f32))
            .unwrap_or(AvailableSpace::MaxContent)
    };
    let available = Size {
        width: viewport("width"),
        height: viewport("height"),
    };

    tree.compute_layout_with_measure(
        root,
        available,
        |known_dimensions, _available_space, _node_id, context: Option<&mut ElementId>, _style| {
            match context {
                Some(id) => measure_leaf(doc, *id, known_dimensions),
                None => Size::ZERO,
            }
        },
    )
    .map_err(|e| LayoutError::Render(e.to_string()))?;

    let mut boxes = HashMap::with_capacity(nodes.len());
    for (id, node) in nodes {
        let layout = tree.layout(node).map_err(|e| LayoutError::Render(e.to_string()))?;
        boxes.insert(
            id,
            RenderBox {
                x: layout.location.x.round() as i32,
                y: layout.location.y.round() as i32,
                width: layout.size.width.round() as i32,
                height: layout.size.height.round() as i32,
                border: border_edges(doc, id),
            },
        );
    }

    Ok(RenderedTree { boxes })
}
