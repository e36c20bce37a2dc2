//! Geometry - bounds and box-model measurements of rendered elements.
//!
//! Everything here reads through the [`Document`]'s measurement accessors, so
//! calling any of these functions forces a render when geometry is stale.
//! Missing or unparseable style values count as 0.

use crate::engine::{Document, ElementId};
use crate::style::{parse_px, parse_translate};
use crate::types::{Bounds, BoxSums, Edges, Side, SumStyles};

/// Inline properties a translate transform may be set through.
const TRANSFORM_PROPS: [&str; 2] = ["transform", "-webkit-transform"];

/// Translation applied to an element by its inline transform style.
fn inline_translate(doc: &Document, el: ElementId) -> (i32, i32) {
    TRANSFORM_PROPS
        .iter()
        .find_map(|prop| doc.style(el, prop))
        .map(parse_translate)
        .unwrap_or((0, 0))
}

/// Bounds relative to the document.
///
/// Walks the offset-parent chain summing offsets, minus each offset parent's
/// scroll position, plus any translate found in an element's inline
/// transform. `bottom` and `right` are measured from the body's far edges.
pub fn absolute_bounds(doc: &Document, el: ElementId) -> Bounds {
    let width = doc.offset_width(el);
    let height = doc.offset_height(el);
    let mut left = 0;
    let mut top = 0;

    if doc.offset_parent(el).is_some() {
        let mut node = Some(el);
        while let Some(current) = node {
            let parent = doc.offset_parent(current);
            let (scroll_left, scroll_top) = parent
                .map(|p| (doc.scroll_left(p), doc.scroll_top(p)))
                .unwrap_or((0, 0));
            left += doc.offset_left(current) - scroll_left;
            top += doc.offset_top(current) - scroll_top;

            let (tx, ty) = inline_translate(doc, current);
            left += tx;
            top += ty;

            node = parent;
        }
    }

    let body = doc.body();
    Bounds {
        top,
        left,
        bottom: doc.offset_height(body) - top - height,
        right: doc.offset_width(body) - left - width,
        width,
        height,
    }
}

/// Bounds relative to the offset parent's padding edge.
///
/// `bottom` and `right` are distances from the offset parent's client edges.
pub fn bounds(doc: &Document, el: ElementId) -> Bounds {
    let left = doc.offset_left(el);
    let top = doc.offset_top(el);
    let width = doc.offset_width(el);
    let height = doc.offset_height(el);
    let (client_width, client_height) = doc
        .offset_parent(el)
        .map(|p| (doc.client_width(p), doc.client_height(p)))
        .unwrap_or((0, 0));

    Bounds {
        top,
        left,
        bottom: client_height - top - height,
        right: client_width - left - width,
        width,
        height,
    }
}

/// Computed value of one side of a box property, in px.
///
/// `property` is `"margin"`, `"padding"` or `"border"`; borders read the
/// `border-{side}-width` longhand.
pub fn computed_box_value(doc: &Document, el: ElementId, property: &str, side: Side) -> i32 {
    let name = match property {
        "border" => format!("border-{}-width", side.as_css()),
        _ => format!("{property}-{}", side.as_css()),
    };
    doc.computed_style(el, &name).and_then(parse_px).unwrap_or(0)
}

/// Computed padding on every side.
pub fn padding_extents(doc: &Document, el: ElementId) -> Edges {
    let padding = |side| computed_box_value(doc, el, "padding", side);
    Edges {
        top: padding(Side::Top),
        right: padding(Side::Right),
        bottom: padding(Side::Bottom),
        left: padding(Side::Left),
    }
}

fn sum_axis(doc: &Document, el: ElementId, a: Side, b: Side) -> BoxSums {
    let sum = |property| computed_box_value(doc, el, property, a) + computed_box_value(doc, el, property, b);
    BoxSums {
        margin: sum("margin"),
        border: sum("border"),
        padding: sum("padding"),
    }
}

/// Margin, border and padding summed per axis.
pub fn sum_styles(doc: &Document, el: ElementId) -> SumStyles {
    SumStyles {
        h: sum_axis(doc, el, Side::Left, Side::Right),
        v: sum_axis(doc, el, Side::Top, Side::Bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new(400, 300);
        let outer = doc.create_element();
        doc.append_child(doc.body(), outer);
        doc.set_styles(outer, &[("height", "200px"), ("padding", "10px 20px")]);
        let inner = doc.create_element();
        doc.append_child(outer, inner);
        doc.set_styles(inner, &[("width", "50px"), ("height", "30px"), ("margin-top", "5px")]);
        (doc, outer, inner)
    }

    #[test]
    fn test_absolute_bounds() {
        let (doc, _, inner) = setup();
        let b = absolute_bounds(&doc, inner);
        assert_eq!((b.left, b.top, b.width, b.height), (20, 15, 50, 30));
        assert_eq!(b.right, 400 - 20 - 50);
        assert_eq!(b.bottom, 300 - 15 - 30);
    }

    #[test]
    fn test_absolute_bounds_scroll_and_translate() {
        let (mut doc, outer, inner) = setup();
        doc.set_scroll(outer, 0, 7);
        doc.set_style(inner, "transform", "translateX(-20px)");
        let b = absolute_bounds(&doc, inner);
        assert_eq!((b.left, b.top), (0, 8));
    }

    #[test]
    fn test_detached_element_has_zero_origin() {
        let (mut doc, _, _) = setup();
        let loose = doc.create_element();
        let b = absolute_bounds(&doc, loose);
        assert_eq!((b.left, b.top, b.width), (0, 0, 0));
    }

    #[test]
    fn test_relative_bounds() {
        let (doc, _, inner) = setup();
        let b = bounds(&doc, inner);
        assert_eq!((b.left, b.top), (20, 15));
        assert_eq!(b.right, 400 - 20 - 50);
    }

    #[test]
    fn test_box_values() {
        let (mut doc, outer, inner) = setup();
        doc.set_style(inner, "border", "1px solid");
        assert_eq!(computed_box_value(&doc, inner, "margin", Side::Top), 5);
        assert_eq!(computed_box_value(&doc, inner, "border", Side::Left), 1);
        assert_eq!(computed_box_value(&doc, inner, "padding", Side::Left), 0);

        let padding = padding_extents(&doc, outer);
        assert_eq!(padding, Edges { top: 10, right: 20, bottom: 10, left: 20 });
    }

    #[test]
    fn test_sum_styles() {
        let (mut doc, _, inner) = setup();
        doc.set_styles(inner, &[("border", "2px solid"), ("padding", "3px")]);
        let sums = sum_styles(&doc, inner);
        assert_eq!(sums.h, BoxSums { margin: 0, border: 4, padding: 6 });
        assert_eq!(sums.v.offset(), 5 + 4 + 6);
    }
}
