//! CSS value helpers - lengths, shorthands and translate transforms.
//!
//! Only the small subset of CSS the layout engines read and write is
//! understood. Anything else is treated as "no value".

/// A resolved length for the render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Auto,
    Px(f32),
    /// Fraction in `0.0..=1.0`.
    Percent(f32),
}

/// Parse `"12px"`, `"12"` or `"-3.5px"` into whole pixels.
///
/// Fractions are truncated toward zero, as integer parsing of a computed
/// value would.
pub fn parse_px(value: &str) -> Option<i32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f32>().ok().map(|n| n.trunc() as i32)
}

/// Parse a size value (`auto`, `px`, `%`).
pub fn parse_length(value: &str) -> Length {
    let value = value.trim();
    if let Some(percent) = value.strip_suffix('%') {
        return percent
            .trim()
            .parse::<f32>()
            .map(|p| Length::Percent(p / 100.0))
            .unwrap_or(Length::Auto);
    }
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f32>().map(Length::Px).unwrap_or(Length::Auto)
}

/// Format whole pixels the way inline styles carry them.
pub fn px(value: i32) -> String {
    format!("{value}px")
}

// =============================================================================
// SHORTHANDS
// =============================================================================

/// Expand a shorthand declaration into longhands.
///
/// `margin`, `padding`, `border-width` take one to four values in CSS order
/// (top, right, bottom, left). `border` keeps only its width component.
/// Unknown properties pass through unchanged.
pub fn expand_shorthand(name: &str, value: &str) -> Vec<(String, String)> {
    match name {
        "margin" | "padding" => four_sides(value)
            .map(|sides| {
                SIDE_NAMES
                    .iter()
                    .zip(sides)
                    .map(|(side, v)| (format!("{name}-{side}"), v))
                    .collect()
            })
            .unwrap_or_else(|| vec![(name.to_string(), value.to_string())]),
        "border-width" => four_sides(value)
            .map(|sides| {
                SIDE_NAMES
                    .iter()
                    .zip(sides)
                    .map(|(side, v)| (format!("border-{side}-width"), v))
                    .collect()
            })
            .unwrap_or_else(|| vec![(name.to_string(), value.to_string())]),
        "border" => {
            let width = border_width_token(value);
            SIDE_NAMES
                .iter()
                .map(|side| (format!("border-{side}-width"), width.clone()))
                .collect()
        }
        _ => vec![(name.to_string(), value.to_string())],
    }
}

const SIDE_NAMES: [&str; 4] = ["top", "right", "bottom", "left"];

fn four_sides(value: &str) -> Option<[String; 4]> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [top, right, bottom, left] = match parts.as_slice() {
        [all] => [*all; 4],
        [tb, rl] => [*tb, *rl, *tb, *rl],
        [t, rl, b] => [*t, *rl, *b, *rl],
        [t, r, b, l] => [*t, *r, *b, *l],
        _ => return None,
    };
    Some([top.into(), right.into(), bottom.into(), left.into()])
}

/// The width part of a `border` shorthand; `none` and missing widths are 0.
fn border_width_token(value: &str) -> String {
    value
        .split_whitespace()
        .find(|token| parse_px(token).is_some())
        .unwrap_or("0")
        .to_string()
}

// =============================================================================
// TRANSFORMS
// =============================================================================

/// Horizontal and vertical pixel translation found in a `transform` value.
///
/// Understands `translateX(..px)`, `translateY(..px)`, `translate(x[, y])`
/// and `translate3d(x, y, z)`; other functions are ignored.
pub fn parse_translate(transform: &str) -> (i32, i32) {
    let mut x = 0;
    let mut y = 0;
    let mut rest = transform;

    while let Some(open) = rest.find('(') {
        let function = rest[..open].trim().rsplit(|c: char| c.is_whitespace()).next().unwrap_or("");
        let Some(close) = rest[open..].find(')') else { break };
        let args: Vec<&str> = rest[open + 1..open + close].split(',').map(str::trim).collect();

        match function.to_ascii_lowercase().as_str() {
            "translatex" => x += arg_px(&args, 0),
            "translatey" => y += arg_px(&args, 0),
            "translate" | "translate3d" => {
                x += arg_px(&args, 0);
                y += arg_px(&args, 1);
            }
            _ => {}
        }
        rest = &rest[open + close + 1..];
    }

    (x, y)
}

fn arg_px(args: &[&str], index: usize) -> i32 {
    args.get(index)
        .filter(|arg| arg.ends_with("px") || **arg == "0")
        .and_then(|arg| parse_px(arg))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("10px"), Some(10));
        assert_eq!(parse_px("0"), Some(0));
        assert_eq!(parse_px("-7px"), Some(-7));
        assert_eq!(parse_px("12.9px"), Some(12));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px(""), None);
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("100%"), Length::Percent(1.0));
        assert_eq!(parse_length("42px"), Length::Px(42.0));
        assert_eq!(parse_length("auto"), Length::Auto);
    }

    #[test]
    fn test_expand_margin() {
        let expanded = expand_shorthand("margin", "1px 2px");
        assert_eq!(
            expanded,
            vec![
                ("margin-top".to_string(), "1px".to_string()),
                ("margin-right".to_string(), "2px".to_string()),
                ("margin-bottom".to_string(), "1px".to_string()),
                ("margin-left".to_string(), "2px".to_string()),
            ]
        );
    }

    #[test]
    fn test_expand_border() {
        let expanded = expand_shorthand("border", "3px solid red");
        assert_eq!(expanded.len(), 4);
        assert!(expanded.iter().all(|(name, v)| name.ends_with("-width") && v == "3px"));

        let none = expand_shorthand("border", "none");
        assert!(none.iter().all(|(_, v)| v == "0"));
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(
            expand_shorthand("width", "10px"),
            vec![("width".to_string(), "10px".to_string())]
        );
    }

    #[test]
    fn test_parse_translate() {
        assert_eq!(parse_translate("translateX(-20px)"), (-20, 0));
        assert_eq!(parse_translate("translateX(5px) translateY(7px)"), (5, 7));
        assert_eq!(parse_translate("translate3d(3px, 4px, 0)"), (3, 4));
        assert_eq!(parse_translate("scale(2) translate(10px)"), (10, 0));
        assert_eq!(parse_translate("rotate(45deg)"), (0, 0));
        assert_eq!(parse_translate(""), (0, 0));
    }
}
