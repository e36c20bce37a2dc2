//! Class stylesheet.
//!
//! A flat list of single-class rules. When several rules match an element the
//! one declared last wins, which is enough to model the framework's layout
//! classes (`enyo-stretch` overriding the fittable defaults, `.flex` on top of
//! `.enyo-flex-item`, and so on).

use super::classes;
use super::value::expand_shorthand;

/// A rule matching every element carrying `class`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub class: String,
    /// Longhand declarations, shorthands already expanded.
    pub declarations: Vec<(String, String)>,
}

/// Ordered set of class rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// An empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules the layout classes rely on.
    pub fn framework() -> Self {
        let mut sheet = Self::new();

        // Fittable (manual) containers
        sheet.add_rule(
            classes::FITTABLE_COLUMNS,
            &[("display", "flex"), ("flex-direction", "row"), ("align-items", "flex-start")],
        );
        sheet.add_rule(
            classes::FITTABLE_ROWS,
            &[("display", "flex"), ("flex-direction", "column"), ("align-items", "stretch")],
        );

        // Native flex containers
        sheet.add_rule(classes::FLEX_CONTAINER, &[("display", "flex")]);
        sheet.add_rule(classes::COLUMNS, &[("flex-direction", "row")]);
        sheet.add_rule(classes::ROWS, &[("flex-direction", "column")]);
        sheet.add_rule(classes::STRETCH, &[("align-items", "stretch")]);
        sheet.add_rule(classes::NO_STRETCH, &[("align-items", "flex-start")]);
        sheet.add_rule(classes::FLEX_ITEM, &[("flex-shrink", "0")]);
        sheet.add_rule(classes::FLEX, &[("flex-grow", "1"), ("flex-basis", "0px")]);

        sheet.add_rule(classes::FORCE_LTR, &[("direction", "ltr")]);

        sheet
    }

    /// Append a rule. Later rules take precedence over earlier ones.
    pub fn add_rule(&mut self, class: &str, declarations: &[(&str, &str)]) {
        let declarations = declarations
            .iter()
            .flat_map(|(name, value)| expand_shorthand(name, value))
            .collect();
        self.rules.push(StyleRule {
            class: class.to_string(),
            declarations,
        });
    }

    /// Value of `property` for an element with `element_classes`, if any rule sets it.
    pub fn lookup(&self, element_classes: &[String], property: &str) -> Option<&str> {
        self.rules
            .iter()
            .rev()
            .filter(|rule| element_classes.iter().any(|c| *c == rule.class))
            .find_map(|rule| {
                rule.declarations
                    .iter()
                    .rev()
                    .find(|(name, _)| name == property)
                    .map(|(_, value)| value.as_str())
            })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
