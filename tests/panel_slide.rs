//! Panel slide arranger driven through a full transition.

use spark_layouts::{
    Arranger, Document, ElementId, LayoutError, PanelSlideArranger, SlideState,
};

fn setup(panels: usize) -> (Document, ElementId, Vec<ElementId>) {
    let mut doc = Document::new(800, 600);
    let container = doc.create_element();
    doc.append_child(doc.body(), container);
    doc.set_styles(container, &[("width", "300px"), ("height", "200px")]);

    let panels = (0..panels)
        .map(|_| {
            let panel = doc.create_element();
            doc.append_child(container, panel);
            panel
        })
        .collect();
    (doc, container, panels)
}

fn lefts(doc: &Document, panels: &[ElementId]) -> Vec<Option<String>> {
    panels
        .iter()
        .map(|&p| doc.style(p, "left").map(str::to_string))
        .collect()
}

fn px(values: &[i32]) -> Vec<Option<String>> {
    values.iter().map(|v| Some(format!("{v}px"))).collect()
}

#[test]
fn test_start_shows_two_panels() {
    let (mut doc, container, panels) = setup(4);
    for &panel in &panels {
        doc.set_showing(panel, false);
    }
    doc.set_showing(panels[0], true);

    let mut arranger = PanelSlideArranger::new(container);
    let mut resized = Vec::new();
    arranger
        .start(&mut doc, 0, 2, &mut |panel| resized.push(panel))
        .unwrap();

    let showing: Vec<bool> = panels.iter().map(|&p| doc.showing(p)).collect();
    assert_eq!(showing, [true, false, true, false]);
    // Only the panel that was hidden gets resized
    assert_eq!(resized, [panels[2]]);
    assert_eq!(arranger.transition_points(), ["2.0.s", "2.0.f"]);
    assert_eq!(arranger.base().container_bounds.width, 300);
    assert_eq!(arranger.state(), SlideState::Starting);
}

#[test]
fn test_arrange_keyframes() {
    let (mut doc, container, panels) = setup(4);
    let mut arranger = PanelSlideArranger::new(container);
    arranger.start(&mut doc, 0, 2, &mut |_| {}).unwrap();

    arranger.arrange(&mut doc, "2.0.s").unwrap();
    assert_eq!(lefts(&doc, &panels), px(&[0, 300, 300, 300]));

    arranger.arrange(&mut doc, "2.0.f").unwrap();
    assert_eq!(lefts(&doc, &panels), px(&[-300, 300, 0, 300]));
    assert_eq!(arranger.state(), SlideState::Finishing);
}

#[test]
fn test_arrange_same_panel() {
    let (mut doc, container, panels) = setup(3);
    let mut arranger = PanelSlideArranger::new(container);
    arranger.start(&mut doc, 1, 1, &mut |_| {}).unwrap();

    arranger.arrange(&mut doc, "1.1.s").unwrap();
    assert_eq!(lefts(&doc, &panels), px(&[300, 0, 300]));
    arranger.arrange(&mut doc, "1.1.f").unwrap();
    assert_eq!(lefts(&doc, &panels), px(&[300, 0, 300]));
}

#[test]
fn test_malformed_keyframe_leaves_panels_alone() {
    let (mut doc, container, panels) = setup(3);
    let mut arranger = PanelSlideArranger::new(container);
    arranger.start(&mut doc, 0, 1, &mut |_| {}).unwrap();

    let err = arranger.arrange(&mut doc, "1.0").unwrap_err();
    assert!(matches!(err, LayoutError::MalformedTransition { ref name, .. } if name == "1.0"));
    assert_eq!(lefts(&doc, &panels), vec![None, None, None]);
}

#[test]
fn test_finish_shows_target_only() {
    let (mut doc, container, panels) = setup(3);
    let mut arranger = PanelSlideArranger::new(container);
    arranger.start(&mut doc, 0, 2, &mut |_| {}).unwrap();
    arranger.arrange(&mut doc, "2.0.f").unwrap();
    arranger.finish(&mut doc);

    let showing: Vec<bool> = panels.iter().map(|&p| doc.showing(p)).collect();
    assert_eq!(showing, [false, false, true]);
    assert!(arranger.transition_points().is_empty());
    assert_eq!(arranger.state(), SlideState::Idle);
}

#[test]
fn test_destroy_clears_positions() {
    let (mut doc, container, panels) = setup(3);
    let mut arranger = PanelSlideArranger::new(container);
    arranger.start(&mut doc, 0, 1, &mut |_| {}).unwrap();
    arranger.arrange(&mut doc, "1.0.s").unwrap();
    assert!(doc.style(panels[1], "left").is_some());

    arranger.destroy(&mut doc);
    assert_eq!(lefts(&doc, &panels), vec![None, None, None]);
}
