//! Selection, dragging, panning, and deletion.

use crate::common::{TestHarness, mutations};
use skilltree_core::Position;
use skilltree_editor::{
    ContextActionKind, EditorEvent, MouseState, Mutation, Notification, PointerButton,
};

#[test]
fn test_two_node_delete_scenario() {
    let mut h = TestHarness::new();
    let a = h.add_skill(0.0, 0.0);
    let b = h.add_skill(100.0, 0.0);
    h.menu(ContextActionKind::SetPrerequisite, b);
    h.release_on(a);

    {
        let store = h.session.editor().store();
        assert_eq!(store.get_node(b).unwrap().prerequisite_ids.len(), 1);
        assert!(store.get_node(a).unwrap().postrequisite_ids.contains(&b));
    }

    h.click(a);
    let out = h.send(EditorEvent::DeleteKeyPressed);
    assert_eq!(mutations(&out), vec![Mutation::Removed(a)]);

    let store = h.session.editor().store();
    assert!(!store.contains(a));
    assert!(store.get_node(b).unwrap().prerequisite_ids.is_empty());
}

#[test]
fn test_drag_then_snap() {
    let mut h = TestHarness::new();
    let a = h.add_skill(0.0, 0.0);

    h.send(EditorEvent::press(
        PointerButton::Primary,
        Position::new(0.0, 0.0),
        Some(a),
    ));
    for step in 1..=4 {
        let out = h.send(EditorEvent::moved(
            Position::new(f64::from(step) * 20.0, 0.0),
            Some(a),
        ));
        assert!(mutations(&out).is_empty());
    }
    let out = h.send(EditorEvent::release(
        PointerButton::Primary,
        Position::new(80.0, 0.0),
        Some(a),
    ));

    assert_eq!(h.position(a), Position::new(60.0, 0.0));
    assert_eq!(mutations(&out), vec![Mutation::Moved(vec![a])]);
    assert_eq!(h.session.editor().selection(), vec![a]);
}

#[test]
fn test_pan_does_not_touch_graph() {
    let mut h = TestHarness::new();
    let a = h.add_skill(0.0, 0.0);

    h.send(EditorEvent::press(
        PointerButton::Middle,
        Position::new(0.0, 0.0),
        None,
    ));
    assert_eq!(h.session.editor().state(), MouseState::Panning);
    let out = h.send(EditorEvent::moved(Position::new(-40.0, 25.0), None));
    assert_eq!(
        out,
        vec![Notification::ViewportScrolled { dx: 40.0, dy: -25.0 }]
    );
    h.send(EditorEvent::release(
        PointerButton::Middle,
        Position::new(-40.0, 25.0),
        None,
    ));

    assert_eq!(h.session.editor().state(), MouseState::Idle);
    assert_eq!(h.position(a), Position::new(0.0, 0.0));
}

#[test]
fn test_secondary_button_is_left_to_menus() {
    let mut h = TestHarness::new();
    let a = h.add_skill(0.0, 0.0);
    let out = h.send(EditorEvent::press(
        PointerButton::Secondary,
        Position::new(0.0, 0.0),
        Some(a),
    ));
    assert!(out.is_empty());
    assert_eq!(h.session.editor().state(), MouseState::Idle);
}
