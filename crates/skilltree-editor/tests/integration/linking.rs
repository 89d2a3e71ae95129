//! Link and unlink gestures end to end.

use crate::common::{TestHarness, mutations};
use skilltree_core::Position;
use skilltree_editor::{ContextActionKind, EditorEvent, MouseState, Mutation, PointerButton};

#[test]
fn test_set_prerequisite_then_pick_other_node() {
    let mut h = TestHarness::new();
    let x = h.add_skill(0.0, 0.0);
    let y = h.add_skill(120.0, 0.0);

    h.menu(ContextActionKind::SetPrerequisite, x);
    assert_eq!(h.session.editor().state(), MouseState::SelectingPrerequisite);

    let out = h.release_on(y);
    assert_eq!(h.session.editor().state(), MouseState::Idle);
    assert_eq!(
        mutations(&out),
        vec![Mutation::Linked {
            prereq: y,
            postreq: x
        }]
    );

    let store = h.session.editor().store();
    assert!(store.get_node(x).unwrap().prerequisite_ids.contains(&y));
    assert!(store.get_node(y).unwrap().postrequisite_ids.contains(&x));
}

#[test]
fn test_set_prerequisite_then_pick_same_node() {
    let mut h = TestHarness::new();
    let x = h.add_skill(0.0, 0.0);

    h.menu(ContextActionKind::SetPrerequisite, x);
    let out = h.release_on(x);

    assert!(out.is_empty());
    assert_eq!(h.session.editor().state(), MouseState::SelectingPrerequisite);
    assert_eq!(h.session.editor().store().edge_count(), 0);
}

#[test]
fn test_chain_built_from_both_menus() {
    let mut h = TestHarness::new();
    let a = h.add_skill(0.0, 0.0);
    let b = h.add_skill(0.0, 60.0);
    let c = h.add_skill(0.0, 120.0);

    h.menu(ContextActionKind::SetPostrequisite, a);
    h.release_on(b);
    h.menu(ContextActionKind::SetPrerequisite, c);
    h.release_on(b);

    let store = h.session.editor().store();
    assert_eq!(store.edges(), vec![(a, b), (b, c)]);
    assert!(store.check_invariants().is_empty());
}

#[test]
fn test_unlink_gesture_then_cancelled_link() {
    let mut h = TestHarness::new();
    let a = h.add_skill(0.0, 0.0);
    let b = h.add_skill(0.0, 60.0);
    h.menu(ContextActionKind::SetPostrequisite, a);
    h.release_on(b);

    h.menu(ContextActionKind::DeleteConnections, a);
    let out = h.release_on(b);
    assert_eq!(
        mutations(&out),
        vec![Mutation::Unlinked {
            prereq: a,
            postreq: b
        }]
    );

    h.menu(ContextActionKind::SetPostrequisite, a);
    h.send(EditorEvent::moved(Position::new(30.0, 30.0), None));
    h.send(EditorEvent::Cancel);
    h.send(EditorEvent::release(
        PointerButton::Primary,
        Position::new(0.0, 60.0),
        Some(b),
    ));

    assert_eq!(h.session.editor().state(), MouseState::Idle);
    assert_eq!(h.session.editor().store().edge_count(), 0);
}
