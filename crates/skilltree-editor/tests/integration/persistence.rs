//! Autosave, save, and restart behavior through a session.

use crate::common::TestHarness;
use skilltree_core::NodeId;
use skilltree_editor::ContextActionKind;
use skilltree_persist::{PersistenceEngine, Resolution};

#[test]
fn test_autosave_reconstructs_live_edges() {
    let mut h = TestHarness::new();
    let a = h.add_skill(0.0, 0.0);
    let b = h.add_skill(60.0, 60.0);
    h.menu(ContextActionKind::SetPostrequisite, a);
    h.release_on(b);

    let autosave = h.session.engine().autosave_path().to_path_buf();
    assert!(autosave.exists());
    let (reloaded, report) = PersistenceEngine::load_from(&autosave).unwrap();
    assert!(report.is_clean());
    assert_eq!(reloaded.edges(), h.session.editor().store().edges());
}

#[test]
fn test_save_and_restart() {
    let mut h = TestHarness::new();
    let a = h.add_skill(0.0, 0.0);
    let b = h.add_skill(100.0, 0.0);
    h.menu(ContextActionKind::SetPrerequisite, b);
    h.release_on(a);
    h.session.save().unwrap();

    let restarted = h.reopen();
    assert!(restarted.pending_recovery().is_none());
    let store = restarted.editor().store();
    assert_eq!(store.len(), 2);
    assert_eq!(store.edges(), vec![(NodeId::new(0), NodeId::new(1))]);
}

#[test]
fn test_unsaved_edits_survive_restart_as_recovery() {
    let mut h = TestHarness::new();
    h.add_skill(0.0, 0.0);
    h.session.save().unwrap();
    h.add_skill(0.0, 60.0);

    let mut restarted = h.reopen();
    assert_eq!(restarted.editor().store().len(), 1);
    let info = restarted.pending_recovery().unwrap();
    assert!(info.primary_exists);

    restarted.resolve_recovery(Resolution::Commit).unwrap();
    assert_eq!(restarted.editor().store().len(), 2);
    assert!(restarted.engine().backup_path().exists());
}
