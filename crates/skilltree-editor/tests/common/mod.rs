//! Common test utilities and harness for editor integration tests.

use skilltree_core::{NodeId, Position};
use skilltree_editor::{ContextActionKind, EditorEvent, Notification, PointerButton, Session};
use skilltree_persist::PersistenceEngine;
use tempfile::TempDir;

/// Test harness owning a session and the directory its files live in.
pub struct TestHarness {
    /// Temporary directory (removed on drop)
    pub dir: TempDir,
    /// Session under test
    pub session: Session,
}

impl TestHarness {
    /// Creates a harness with an empty graph and autosave on.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let engine = PersistenceEngine::new(dir.path().join("skill_tree.json"));
        let (session, _) = Session::open(engine).unwrap();
        Self { dir, session }
    }

    /// Opens a second session over the same files, as a restart would.
    pub fn reopen(&self) -> Session {
        let engine = PersistenceEngine::new(self.dir.path().join("skill_tree.json"));
        Session::open(engine).unwrap().0
    }

    /// Adds a skill through the canvas context menu and returns its id.
    pub fn add_skill(&mut self, x: f64, y: f64) -> NodeId {
        let out = self.send(EditorEvent::context(
            ContextActionKind::AddSkill,
            None,
            Position::new(x, y),
        ));
        out.iter()
            .find_map(|n| match n {
                Notification::GraphMutated(skilltree_editor::Mutation::Added(id)) => Some(*id),
                _ => None,
            })
            .expect("add skill reports the new id")
    }

    /// Opens the node context menu and picks `kind`.
    pub fn menu(&mut self, kind: ContextActionKind, node: NodeId) -> Vec<Notification> {
        let at = self.position(node);
        self.send(EditorEvent::context(kind, Some(node), at))
    }

    /// Primary click (press then release) on a node.
    pub fn click(&mut self, node: NodeId) -> Vec<Notification> {
        let at = self.position(node);
        let mut out = self.send(EditorEvent::press(PointerButton::Primary, at, Some(node)));
        out.extend(self.send(EditorEvent::release(PointerButton::Primary, at, Some(node))));
        out
    }

    /// Primary release over a node, as when finishing a link gesture.
    pub fn release_on(&mut self, node: NodeId) -> Vec<Notification> {
        let at = self.position(node);
        self.send(EditorEvent::release(PointerButton::Primary, at, Some(node)))
    }

    /// Sends one event and unwraps the result.
    pub fn send(&mut self, event: EditorEvent) -> Vec<Notification> {
        self.session.handle(event).unwrap()
    }

    /// Current position of a node.
    pub fn position(&self, node: NodeId) -> Position {
        self.session
            .editor()
            .store()
            .get_node(node)
            .map(|n| n.position)
            .unwrap_or_default()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the graph mutations from a batch of notifications.
pub fn mutations(out: &[Notification]) -> Vec<skilltree_editor::Mutation> {
    out.iter().filter_map(|n| n.as_mutation().cloned()).collect()
}
