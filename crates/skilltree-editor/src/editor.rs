//! The interaction state machine.
//!
//! [`Editor`] owns the graph and all transient interaction state (selection,
//! hover, drag and pan anchors, the pending source of a link gesture). Every
//! input goes through [`Editor::handle`], which dispatches on the current
//! [`MouseState`] and the event in a single `match`.
//!
//! Events that mean nothing in the current state are ignored. Events that
//! name a node the graph does not contain fail with
//! [`Error::UnknownNode`](skilltree_core::Error::UnknownNode) before anything
//! changes.

use std::collections::BTreeSet;

use skilltree_core::{DEFAULT_GRID_SIZE, Error, NodeId, Position, Result, Upgrade};
use skilltree_graph::{GraphStore, IdMapping, UnlinkOutcome};

use crate::event::{ContextActionKind, EditorEvent, PointerButton};
use crate::notification::{Mutation, Notification};
use crate::state::MouseState;

/// Skill tree editor core.
#[derive(Debug, Clone)]
pub struct Editor {
    store: GraphStore,
    state: MouseState,
    selection: BTreeSet<NodeId>,
    hover: Option<NodeId>,
    grid_size: f64,

    // Dragging
    dragging: Vec<NodeId>,
    drag_anchor: Option<Position>,
    drag_moved: bool,

    // Panning
    pan_anchor: Option<Position>,

    // Selecting*/DeletingConnection
    pending: Option<NodeId>,
}

impl Editor {
    /// Creates an idle editor over an existing graph.
    pub fn new(store: GraphStore) -> Self {
        Self {
            store,
            state: MouseState::Idle,
            selection: BTreeSet::new(),
            hover: None,
            grid_size: DEFAULT_GRID_SIZE,
            dragging: Vec::new(),
            drag_anchor: None,
            drag_moved: false,
            pan_anchor: None,
            pending: None,
        }
    }

    /// Sets the snapping grid spacing.
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The graph being edited.
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Current interaction mode.
    pub fn state(&self) -> MouseState {
        self.state
    }

    /// Selected nodes, ascending.
    pub fn selection(&self) -> Vec<NodeId> {
        self.selection.iter().copied().collect()
    }

    /// Node under the pointer.
    pub fn hover(&self) -> Option<NodeId> {
        self.hover
    }

    /// Source node of a link or unlink gesture in progress.
    pub fn pending_source(&self) -> Option<NodeId> {
        self.pending
    }

    // ========================================================================
    // Whole-graph operations
    // ========================================================================

    /// Swaps in a different graph (after a load or recovery) and returns the
    /// old one. All interaction state is reset.
    pub fn replace_store(&mut self, store: GraphStore) -> GraphStore {
        let grid_size = self.grid_size;
        let old = std::mem::replace(self, Self::new(store).with_grid_size(grid_size));
        old.store
    }

    /// Renumbers the graph densely and rewrites every id the editor holds.
    pub fn renumber(&mut self) -> IdMapping {
        let mapping = self.store.reassign_ids();
        let remap = |id: NodeId| mapping.get(&id).copied();

        self.selection = self.selection.iter().filter_map(|id| remap(*id)).collect();
        self.dragging = self.dragging.iter().filter_map(|id| remap(*id)).collect();
        self.hover = self.hover.and_then(remap);
        self.pending = self.pending.and_then(remap);
        mapping
    }

    /// Replaces a node's upgrade payload (the skill panel's edit).
    pub fn edit_upgrade(&mut self, id: NodeId, upgrade: Upgrade) -> Result<Vec<Notification>> {
        self.store.set_upgrade(id, upgrade)?;
        Ok(vec![Notification::GraphMutated(Mutation::Edited(id))])
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Applies one input event and returns what the view should update.
    pub fn handle(&mut self, event: EditorEvent) -> Result<Vec<Notification>> {
        let mut out = Vec::new();
        let name = event.name();

        match (self.state, event) {
            // ----------------------------------------------------------------
            // Pointer movement (every state)
            // ----------------------------------------------------------------
            (state, EditorEvent::PointerMove { position, hover }) => {
                self.update_hover(hover, &mut out);
                match state {
                    MouseState::Dragging => self.drag_to(position, &mut out)?,
                    MouseState::Panning => self.pan_to(position, &mut out),
                    s if s.shows_rubber_line() => self.stretch_rubber_line(position, &mut out),
                    _ => {}
                }
            }

            // ----------------------------------------------------------------
            // Idle
            // ----------------------------------------------------------------
            (
                MouseState::Idle,
                EditorEvent::PointerPress {
                    button: PointerButton::Primary,
                    position,
                    target: Some(id),
                },
            ) => self.begin_drag(id, position, &mut out)?,
            (
                MouseState::Idle,
                EditorEvent::PointerPress {
                    button: PointerButton::Primary,
                    target: None,
                    ..
                },
            ) => self.clear_selection(&mut out),
            (
                MouseState::Idle,
                EditorEvent::PointerPress {
                    button: PointerButton::Middle,
                    position,
                    ..
                },
            ) => {
                self.pan_anchor = Some(position);
                self.set_state(MouseState::Panning, &mut out);
            }
            (
                MouseState::Idle,
                EditorEvent::ContextAction {
                    kind,
                    target,
                    position,
                },
            ) => self.context_action(kind, target, position, &mut out)?,

            // ----------------------------------------------------------------
            // Dragging
            // ----------------------------------------------------------------
            (
                MouseState::Dragging,
                EditorEvent::PointerRelease {
                    button: PointerButton::Primary,
                    target,
                    ..
                },
            ) => self.finish_drag(target, &mut out)?,

            // ----------------------------------------------------------------
            // Panning
            // ----------------------------------------------------------------
            (
                MouseState::Panning,
                EditorEvent::PointerRelease {
                    button: PointerButton::Middle,
                    ..
                },
            ) => {
                self.pan_anchor = None;
                self.set_state(MouseState::Idle, &mut out);
            }

            // ----------------------------------------------------------------
            // Selecting a link or unlink target
            // ----------------------------------------------------------------
            (
                state,
                EditorEvent::PointerRelease {
                    button: PointerButton::Primary,
                    target,
                    ..
                },
            ) if state.is_selecting() => self.pick_target(state, target, &mut out)?,

            // ----------------------------------------------------------------
            // Keyboard and cancellation
            // ----------------------------------------------------------------
            (state, EditorEvent::DeleteKeyPressed) if state.accepts_delete() => {
                self.delete_selection(&mut out)?
            }
            (state, EditorEvent::Cancel) if !state.is_idle() => self.cancel(&mut out),

            (state, _) => log::debug!("Ignoring {name} while {state}"),
        }

        Ok(out)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn set_state(&mut self, next: MouseState, out: &mut Vec<Notification>) {
        if self.state == next {
            return;
        }
        log::debug!("Mouse state {} -> {next}", self.state);
        self.state = next;
        let context = self
            .pending
            .and_then(|id| self.store.get_node(id))
            .map(|node| node.upgrade.name.clone());
        out.push(Notification::MouseStateChanged {
            state: next,
            context,
        });
    }

    fn require(&self, id: NodeId) -> Result<Position> {
        self.store
            .get_node(id)
            .map(|node| node.position)
            .ok_or_else(|| Error::unknown_node(id))
    }

    fn update_hover(&mut self, hover: Option<NodeId>, out: &mut Vec<Notification>) {
        let hover = hover.filter(|id| self.store.contains(*id));
        if hover != self.hover {
            self.hover = hover;
            out.push(Notification::HoverChanged(hover));
        }
    }

    fn clear_selection(&mut self, out: &mut Vec<Notification>) {
        if !self.selection.is_empty() {
            self.selection.clear();
            out.push(Notification::SelectionChanged(Vec::new()));
        }
    }

    // ------------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------------

    fn begin_drag(
        &mut self,
        id: NodeId,
        position: Position,
        out: &mut Vec<Notification>,
    ) -> Result<()> {
        self.require(id)?;

        // A press selects only the pressed node.
        if self.selection.len() != 1 || !self.selection.contains(&id) {
            self.selection = BTreeSet::from([id]);
            out.push(Notification::SelectionChanged(vec![id]));
        }

        self.dragging = self.selection();
        self.drag_anchor = Some(position);
        self.drag_moved = false;
        out.push(Notification::DragCountChanged(self.dragging.len()));
        self.set_state(MouseState::Dragging, out);
        Ok(())
    }

    fn drag_to(&mut self, position: Position, out: &mut Vec<Notification>) -> Result<()> {
        let Some(anchor) = self.drag_anchor else {
            return Ok(());
        };
        let (dx, dy) = position.delta_from(anchor);
        if dx == 0.0 && dy == 0.0 {
            return Ok(());
        }
        // A rejected move leaves both the nodes and the anchor untouched.
        for id in &self.dragging {
            self.require(*id)?.translated(dx, dy).validated()?;
        }
        self.drag_anchor = Some(position);
        for id in &self.dragging {
            self.store.translate_node(*id, dx, dy)?;
        }
        self.drag_moved = true;
        out.push(Notification::NodesMoved(self.dragging.clone()));
        Ok(())
    }

    fn finish_drag(&mut self, target: Option<NodeId>, out: &mut Vec<Notification>) -> Result<()> {
        let mut moved = self.drag_moved;

        match target {
            Some(id) => {
                self.require(id)?;
                for node in &self.dragging {
                    let current = self.require(*node)?;
                    let snapped = current.snapped(self.grid_size);
                    if snapped != current {
                        self.store.set_position(*node, snapped)?;
                        moved = true;
                    }
                }
                if moved {
                    out.push(Notification::NodesMoved(self.dragging.clone()));
                }
            }
            None => self.clear_selection(out),
        }

        let dragged = std::mem::take(&mut self.dragging);
        if moved {
            out.push(Notification::GraphMutated(Mutation::Moved(dragged)));
        }
        self.end_drag(out);
        Ok(())
    }

    fn end_drag(&mut self, out: &mut Vec<Notification>) {
        self.dragging.clear();
        self.drag_anchor = None;
        self.drag_moved = false;
        out.push(Notification::DragCountChanged(0));
        self.set_state(MouseState::Idle, out);
    }

    // ------------------------------------------------------------------------
    // Pan
    // ------------------------------------------------------------------------

    fn pan_to(&mut self, position: Position, out: &mut Vec<Notification>) {
        let Some(anchor) = self.pan_anchor.replace(position) else {
            return;
        };
        let (dx, dy) = position.delta_from(anchor);
        if dx != 0.0 || dy != 0.0 {
            out.push(Notification::ViewportScrolled { dx: -dx, dy: -dy });
        }
    }

    // ------------------------------------------------------------------------
    // Link gestures
    // ------------------------------------------------------------------------

    fn begin_gesture(
        &mut self,
        next: MouseState,
        id: NodeId,
        position: Position,
        out: &mut Vec<Notification>,
    ) -> Result<()> {
        let from = self.require(id)?;
        self.pending = Some(id);
        self.set_state(next, out);
        if next.shows_rubber_line() {
            out.push(Notification::RubberLine { from, to: position });
        }
        Ok(())
    }

    fn stretch_rubber_line(&mut self, position: Position, out: &mut Vec<Notification>) {
        if let Some(from) = self.pending.and_then(|id| self.store.get_node(id)) {
            out.push(Notification::RubberLine {
                from: from.position,
                to: position,
            });
        }
    }

    fn pick_target(
        &mut self,
        state: MouseState,
        target: Option<NodeId>,
        out: &mut Vec<Notification>,
    ) -> Result<()> {
        let Some(source) = self.pending else {
            self.end_gesture(out);
            return Ok(());
        };

        match target {
            Some(id) if id == source => {
                log::debug!("Ignoring click on pending node {id}");
                return Ok(());
            }
            Some(id) => {
                self.require(id)?;
                let mutation = match state {
                    MouseState::SelectingPrerequisite => self
                        .store
                        .relations()
                        .add_prerequisite(id, source)?
                        .changed()
                        .then_some(Mutation::Linked {
                            prereq: id,
                            postreq: source,
                        }),
                    MouseState::SelectingPostrequisite => self
                        .store
                        .relations()
                        .add_postrequisite(source, id)?
                        .changed()
                        .then_some(Mutation::Linked {
                            prereq: source,
                            postreq: id,
                        }),
                    _ => match self.store.relations().delete_connection(source, id)? {
                        UnlinkOutcome::Removed { prereq, postreq } => {
                            Some(Mutation::Unlinked { prereq, postreq })
                        }
                        UnlinkOutcome::NotLinked => None,
                    },
                };
                self.end_gesture(out);
                if let Some(mutation) = mutation {
                    out.push(Notification::GraphMutated(mutation));
                }
            }
            None => self.end_gesture(out),
        }
        Ok(())
    }

    fn end_gesture(&mut self, out: &mut Vec<Notification>) {
        if self.state.shows_rubber_line() {
            out.push(Notification::RubberLineCleared);
        }
        self.pending = None;
        self.set_state(MouseState::Idle, out);
    }

    // ------------------------------------------------------------------------
    // Context menu
    // ------------------------------------------------------------------------

    fn context_action(
        &mut self,
        kind: ContextActionKind,
        target: Option<NodeId>,
        position: Position,
        out: &mut Vec<Notification>,
    ) -> Result<()> {
        if !kind.needs_target() {
            let id = self.store.create_node(position, None)?;
            out.push(Notification::GraphMutated(Mutation::Added(id)));
            return Ok(());
        }
        let Some(id) = target else {
            log::debug!("Ignoring {kind:?} without a target node");
            return Ok(());
        };

        match kind {
            ContextActionKind::DeleteNode => {
                self.require(id)?;
                self.remove_nodes(&[id], out)
            }
            ContextActionKind::SetPrerequisite => {
                self.begin_gesture(MouseState::SelectingPrerequisite, id, position, out)
            }
            ContextActionKind::SetPostrequisite => {
                self.begin_gesture(MouseState::SelectingPostrequisite, id, position, out)
            }
            ContextActionKind::DeleteConnections => {
                self.begin_gesture(MouseState::DeletingConnection, id, position, out)
            }
            ContextActionKind::AddSkill => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    fn delete_selection(&mut self, out: &mut Vec<Notification>) -> Result<()> {
        if self.selection.is_empty() {
            log::debug!("Delete key with nothing selected");
            return Ok(());
        }
        let ids = self.selection();
        self.remove_nodes(&ids, out)?;
        if self.state == MouseState::Dragging {
            self.end_drag(out);
        }
        Ok(())
    }

    /// Severs and removes each node, then forgets every reference to it.
    fn remove_nodes(&mut self, ids: &[NodeId], out: &mut Vec<Notification>) -> Result<()> {
        for id in ids {
            self.store.remove_node(*id)?;
            out.push(Notification::GraphMutated(Mutation::Removed(*id)));
        }

        let before = self.selection.len();
        self.selection.retain(|id| !ids.contains(id));
        if self.selection.len() != before {
            out.push(Notification::SelectionChanged(self.selection()));
        }
        if self.hover.is_some_and(|id| ids.contains(&id)) {
            self.hover = None;
            out.push(Notification::HoverChanged(None));
        }
        self.dragging.retain(|id| !ids.contains(id));
        if self.pending.is_some_and(|id| ids.contains(&id)) {
            self.pending = None;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Cancel
    // ------------------------------------------------------------------------

    fn cancel(&mut self, out: &mut Vec<Notification>) {
        match self.state {
            MouseState::Dragging => self.end_drag(out),
            MouseState::Panning => {
                self.pan_anchor = None;
                self.set_state(MouseState::Idle, out);
            }
            state if state.is_selecting() => self.end_gesture(out),
            _ => {}
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(GraphStore::new())
    }
}

// ============================================================================
// Tests
// ============================================================================
