//! An editor bound to a save file.
//!
//! [`Session`] forwards input to its [`Editor`] and, whenever the editor
//! reports a [`Mutation`](crate::Mutation), writes an autosave. Drag steps
//! never autosave; only the drag's completion does. A failed autosave is
//! logged and the event still succeeds.

use skilltree_core::{NodeId, Result, Upgrade};
use skilltree_persist::{
    LoadReport, PersistenceEngine, RecoveryInfo, RecoveryOutcome, Resolution, SaveReport,
    UnsavedChoice,
};

use crate::editor::Editor;
use crate::event::EditorEvent;
use crate::notification::Notification;

/// Editor plus persistence.
#[derive(Debug)]
pub struct Session {
    editor: Editor,
    engine: PersistenceEngine,
    autosave: bool,
    dirty: bool,
}

impl Session {
    /// Wraps an existing editor.
    pub fn new(editor: Editor, engine: PersistenceEngine) -> Self {
        Self {
            editor,
            engine,
            autosave: true,
            dirty: false,
        }
    }

    /// Loads the engine's primary file into a fresh editor.
    pub fn open(engine: PersistenceEngine) -> Result<(Self, LoadReport)> {
        let (store, report) = engine.load()?;
        Ok((Self::new(Editor::new(store), engine), report))
    }

    /// Turns autosave on or off.
    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    /// Sets the snapping grid spacing.
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.editor = self.editor.with_grid_size(grid_size);
        self
    }

    /// The editor.
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The persistence engine.
    pub fn engine(&self) -> &PersistenceEngine {
        &self.engine
    }

    /// Returns `true` if the graph changed since it was loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Applies one input event, autosaving if the graph changed.
    pub fn handle(&mut self, event: EditorEvent) -> Result<Vec<Notification>> {
        let out = self.editor.handle(event)?;
        self.after_edit(&out);
        Ok(out)
    }

    /// Replaces a node's upgrade payload, autosaving afterwards.
    pub fn edit_upgrade(&mut self, id: NodeId, upgrade: Upgrade) -> Result<Vec<Notification>> {
        let out = self.editor.edit_upgrade(id, upgrade)?;
        self.after_edit(&out);
        Ok(out)
    }

    fn after_edit(&mut self, out: &[Notification]) {
        if !out.iter().any(Notification::is_mutation) {
            return;
        }
        self.dirty = true;
        if !self.autosave {
            return;
        }
        if let Err(e) = self.engine.autosave(self.editor.store()) {
            log::warn!("Autosave failed: {e}");
        }
    }

    // ========================================================================
    // Saving
    // ========================================================================

    /// Renumbers the graph and writes the primary file.
    ///
    /// Selection and any pending gesture follow their nodes to the new ids.
    pub fn save(&mut self) -> Result<SaveReport> {
        let mapping = self.editor.renumber();
        let mut report = self.engine.write_primary(self.editor.store())?;
        report.id_mapping = mapping;
        self.dirty = false;
        Ok(report)
    }

    /// Answers the "save changes before closing?" prompt.
    ///
    /// Returns `true` if the session may close.
    pub fn close(&mut self, choice: UnsavedChoice) -> Result<bool> {
        match choice {
            UnsavedChoice::Save => {
                self.save()?;
                Ok(true)
            }
            UnsavedChoice::Discard => {
                if self.engine.pending_recovery().is_some() {
                    self.engine.resolve_recovery(Resolution::Discard)?;
                }
                self.dirty = false;
                Ok(true)
            }
            UnsavedChoice::Cancel => Ok(false),
        }
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Reports a leftover autosave from an earlier session.
    pub fn pending_recovery(&self) -> Option<RecoveryInfo> {
        self.engine.pending_recovery()
    }

    /// Resolves a leftover autosave.
    ///
    /// After a commit the editor is reloaded from the new primary file.
    pub fn resolve_recovery(&mut self, resolution: Resolution) -> Result<RecoveryOutcome> {
        let outcome = self.engine.resolve_recovery(resolution)?;
        if outcome == RecoveryOutcome::Committed {
            let (store, _) = self.engine.load()?;
            self.editor.replace_store(store);
            self.dirty = false;
        }
        Ok(outcome)
    }
}
